//! SRP client session state machine.
//!
//! A session holds one party's ephemeral secrets for a single registration
//! or login attempt. States advance by consuming the session value, so
//! out-of-order calls are unrepresentable at this layer:
//!
//! ```text
//! SrpSession --create_verifier()------> RegistrationRecord   (terminal)
//! SrpSession --process_server_reply()-> SessionVerifier
//! SessionVerifier --verify_server()---> SessionKey           (terminal)
//! ```
//!
//! Key buffers are zeroized on drop in every state. The big-integer
//! temporaries of the group math cannot be wiped in place. There is no retry
//! at this layer; a failed attempt is discarded and the orchestration layer
//! starts a fresh session.
//!
//! ```rust
//! use sha2::Sha256;
//! use srp_auth::groups::G_4096;
//! use srp_auth::session::SrpSession;
//!
//! let session = SrpSession::<Sha256>::new(&G_4096, b"alice@example.com", b"derived key")?;
//! let registration = session.create_verifier()?;
//! assert_eq!(registration.salt.len(), 32);
//! # Ok::<(), srp_auth::Error>(())
//! ```

use digest::{Digest, Output};
use num_bigint::BigUint;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::client::SrpClient;
use crate::errors::Error;
use crate::types::SrpGroup;
use crate::utils::{compute_m1, compute_m2, compute_session_key, generate_salt, pad_to_n};

/// Length of the SRP salt generated at registration, in bytes.
pub const SRP_SALT_LEN: usize = 32;

/// Length of the private ephemeral exponent drawn per login, in bytes.
const EPHEMERAL_LEN: usize = 64;

/// Initialized session: identity and derived key supplied, no ephemeral
/// state yet.
#[cfg_attr(test, derive(Debug))]
pub struct SrpSession<D: Digest> {
    engine: SrpClient<D>,
    identity: Vec<u8>,
    key: Zeroizing<Vec<u8>>,
}

/// Output of the registration path: what the caller hands to the server.
/// The client never stores the verifier.
pub struct RegistrationRecord {
    /// Fresh SRP salt bound to the verifier.
    pub salt: Vec<u8>,
    /// Password verifier `v = g^x mod N`, padded to the modulus length.
    pub verifier: Vec<u8>,
}

/// Session after the ephemeral exchange: shared secret established, proofs
/// computed, waiting for the server's proof.
#[cfg_attr(test, derive(Debug))]
pub struct SessionVerifier<D: Digest> {
    a_pub: Vec<u8>,
    m1: Output<D>,
    m2: Output<D>,
    key: Zeroizing<Vec<u8>>,
}

/// Shared session key, zeroed on drop.
pub type SessionKey = Zeroizing<Vec<u8>>;

impl<D: Digest> SrpSession<D> {
    /// Initialize a session from an identity and a KDF-derived key.
    ///
    /// An empty identity or key is rejected: both participate in the hash
    /// deriving the private exponent.
    pub fn new(params: &'static SrpGroup, identity: &[u8], key: &[u8]) -> Result<Self, Error> {
        if identity.is_empty() {
            return Err(Error::ProtocolViolation { name: "identity" });
        }
        if key.is_empty() {
            return Err(Error::ProtocolViolation { name: "derived key" });
        }
        Ok(Self {
            engine: SrpClient::new(params),
            identity: identity.to_vec(),
            key: Zeroizing::new(key.to_vec()),
        })
    }

    /// Registration path: generate a fresh SRP salt and compute the
    /// verifier. Consumes the session; a session used for registration
    /// cannot be reused for login.
    pub fn create_verifier(self) -> Result<RegistrationRecord, Error> {
        let salt = generate_salt(SRP_SALT_LEN)?;
        let verifier = self.engine.compute_verifier(&self.identity, &self.key, &salt);
        Ok(RegistrationRecord { salt, verifier })
    }

    /// Login path: process the server-provided SRP salt and public
    /// ephemeral `B`.
    ///
    /// Draws a fresh private ephemeral, establishes the shared secret and
    /// session key, and returns the proof-exchange state. Fails with
    /// [`Error::ProtocolViolation`] on a short salt or a degenerate `B`.
    pub fn process_server_reply(
        self,
        salt: &[u8],
        b_pub: &[u8],
    ) -> Result<SessionVerifier<D>, Error> {
        if salt.len() < SRP_SALT_LEN {
            return Err(Error::ProtocolViolation { name: "salt" });
        }

        let b_pub = BigUint::from_bytes_be(b_pub);
        // Safeguard against malicious B, before any secret-dependent math.
        self.engine.validate_b_pub(&b_pub)?;

        // Fresh per-attempt ephemeral; never reused, never persisted.
        let a = Zeroizing::new(generate_salt(EPHEMERAL_LEN)?);
        let a_int = BigUint::from_bytes_be(&a);
        let a_pub = self.engine.compute_g_x(&a_int);

        let u = self.engine.compute_scrambling(&a_pub, &b_pub);
        if u == BigUint::default() {
            return Err(Error::ProtocolViolation { name: "u" });
        }
        let k = self.engine.compute_multiplier();

        let identity_hash = SrpClient::<D>::compute_identity_hash(&self.identity, &self.key);
        let x = SrpClient::<D>::compute_x(identity_hash.as_slice(), salt);

        let premaster = self
            .engine
            .compute_premaster_secret(&b_pub, &k, &x, &a_int, &u);
        let mut session_key = compute_session_key::<D>(&premaster, self.engine.params());
        let key = Zeroizing::new(session_key.as_slice().to_vec());
        session_key.as_mut_slice().zeroize();

        let a_pub_bytes = pad_to_n(&a_pub, self.engine.params());
        let b_pub_bytes = pad_to_n(&b_pub, self.engine.params());
        let m1 = compute_m1::<D>(&a_pub_bytes, &b_pub_bytes, key.as_slice());
        let m2 = compute_m2::<D>(&a_pub_bytes, m1.as_slice(), key.as_slice());

        Ok(SessionVerifier {
            a_pub: a_pub_bytes,
            m1,
            m2,
            key,
        })
    }
}

impl<D: Digest> SessionVerifier<D> {
    /// Client public ephemeral `A` for sending to the server, padded to the
    /// modulus length.
    pub fn public_ephemeral(&self) -> &[u8] {
        &self.a_pub
    }

    /// Client proof `M1` for sending to the server.
    pub fn proof(&self) -> &[u8] {
        self.m1.as_slice()
    }

    /// Shared session key. Prefer [`Self::verify_server`], which only
    /// releases the key once the server has proven it derived the same one.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Verify the server's proof `M2` against the locally recomputed value.
    ///
    /// Consumes the session; on success the shared session key is released,
    /// on mismatch the attempt is aborted with [`Error::WrongServerProof`]
    /// and all ephemeral state is dropped.
    pub fn verify_server(self, reply: &[u8]) -> Result<SessionKey, Error> {
        if self.m2.as_slice().ct_eq(reply).unwrap_u8() == 1 {
            Ok(self.key)
        } else {
            Err(Error::WrongServerProof)
        }
    }
}
