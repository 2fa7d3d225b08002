//! Orchestration façade.
//!
//! Converts a passphrase to a derived key via the KDF, drives one SRP
//! session per registration or login attempt, and packages the results for
//! the transport collaborator. Performs no I/O itself beyond invoking
//! [`Transport::post`] with a fully-formed payload; the passphrase and the
//! derived key never appear in any payload.
//!
//! Wire encoding: every binary field crossing the transport is lowercase
//! hex.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

use crate::errors::Error;
use crate::groups::G_4096;
use crate::kdf;
use crate::session::{SessionKey, SessionVerifier, SrpSession};
use crate::utils::generate_salt;

/// Length of the KDF salt generated at registration, in bytes. Independent
/// of the SRP salt; the two are never the same value.
pub const KDF_SALT_LEN: usize = 32;

/// Transport collaborator contract. Consumed, not implemented, by this
/// crate; the peer is a black box reached over an already-secure channel.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON payload and return the response body as JSON.
    async fn post(&self, path: &str, payload: Value) -> Result<Value, Error>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignupPayload<'a> {
    email: &'a str,
    captcha: &'a str,
    kdf_salt: String,
    srp_salt: String,
    srp_verifier: String,
}

#[derive(Serialize)]
struct LoginDataRequest<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    encrypted_part: String,
    srp_salt: String,
    kdf_salt: String,
    server_public_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginPayload<'a> {
    client_proof: String,
    client_public_key: String,
    email: &'a str,
    time_based_one_time_token: &'a str,
    encrypted_part: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    server_proof: String,
}

/// Authentication façade owning at most one in-flight SRP session.
///
/// Starting a new registration or login discards any prior session state,
/// so concurrent attempts on the same instance are impossible by
/// construction. Cancelling an in-flight attempt drops the session, which
/// zeroizes its ephemeral secrets.
pub struct Authenticator<T: Transport> {
    transport: T,
    session: Option<SessionVerifier<Sha256>>,
}

impl<T: Transport> Authenticator<T> {
    /// Create a façade over the given transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            session: None,
        }
    }

    /// Register an account.
    ///
    /// Generates a fresh KDF salt, derives the key on a blocking thread,
    /// runs a registration session, and submits `{email, captcha, kdfSalt,
    /// srpSalt, srpVerifier}` to `/api/signup`. Returns the transport's
    /// response; no password-derived field beyond the verifier is sent.
    pub async fn register(
        &mut self,
        email: &str,
        passphrase: &str,
        captcha: &str,
    ) -> Result<Value, Error> {
        self.session = None;
        debug!("starting SRP registration");

        let kdf_salt = generate_salt(KDF_SALT_LEN)?;
        let key = derive_off_thread(passphrase, kdf_salt.clone()).await?;

        let session = SrpSession::<Sha256>::new(&G_4096, email.as_bytes(), &key[..])?;
        let registration = session.create_verifier()?;
        debug!("verifier created, submitting signup");

        let payload = to_payload(&SignupPayload {
            email,
            captcha,
            kdf_salt: hex::encode(&kdf_salt),
            srp_salt: hex::encode(&registration.salt),
            srp_verifier: hex::encode(&registration.verifier),
        })?;
        self.transport.post("/api/signup", payload).await
    }

    /// Log in to an account.
    ///
    /// Fetches the stored salts and server public ephemeral, derives the
    /// key on a blocking thread, runs a login session, submits the client
    /// ephemeral and proof, and verifies the server's proof. The token is
    /// returned only if the server's proof verifies; otherwise the attempt
    /// aborts with [`Error::WrongServerProof`].
    pub async fn login(
        &mut self,
        email: &str,
        passphrase: &str,
        otp: &str,
    ) -> Result<String, Error> {
        self.session = None;
        debug!("starting SRP login");

        let request = to_payload(&LoginDataRequest { email })?;
        let data = self.transport.post("/api/login-data", request).await?;
        let data: LoginData = serde_json::from_value(data)
            .map_err(|e| Error::Transport(format!("malformed login data: {e}")))?;

        let kdf_salt = decode_hex(&data.kdf_salt, "kdfSalt")?;
        let srp_salt = decode_hex(&data.srp_salt, "srpSalt")?;
        let b_pub = decode_hex(&data.server_public_key, "serverPublicKey")?;

        let key = derive_off_thread(passphrase, kdf_salt).await?;
        let session = SrpSession::<Sha256>::new(&G_4096, email.as_bytes(), &key[..])?;
        let verifier = session.process_server_reply(&srp_salt, &b_pub)?;

        let payload = to_payload(&LoginPayload {
            client_proof: hex::encode(verifier.proof()),
            client_public_key: hex::encode(verifier.public_ephemeral()),
            email,
            time_based_one_time_token: otp,
            encrypted_part: data.encrypted_part,
        })?;

        // The verifier stays on this stack frame across the await. A
        // transport failure, or the future being dropped mid-flight,
        // discards the session key instead of leaving it parked in `self`.
        let response = self.transport.post("/api/login", payload).await?;
        let response: LoginResponse = serde_json::from_value(response)
            .map_err(|e| Error::Transport(format!("malformed login response: {e}")))?;

        self.session = Some(verifier);
        self.check_server_proof(&response.server_proof)?;
        debug!("server proof verified");
        Ok(response.token)
    }

    /// Verify the server's proof for the in-flight login session.
    ///
    /// May only be invoked once a session key exists; calling it earlier is
    /// a usage error surfaced as [`Error::InvalidState`], never a silent
    /// `false`. Consumes the session either way.
    pub fn check_server_proof(&mut self, server_proof: &str) -> Result<SessionKey, Error> {
        let verifier = self.session.take().ok_or(Error::InvalidState {
            operation: "check_server_proof",
            required: "an established session key",
        })?;
        let reply = decode_hex(server_proof, "serverProof")?;
        verifier.verify_server(&reply)
    }
}

/// Run the intentionally slow KDF off the caller's thread.
async fn derive_off_thread(passphrase: &str, salt: Vec<u8>) -> Result<kdf::DerivedKey, Error> {
    let passphrase = Zeroizing::new(passphrase.as_bytes().to_vec());
    tokio::task::spawn_blocking(move || kdf::derive(&passphrase, &salt))
        .await
        .map_err(|e| Error::Internal(format!("key derivation task failed: {e}")))
}

fn to_payload<P: Serialize>(payload: &P) -> Result<Value, Error> {
    serde_json::to_value(payload).map_err(|e| Error::Internal(e.to_string()))
}

fn decode_hex(field: &str, name: &'static str) -> Result<Vec<u8>, Error> {
    hex::decode(field).map_err(|_| Error::ProtocolViolation { name })
}
