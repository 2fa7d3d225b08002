//! Conformant SRP peer used to exercise the client against the other side
//! of the protocol. Mirrors the server computations bit-for-bit:
//! `B = k*v + g^b`, `S = (A * v^u)^b`, `K = H(PAD(S))`.

#![allow(dead_code)]

use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use srp_auth::groups::G_4096;
use srp_auth::utils::{compute_k, compute_m1, compute_m2, compute_session_key, compute_u, pad_to_n};

pub struct PeerServer {
    b: BigUint,
    b_pub: BigUint,
    verifier: BigUint,
}

pub struct PeerSession {
    pub key: Vec<u8>,
    pub expected_m1: Vec<u8>,
    pub m2: Vec<u8>,
}

impl PeerServer {
    pub fn new(verifier: &[u8]) -> Self {
        let mut b_bytes = [0u8; 64];
        OsRng.fill_bytes(&mut b_bytes);
        let b = BigUint::from_bytes_be(&b_bytes);

        let k = compute_k::<Sha256>(&G_4096);
        let verifier = BigUint::from_bytes_be(verifier);
        let g_b = G_4096.g.modpow(&b, &G_4096.n);
        let b_pub = ((k * &verifier) % &G_4096.n + g_b) % &G_4096.n;

        Self { b, b_pub, verifier }
    }

    pub fn public_ephemeral(&self) -> Vec<u8> {
        pad_to_n(&self.b_pub, &G_4096)
    }

    /// Derive the peer's side of the session from the client's public
    /// ephemeral and proof. Returns the session regardless of whether the
    /// client proof checks out, so tests can drive the mismatch paths.
    pub fn derive_session(&self, a_pub: &[u8], client_m1: &[u8]) -> PeerSession {
        let a = BigUint::from_bytes_be(a_pub);
        assert_ne!(
            &a % &G_4096.n,
            BigUint::default(),
            "client ephemeral must be non-zero mod N"
        );

        let a_padded = pad_to_n(&a, &G_4096);
        let b_padded = pad_to_n(&self.b_pub, &G_4096);
        let u = compute_u::<Sha256>(&a_padded, &b_padded);

        // S = (A * v^u)^b mod N
        let v_u = self.verifier.modpow(&u, &G_4096.n);
        let base = (&a * v_u) % &G_4096.n;
        let premaster = base.modpow(&self.b, &G_4096.n);

        let key = compute_session_key::<Sha256>(&premaster, &G_4096);
        let expected_m1 = compute_m1::<Sha256>(&a_padded, &b_padded, key.as_slice());
        let m2 = compute_m2::<Sha256>(&a_padded, client_m1, key.as_slice());

        PeerSession {
            key: key.as_slice().to_vec(),
            expected_m1: expected_m1.as_slice().to_vec(),
            m2: m2.as_slice().to_vec(),
        }
    }
}

impl PeerSession {
    pub fn verify_client(&self, client_m1: &[u8]) -> bool {
        self.expected_m1.as_slice().ct_eq(client_m1).unwrap_u8() == 1
    }
}
