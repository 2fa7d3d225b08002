//! SRP math engine.
//!
//! Stateless group operations over a fixed `(N, g, H)`; every call is pure
//! and safe for concurrent use across independent sessions. Sessions (see
//! [`crate::session`]) drive this engine and own the ephemeral state.
//!
//! The hash compositions must match the server's implementation
//! bit-for-bit; the layouts live in [`crate::utils`].

use core::marker::PhantomData;

use digest::{Digest, Output};
use num_bigint::BigUint;

use crate::errors::Error;
use crate::types::SrpGroup;
use crate::utils::{compute_k, compute_u, pad_to_n};

/// Stateless SRP-6a client math over a fixed group.
#[cfg_attr(test, derive(Debug))]
pub struct SrpClient<D: Digest> {
    params: &'static SrpGroup,
    d: PhantomData<D>,
}

impl<D: Digest> SrpClient<D> {
    /// Create a new math engine instance over `params`.
    #[must_use]
    pub const fn new(params: &'static SrpGroup) -> Self {
        Self {
            params,
            d: PhantomData,
        }
    }

    /// Group this engine operates over.
    #[must_use]
    pub fn params(&self) -> &'static SrpGroup {
        self.params
    }

    // H(<identity> | ":" | <derived key>)
    //
    // The identity participates so that two accounts with identical
    // passphrases still produce distinct private exponents and verifiers.
    #[must_use]
    pub fn compute_identity_hash(identity: &[u8], key: &[u8]) -> Output<D> {
        let mut d = D::new();
        d.update(identity);
        d.update(b":");
        d.update(key);
        d.finalize()
    }

    // x = H(<salt> | H(<identity> | ":" | <derived key>))
    #[must_use]
    pub fn compute_x(identity_hash: &[u8], salt: &[u8]) -> BigUint {
        let mut x = D::new();
        x.update(salt);
        x.update(identity_hash);
        BigUint::from_bytes_be(&x.finalize())
    }

    // g^x % N
    #[must_use]
    pub fn compute_g_x(&self, x: &BigUint) -> BigUint {
        self.params.g.modpow(x, &self.params.n)
    }

    /// Password verifier (v in RFC 5054) for registration on the server,
    /// padded to the modulus length.
    #[must_use]
    pub fn compute_verifier(&self, identity: &[u8], key: &[u8], salt: &[u8]) -> Vec<u8> {
        let identity_hash = Self::compute_identity_hash(identity, key);
        let x = Self::compute_x(identity_hash.as_slice(), salt);
        pad_to_n(&self.compute_g_x(&x), self.params)
    }

    /// Public ephemeral value for the handshake, `A = g^a % N`, padded to
    /// the modulus length.
    #[must_use]
    pub fn compute_public_ephemeral(&self, a: &[u8]) -> Vec<u8> {
        pad_to_n(
            &self.compute_g_x(&BigUint::from_bytes_be(a)),
            self.params,
        )
    }

    // S = (B - k*g^x) ^ (a + u*x) % N
    //
    // A smaller B than k*g^x is folded back into the group before
    // exponentiation.
    #[must_use]
    pub fn compute_premaster_secret(
        &self,
        b_pub: &BigUint,
        k: &BigUint,
        x: &BigUint,
        a: &BigUint,
        u: &BigUint,
    ) -> BigUint {
        let n = &self.params.n;
        let k_g_x = (k * self.compute_g_x(x)) % n;
        let base = ((b_pub % n) + n - k_g_x) % n;
        let exp = a + u * x;
        base.modpow(&exp, n)
    }

    /// Ensure `b_pub` is non-zero mod `N` and therefore not maliciously
    /// crafted. A degenerate B would force the premaster secret to a value
    /// an attacker can compute without the verifier.
    pub fn validate_b_pub(&self, b_pub: &BigUint) -> Result<(), Error> {
        if b_pub % &self.params.n == BigUint::default() {
            return Err(Error::ProtocolViolation { name: "b_pub" });
        }
        Ok(())
    }

    /// `u = H(PAD(A) | PAD(B))` over this engine's group.
    #[must_use]
    pub fn compute_scrambling(&self, a_pub: &BigUint, b_pub: &BigUint) -> BigUint {
        compute_u::<D>(
            &pad_to_n(a_pub, self.params),
            &pad_to_n(b_pub, self.params),
        )
    }

    /// `k = H(N | PAD(g))` over this engine's group.
    #[must_use]
    pub fn compute_multiplier(&self) -> BigUint {
        compute_k::<D>(self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::SrpClient;
    use crate::groups::G_4096;
    use num_bigint::BigUint;
    use sha2::Sha256;

    #[test]
    fn public_ephemeral_is_modulus_length() {
        let client = SrpClient::<Sha256>::new(&G_4096);
        let a_pub = client.compute_public_ephemeral(&[0x42; 64]);
        assert_eq!(a_pub.len(), 512);
    }

    #[test]
    fn verifier_is_deterministic_per_salt() {
        let client = SrpClient::<Sha256>::new(&G_4096);
        let v1 = client.compute_verifier(b"alice", b"key", b"salt-a");
        let v2 = client.compute_verifier(b"alice", b"key", b"salt-a");
        let v3 = client.compute_verifier(b"alice", b"key", b"salt-b");
        assert_eq!(v1, v2);
        assert_ne!(v1, v3);
    }

    #[test]
    fn identity_separates_equal_keys() {
        let client = SrpClient::<Sha256>::new(&G_4096);
        let v1 = client.compute_verifier(b"alice", b"key", b"salt");
        let v2 = client.compute_verifier(b"bob", b"key", b"salt");
        assert_ne!(v1, v2);
    }

    #[test]
    fn zero_b_pub_is_rejected() {
        let client = SrpClient::<Sha256>::new(&G_4096);
        assert!(client.validate_b_pub(&BigUint::default()).is_err());
        // A multiple of N is still zero in the group.
        assert!(client.validate_b_pub(&G_4096.n).is_err());
        assert!(client.validate_b_pub(&BigUint::from(5u32)).is_ok());
    }
}
