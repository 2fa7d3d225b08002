//! Hash compositions shared by the client and the test peer, plus salt
//! generation. The exact byte layout of every hash input must match the
//! server implementation bit-for-bit or the protocol fails.

use digest::{Digest, Output};
use num_bigint::BigUint;
use rand::{rngs::OsRng, RngCore};

use crate::errors::Error;
use crate::types::SrpGroup;

/// Pad a big-endian byte string with leading zeros to `len` bytes.
///
/// Values longer than `len` keep only their `len` trailing bytes, matching
/// the reduction the group arithmetic already guarantees.
pub fn pad_to(bytes: Vec<u8>, len: usize) -> Vec<u8> {
    if bytes.len() >= len {
        bytes[bytes.len() - len..].to_vec()
    } else {
        let mut padded = vec![0u8; len - bytes.len()];
        padded.extend_from_slice(&bytes);
        padded
    }
}

/// Pad a group element to the modulus length.
pub fn pad_to_n(value: &BigUint, params: &SrpGroup) -> Vec<u8> {
    pad_to(value.to_bytes_be(), params.n_len())
}

// u = H(PAD(A) | PAD(B))
pub fn compute_u<D: Digest>(a_pub: &[u8], b_pub: &[u8]) -> BigUint {
    let mut u = D::new();
    u.update(a_pub);
    u.update(b_pub);
    BigUint::from_bytes_be(&u.finalize())
}

// k = H(N | PAD(g))
pub fn compute_k<D: Digest>(params: &SrpGroup) -> BigUint {
    let mut d = D::new();
    d.update(params.n.to_bytes_be());
    d.update(pad_to_n(&params.g, params));
    BigUint::from_bytes_be(&d.finalize())
}

// K = H(PAD(S))
pub fn compute_session_key<D: Digest>(premaster: &BigUint, params: &SrpGroup) -> Output<D> {
    let mut d = D::new();
    d.update(pad_to_n(premaster, params));
    d.finalize()
}

// M1 = H(PAD(A) | PAD(B) | K) - this doesn't follow RFC 2945 but matches
// what deployed SRP peers actually compute for M1
pub fn compute_m1<D: Digest>(a_pub: &[u8], b_pub: &[u8], key: &[u8]) -> Output<D> {
    let mut d = D::new();
    d.update(a_pub);
    d.update(b_pub);
    d.update(key);
    d.finalize()
}

// M2 = H(PAD(A) | M1 | K)
pub fn compute_m2<D: Digest>(a_pub: &[u8], m1: &[u8], key: &[u8]) -> Output<D> {
    let mut d = D::new();
    d.update(a_pub);
    d.update(m1);
    d.update(key);
    d.finalize()
}

/// Generate `len` bytes from the operating system's secure random source.
///
/// A failing entropy source is fatal: the operation aborts with
/// [`Error::EntropyFailure`] rather than falling back to a weaker source.
pub fn generate_salt(len: usize) -> Result<Vec<u8>, Error> {
    let mut salt = vec![0u8; len];
    OsRng.try_fill_bytes(&mut salt)?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::G_4096;
    use sha2::Sha256;

    #[test]
    fn pad_to_prepends_zeros() {
        let padded = pad_to(vec![0xff], 4);
        assert_eq!(padded, vec![0, 0, 0, 0xff]);
    }

    #[test]
    fn pad_to_keeps_trailing_bytes_of_long_input() {
        let padded = pad_to(vec![1, 2, 3, 4], 2);
        assert_eq!(padded, vec![3, 4]);
    }

    #[test]
    fn k_is_deterministic_and_nonzero() {
        let k1 = compute_k::<Sha256>(&G_4096);
        let k2 = compute_k::<Sha256>(&G_4096);
        assert_eq!(k1, k2);
        assert_ne!(k1, BigUint::default());
    }

    #[test]
    fn u_changes_with_either_ephemeral() {
        let u1 = compute_u::<Sha256>(b"aaaa", b"bbbb");
        let u2 = compute_u::<Sha256>(b"aaab", b"bbbb");
        let u3 = compute_u::<Sha256>(b"aaaa", b"bbbc");
        assert_ne!(u1, u2);
        assert_ne!(u1, u3);
    }

    #[test]
    fn salt_has_requested_length() {
        let salt = generate_salt(32).unwrap();
        assert_eq!(salt.len(), 32);
    }

    #[test]
    fn successive_salts_differ() {
        let a = generate_salt(32).unwrap();
        let b = generate_salt(32).unwrap();
        assert_ne!(a, b);
    }
}
