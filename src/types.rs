//! Shared SRP types.

use num_bigint::BigUint;

/// Group used for SRP computations.
///
/// Shared by every session and immutable for the lifetime of the process;
/// see [`crate::groups`] for the fixed group this crate ships.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SrpGroup {
    /// A large safe prime (`N = 2q + 1`, where `q` is prime).
    pub n: BigUint,
    /// A generator modulo `N`.
    pub g: BigUint,
}

impl SrpGroup {
    /// Byte length of the modulus. All wire values (A, B, v, S) are padded
    /// to this length before hashing or encoding.
    pub fn n_len(&self) -> usize {
        ((self.n.bits() as usize) + 7) / 8
    }
}
