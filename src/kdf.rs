//! Memory-hard key derivation.
//!
//! Stretches a low-entropy passphrase into a fixed-length high-entropy key
//! before it enters the SRP math. Parameters are fixed so that registration
//! and login derive the same key for the same (passphrase, salt) pair on
//! every platform.
//!
//! A call takes on the order of 100ms of CPU-bound work. [`derive`] is
//! synchronous; callers on a thread that must stay responsive should move it
//! to a blocking pool (the [`crate::auth::Authenticator`] does).

use scrypt::{scrypt, Params};
use zeroize::Zeroizing;

/// log2 of the scrypt cost factor (N = 16384, tuned for ~100ms).
pub const LOG_N: u8 = 14;
/// scrypt block size.
pub const R: u32 = 8;
/// scrypt parallelization factor.
pub const P: u32 = 1;
/// Derived key length in bytes.
pub const OUTPUT_LEN: usize = 16;

/// Derived key. Zeroed when dropped; must never be transmitted.
pub type DerivedKey = Zeroizing<[u8; OUTPUT_LEN]>;

/// Derive a key from a passphrase and a per-account salt.
///
/// Deterministic and pure: identical inputs yield identical output bytes.
/// The fixed parameters are valid by construction, so a parameter rejection
/// is a programmer error, not a runtime fault.
pub fn derive(passphrase: &[u8], salt: &[u8]) -> DerivedKey {
    let params = Params::new(LOG_N, R, P).expect("fixed scrypt parameters should be valid");
    let mut key = Zeroizing::new([0u8; OUTPUT_LEN]);
    scrypt(passphrase, salt, &params, &mut key[..])
        .expect("fixed output length should be valid");
    key
}
