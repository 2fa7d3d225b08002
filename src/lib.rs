//! Client side of a [Secure Remote Password][1] (SRP-6a) authentication
//! flow with a memory-hard KDF ([scrypt]) in front of the group math, so
//! that neither the plaintext password nor a password-equivalent secret is
//! ever sent to the server.
//!
//! # Layers
//!
//! From the bottom up:
//!
//! * [`kdf`]: stretches a passphrase plus per-account salt into a
//!   fixed-length derived key (~100ms of CPU-bound work per call).
//! * [`client`]: stateless SRP group operations over the fixed 4096-bit
//!   RFC 5054 group in [`groups`].
//! * [`session`]: one registration or login attempt; owns the ephemeral
//!   secrets and advances by consuming itself, so out-of-order protocol
//!   calls do not typecheck.
//! * [`auth`]: the [`auth::Authenticator`] façade: derives the key, drives
//!   a session, and exchanges payloads through a caller-supplied
//!   [`auth::Transport`].
//!
//! # Usage
//!
//! Registration produces the `(salt, verifier)` pair the server stores:
//!
//! ```rust
//! use sha2::Sha256;
//! use srp_auth::groups::G_4096;
//! use srp_auth::session::SrpSession;
//!
//! let key = srp_auth::kdf::derive(b"passphrase", b"per-account salt");
//! let session = SrpSession::<Sha256>::new(&G_4096, b"alice@example.com", &key[..])?;
//! let registration = session.create_verifier()?;
//! # let _ = (registration.salt, registration.verifier);
//! # Ok::<(), srp_auth::Error>(())
//! ```
//!
//! For login the server returns the stored salt and its public ephemeral
//! `B`; the session computes `A`, the shared session key, and the client
//! proof, then checks the server's proof:
//!
//! ```rust,no_run
//! # use sha2::Sha256;
//! # use srp_auth::groups::G_4096;
//! # use srp_auth::session::SrpSession;
//! # fn server_reply() -> (Vec<u8>, Vec<u8>) { (vec![0; 32], vec![1; 512]) }
//! # fn send_proof(_: &[u8], _: &[u8]) -> Vec<u8> { vec![] }
//! let key = srp_auth::kdf::derive(b"passphrase", b"per-account salt");
//! let session = SrpSession::<Sha256>::new(&G_4096, b"alice@example.com", &key[..])?;
//!
//! let (salt, b_pub) = server_reply();
//! let verifier = session.process_server_reply(&salt, &b_pub)?;
//!
//! let server_proof = send_proof(verifier.public_ephemeral(), verifier.proof());
//! let session_key = verifier.verify_server(&server_proof)?;
//! # let _ = session_key;
//! # Ok::<(), srp_auth::Error>(())
//! ```
//!
//! [1]: https://en.wikipedia.org/wiki/Secure_Remote_Password_protocol
//! [scrypt]: https://www.tarsnap.com/scrypt.html

pub mod auth;
pub mod client;
pub mod errors;
pub mod groups;
pub mod kdf;
pub mod session;
pub mod types;
pub mod utils;

pub use crate::auth::{Authenticator, Transport};
pub use crate::errors::Error;
pub use crate::types::SrpGroup;
