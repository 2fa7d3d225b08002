//! Degenerate server ephemerals must abort the handshake before any
//! secret-dependent computation.

use sha2::Sha256;

use srp_auth::groups::G_4096;
use srp_auth::session::SrpSession;
use srp_auth::Error;

fn attempt(b_pub: &[u8]) -> Result<(), Error> {
    let session = SrpSession::<Sha256>::new(&G_4096, b"alice@example.com", b"p@ssw0rd")?;
    session.process_server_reply(&[0x42; 32], b_pub)?;
    Ok(())
}

#[test]
fn zero_b_pub_rejected() {
    match attempt(&[0u8; 512]) {
        Err(Error::ProtocolViolation { .. }) => {}
        other => panic!("B = 0 must be rejected, got {other:?}"),
    }
}

#[test]
fn modulus_b_pub_rejected() {
    let n = G_4096.n.to_bytes_be();
    match attempt(&n) {
        Err(Error::ProtocolViolation { .. }) => {}
        other => panic!("B = N must be rejected, got {other:?}"),
    }
}

#[test]
fn twice_modulus_b_pub_rejected() {
    let n2 = (&G_4096.n * 2u32).to_bytes_be();
    match attempt(&n2) {
        Err(Error::ProtocolViolation { .. }) => {}
        other => panic!("B = 2N must be rejected, got {other:?}"),
    }
}
