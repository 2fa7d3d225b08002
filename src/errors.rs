//! Error types.

use thiserror::Error;

/// Authentication error.
///
/// Mismatching proofs and malformed peer values are surfaced as typed
/// variants; none of the `Display` output carries secret material.
#[derive(Debug, Error)]
pub enum Error {
    /// A protocol method was invoked out of sequence.
    #[error("invalid state: '{operation}' requires {required}")]
    InvalidState {
        /// Operation that was attempted
        operation: &'static str,
        /// State the session must be in for the operation to be legal
        required: &'static str,
    },

    /// A peer-supplied or caller-supplied value violates the protocol.
    #[error("protocol violation: bad '{name}' value")]
    ProtocolViolation {
        /// Parameter name
        name: &'static str,
    },

    /// The server's proof failed verification; the login must be aborted.
    #[error("server proof verification failed")]
    WrongServerProof,

    /// The secure random source is unavailable. Fatal, no fallback.
    #[error("secure random source unavailable")]
    EntropyFailure(#[from] rand::Error),

    /// The transport collaborator failed to complete a request.
    #[error("transport: {0}")]
    Transport(String),

    /// A background task could not be joined.
    #[error("internal: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_names_the_parameter() {
        let err = Error::ProtocolViolation { name: "b_pub" };
        assert_eq!(err.to_string(), "protocol violation: bad 'b_pub' value");
    }

    #[test]
    fn display_names_the_required_state() {
        let err = Error::InvalidState {
            operation: "check_server_proof",
            required: "an established session key",
        };
        assert!(err.to_string().contains("check_server_proof"));
        assert!(err.to_string().contains("established session key"));
    }
}
