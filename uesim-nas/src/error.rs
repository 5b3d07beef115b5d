//! Errors surfaced by the UE NAS layer

use thiserror::Error;

use crate::codec::CodecError;

/// Failure of a top-level decode or encode call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NasError {
    /// The PDU violates the wire format; nothing past the fault was read
    #[error("Malformed PDU: {0}")]
    MalformedPdu(#[from] CodecError),

    /// MAC-A computed by the UE differs from the MAC in AUTN
    #[error("Authentication failure: received and calculated MAC values do not match")]
    AuthenticationFailure,

    /// A value needed for authentication was never received or derived
    #[error("Missing authentication parameter: {0}")]
    MissingAuthenticationParameter(&'static str),
}

/// Result type for NAS layer operations
pub type NasResult<T> = Result<T, NasError>;
