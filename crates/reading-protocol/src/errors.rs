//! Protocol error types.

use thiserror::Error;

/// Result alias for payload handling.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors raised while reading or writing a payload.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Payload is not valid JSON or does not match the payload shape.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Payload was written by a newer encoder.
    #[error("Unsupported payload version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::InvalidPayload(err.to_string())
    }
}
