//! Error types for station monitor services.

use thiserror::Error;

use crate::time::TimeParseError;

/// Result type alias using StationError.
pub type StationResult<T> = Result<T, StationError>;

/// Primary error type for station operations.
#[derive(Debug, Error)]
pub enum StationError {
    // === Request Errors ===
    #[error("Station not found: {0}")]
    StationNotFound(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Invalid date: {0}")]
    InvalidDate(#[from] TimeParseError),

    #[error("Date {date} is outside the archive window {first} to {last}")]
    DateOutOfRange {
        date: String,
        first: String,
        last: String,
    },

    // === Data Errors ===
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    // === Storage Errors ===
    #[error("Database error: {0}")]
    DatabaseError(String),

    // === Infrastructure Errors ===
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl StationError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            StationError::InvalidParameter { .. }
            | StationError::InvalidDate(_)
            | StationError::DateOutOfRange { .. } => 400,

            StationError::StationNotFound(_) => 404,

            StationError::DatabaseError(_) => 503,

            _ => 500,
        }
    }
}

impl From<std::io::Error> for StationError {
    fn from(err: std::io::Error) -> Self {
        StationError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for StationError {
    fn from(err: serde_json::Error) -> Self {
        StationError::InternalError(format!("JSON error: {}", err))
    }
}
