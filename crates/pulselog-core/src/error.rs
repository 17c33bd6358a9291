//! Error types for pulselog.

use thiserror::Error;

/// Result type alias using pulselog's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for pulselog operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A write-path field failed its domain check
    #[error("Validation error: {0}")]
    Validation(String),

    /// Suggestion provider failure (always absorbed, never surfaced)
    #[error("Suggestion error: {0}")]
    Suggestion(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Authentication failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
