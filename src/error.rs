//! Error types for the sitemark crate

use thiserror::Error;

/// Result type for sitemark operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sitemark operations
#[derive(Debug, Error)]
pub enum Error {
    /// A selector or tag pattern in the caller's configuration is invalid
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Content extraction error
    #[error("Extract error: {0}")]
    Extract(String),

    /// I/O error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
