//! Error types for the extract module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for content extraction
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A selector in the policy does not parse as CSS
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector {
        /// The offending selector text
        selector: String,
        /// Parser message
        reason: String,
    },

    /// A wildcard tag pattern is not a valid regular expression
    #[error("Invalid tag pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Writing the document back out failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] std::io::Error),

    /// The serialized document was not valid UTF-8
    #[error("Serialized HTML is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<ExtractError> for CrateError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Serialize(e) => CrateError::Io(e),
            ExtractError::InvalidSelector { .. } | ExtractError::InvalidPattern(_) => {
                CrateError::Config(err.to_string())
            }
            _ => CrateError::Extract(err.to_string()),
        }
    }
}
