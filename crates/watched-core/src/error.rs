//! Cache error types.

use thiserror::Error;

/// Cache operation errors.
///
/// Backend messages are carried as-is; engines do not reinterpret them.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::Serialization(e.to_string())
    }
}
