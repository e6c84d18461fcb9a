//! Error types for Marquee
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for the preference layer
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("{failures} write(s) to {key:?} failed, last error: {last_error}")]
    PersistFailed {
        key: String,
        failures: usize,
        last_error: String,
    },
}

/// Result type alias for Marquee
pub type Result<T> = std::result::Result<T, StoreError>;
