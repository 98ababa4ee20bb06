//! Error types for the ledgerstore workspace
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for ledgerstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the document store
#[derive(Debug, Error)]
pub enum Error {
    /// Operation attempted while the store is disconnected
    #[error("store is not connected")]
    NotConnected,

    /// Stored payload is not valid JSON, or a document failed to serialize
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Caller-supplied query or patch is malformed
    #[error("validation error: {0}")]
    Validation(String),

    /// Substrate-level failure that is not a plain I/O error
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error (file substrate operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
