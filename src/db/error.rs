//! Storage-specific error types
//!
//! This module defines all error types that can occur while reading or
//! writing the persisted tag table and feedback log.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the sled-backed local cache
//! - **`DecodeError`** / **`EncodeError`**: bincode failures in the local cache
//! - **`JsonError`**: Failures serializing the JSON data files
//! - **`IoError`**: Failures writing the JSON data files
//!
//! Missing or unparseable files are not errors: loads report them as absent.

use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Cache error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding cached data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding cached data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// JSON serialization error
    #[error("Error during serialization: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Writing a data file failed
    #[error("Failed to write {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DbError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
