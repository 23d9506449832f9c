//! Store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing dataset files
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File exists but is not a list of records
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// Offending file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Dataset could not be serialized
    #[error("Failed to serialize dataset: {0}")]
    Serialize(String),
}
