//! Error types for content fetching

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching a source
#[derive(Error, Debug)]
pub enum FetchError {
    /// Input looked like a URL but is not one
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, String),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status {
        /// Requested URL
        url: String,
        /// Response status code
        status: u16,
    },

    /// Request exceeded the configured timeout
    #[error("Request to {0} timed out")]
    Timeout(String),

    /// Connection or protocol failure
    #[error("Network error for {url}: {message}")]
    Network {
        /// Requested URL
        url: String,
        /// Transport message
        message: String,
    },

    /// Local file does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Local file is not UTF-8 text
    #[error("File is not valid UTF-8 text: {0}")]
    NotText(PathBuf),

    /// Other filesystem error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),
}
