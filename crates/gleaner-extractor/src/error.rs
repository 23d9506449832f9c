//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Extraction timeout
    #[error("Extraction timed out after {0}s")]
    Timeout(u64),

    /// Reply is not a JSON object of the expected shape
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// A required field is absent or not a string
    #[error("Missing or invalid field '{0}' in model response")]
    MissingField(&'static str),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
