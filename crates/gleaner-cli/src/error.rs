//! Error types for the CLI application.

use gleaner_extractor::PipelineError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A pipeline stage failed
    #[error("{} stage failed: {}", .0.stage(), .0)]
    Pipeline(#[from] PipelineError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Terminal input error
    #[error("Input error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Stage name for machine-readable reports
    ///
    /// Everything that happens before the pipeline starts counts as `config`.
    pub fn stage(&self) -> &'static str {
        match self {
            CliError::Pipeline(e) => e.stage(),
            _ => "config",
        }
    }
}

impl From<gleaner_fetch::FetchError> for CliError {
    fn from(e: gleaner_fetch::FetchError) -> Self {
        CliError::Pipeline(PipelineError::Fetch(e))
    }
}

impl From<gleaner_store::StoreError> for CliError {
    fn from(e: gleaner_store::StoreError) -> Self {
        CliError::Pipeline(PipelineError::Store(e))
    }
}

impl From<gleaner_llm::LlmError> for CliError {
    fn from(e: gleaner_llm::LlmError) -> Self {
        CliError::Config(e.to_string())
    }
}
