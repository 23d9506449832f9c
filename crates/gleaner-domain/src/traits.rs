//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use async_trait::async_trait;

/// A single chat-style inference request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// System instruction (schema and rules)
    pub system: String,

    /// User input (the fetched content)
    pub user: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Ask the backend to return a JSON object
    pub json_mode: bool,
}

impl ChatRequest {
    /// Create a request with JSON output and a low temperature
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: 0.1,
            json_mode: true,
        }
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Trait for model inference backends
///
/// Implemented by the infrastructure layer (gleaner-llm). One call, one
/// result: implementations must not retry.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for provider operations
    type Error: std::fmt::Display + Send + Sync + 'static;

    /// Send one request and return the raw text of the reply
    async fn complete(&self, request: &ChatRequest) -> Result<String, Self::Error>;

    /// Model identifier, for logs and reports
    fn model_name(&self) -> &str;
}
