//! Gleaner LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `gleaner-domain`.
//!
//! # Providers
//!
//! - `OpenAiCompatibleProvider`: any `/chat/completions` endpoint (GitHub
//!   Models, DashScope compatible mode, OpenAI)
//! - `OllamaProvider`: local Ollama chat API
//! - `MockProvider`: deterministic canned replies for tests
//!
//! `Provider` wraps all three so configuration can pick one at runtime.
//! Every provider makes exactly one request per call.
//!
//! # Examples
//!
//! ```
//! use gleaner_domain::traits::{ChatRequest, LlmProvider};
//! use gleaner_llm::MockProvider;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = MockProvider::new(r#"{"title": "RustConf"}"#);
//! let reply = provider.complete(&ChatRequest::new("system", "user")).await.unwrap();
//! assert_eq!(reply, r#"{"title": "RustConf"}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod ollama;
pub mod openai;
pub mod provider;

use async_trait::async_trait;
use gleaner_domain::traits::{ChatRequest, LlmProvider};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use ollama::OllamaProvider;
pub use openai::OpenAiCompatibleProvider;
pub use provider::{Provider, ProviderConfig, ProviderKind};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Credential environment variable not set
    #[error("Missing credential for provider '{provider}': set {env_var}")]
    MissingCredential {
        /// Provider name
        provider: String,
        /// Environment variable that should hold the key
        env_var: String,
    },

    /// Request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Map a transport failure from reqwest
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout(e.to_string())
        } else {
            LlmError::Communication(format!("Request failed: {}", e))
        }
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Error(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns canned replies without any network calls. A rule matches when its
/// needle occurs in the request's user prompt; rules are tried in the order
/// they were added, and the default reply is used when none match.
///
/// # Examples
///
/// ```
/// use gleaner_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("pycon", r#"{"title": "PyCon US"}"#);
/// provider.add_error("broken");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    rules: Arc<Mutex<Vec<(String, Reply)>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<ChatRequest>>>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed reply for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            rules: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
            delay: None,
        }
    }

    /// Reply with `response` when the user prompt contains `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        lock(&self.rules).push((needle.into(), Reply::Text(response.into())));
    }

    /// Fail when the user prompt contains `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        lock(&self.rules).push((needle.into(), Reply::Error("Mock error".to_string())));
    }

    /// Sleep before every reply
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<ChatRequest> {
        lock(&self.last_request).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn complete(&self, request: &ChatRequest) -> Result<String, Self::Error> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_request) = Some(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let matched = lock(&self.rules)
            .iter()
            .find(|(needle, _)| request.user.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone());

        match matched {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Error(message)) => Err(LlmError::Other(message)),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
