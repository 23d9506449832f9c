//! Provider selection from configuration
//!
//! Credentials are only ever read from environment variables, never from
//! configuration files.

use crate::ollama::{OllamaProvider, DEFAULT_ENDPOINT as OLLAMA_ENDPOINT};
use crate::openai::OpenAiCompatibleProvider;
use crate::LlmError;
use async_trait::async_trait;
use gleaner_domain::traits::{ChatRequest, LlmProvider};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Default model for hosted providers
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default model for a local Ollama
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1";

/// Backend family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// GitHub Models (OpenAI-compatible)
    Github,
    /// Alibaba DashScope compatible mode
    Dashscope,
    /// OpenAI
    Openai,
    /// Local Ollama
    Ollama,
}

impl ProviderKind {
    /// Every kind, in preset order
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Github,
        ProviderKind::Dashscope,
        ProviderKind::Openai,
        ProviderKind::Ollama,
    ];

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Github => "github",
            ProviderKind::Dashscope => "dashscope",
            ProviderKind::Openai => "openai",
            ProviderKind::Ollama => "ollama",
        }
    }

    /// Parse a kind name, ignoring case
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Github => "https://models.inference.ai.azure.com",
            ProviderKind::Dashscope => "https://dashscope.aliyuncs.com/compatible-mode/v1",
            ProviderKind::Openai => "https://api.openai.com/v1",
            ProviderKind::Ollama => OLLAMA_ENDPOINT,
        }
    }

    fn base_url_env(&self) -> Option<&'static str> {
        match self {
            ProviderKind::Dashscope => Some("DASHSCOPE_BASE_URL"),
            _ => None,
        }
    }

    fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderKind::Github => Some("GITHUB_TOKEN"),
            ProviderKind::Dashscope => Some("DASHSCOPE_API_KEY"),
            ProviderKind::Openai => Some("OPENAI_API_KEY"),
            ProviderKind::Ollama => None,
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => DEFAULT_OLLAMA_MODEL,
            _ => DEFAULT_MODEL,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `[providers.<name>]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Backend family
    pub kind: ProviderKind,

    /// Endpoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Model override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Name of the environment variable holding the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

impl ProviderConfig {
    /// Built-in settings for a kind
    pub fn preset(kind: ProviderKind) -> Self {
        Self {
            kind,
            base_url: None,
            model: None,
            api_key_env: None,
        }
    }

    /// Model that will be requested
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or_else(|| self.kind.default_model())
    }

    /// Environment variable consulted for the API key, if the kind needs one
    pub fn api_key_env(&self) -> Option<&str> {
        self.api_key_env.as_deref().or_else(|| self.kind.default_api_key_env())
    }

    /// Endpoint: explicit setting, then the kind's environment override, then the preset
    pub fn base_url(&self, env: impl Fn(&str) -> Option<String>) -> String {
        if let Some(url) = &self.base_url {
            return url.clone();
        }
        self.kind
            .base_url_env()
            .and_then(|var| non_empty(env(var)))
            .unwrap_or_else(|| self.kind.default_base_url().to_string())
    }
}

/// A configured backend, selected at runtime
#[derive(Debug, Clone)]
pub enum Provider {
    /// Hosted OpenAI-compatible endpoint
    OpenAi(OpenAiCompatibleProvider),
    /// Local Ollama
    Ollama(OllamaProvider),
}

impl Provider {
    /// Build a provider, reading credentials from the process environment
    pub fn from_config(name: &str, config: &ProviderConfig) -> Result<Self, LlmError> {
        Self::from_config_with(name, config, |var| std::env::var(var).ok())
    }

    /// Build a provider with an explicit environment lookup
    pub fn from_config_with(
        name: &str,
        config: &ProviderConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, LlmError> {
        let base_url = config.base_url(&env);
        let model = config.model().to_string();

        let provider = match config.kind {
            ProviderKind::Ollama => Provider::Ollama(OllamaProvider::new(base_url.clone(), model)?),
            _ => {
                let env_var = config.api_key_env().unwrap_or_default();
                let api_key = non_empty(env(env_var)).ok_or_else(|| LlmError::MissingCredential {
                    provider: name.to_string(),
                    env_var: env_var.to_string(),
                })?;
                Provider::OpenAi(OpenAiCompatibleProvider::new(base_url.clone(), api_key, model)?)
            }
        };

        info!(
            provider = name,
            kind = %config.kind,
            model = provider.model_name(),
            base_url = %base_url,
            "Using model provider"
        );
        Ok(provider)
    }
}

#[async_trait]
impl LlmProvider for Provider {
    type Error = LlmError;

    async fn complete(&self, request: &ChatRequest) -> Result<String, Self::Error> {
        match self {
            Provider::OpenAi(provider) => provider.complete(request).await,
            Provider::Ollama(provider) => provider.complete(request).await,
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Provider::OpenAi(provider) => provider.model_name(),
            Provider::Ollama(provider) => provider.model_name(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(ProviderKind::parse("GitHub"), Some(ProviderKind::Github));
        assert_eq!(ProviderKind::parse(" ollama "), Some(ProviderKind::Ollama));
        assert_eq!(ProviderKind::parse("azure"), None);
    }

    #[test]
    fn test_presets() {
        let github = ProviderConfig::preset(ProviderKind::Github);
        assert_eq!(github.base_url(env(&[])), "https://models.inference.ai.azure.com");
        assert_eq!(github.api_key_env(), Some("GITHUB_TOKEN"));
        assert_eq!(github.model(), "gpt-4o-mini");

        let ollama = ProviderConfig::preset(ProviderKind::Ollama);
        assert_eq!(ollama.api_key_env(), None);
        assert_eq!(ollama.model(), DEFAULT_OLLAMA_MODEL);
    }

    #[test]
    fn test_dashscope_base_url_from_env() {
        let config = ProviderConfig::preset(ProviderKind::Dashscope);
        assert_eq!(
            config.base_url(env(&[("DASHSCOPE_BASE_URL", "https://dashscope-intl.example/v1")])),
            "https://dashscope-intl.example/v1"
        );
        assert_eq!(
            config.base_url(env(&[("DASHSCOPE_BASE_URL", "")])),
            "https://dashscope.aliyuncs.com/compatible-mode/v1"
        );
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let config = ProviderConfig {
            base_url: Some("http://proxy.local/v1".to_string()),
            ..ProviderConfig::preset(ProviderKind::Dashscope)
        };
        assert_eq!(
            config.base_url(env(&[("DASHSCOPE_BASE_URL", "https://ignored")])),
            "http://proxy.local/v1"
        );
    }

    #[test]
    fn test_missing_credential() {
        let config = ProviderConfig::preset(ProviderKind::Github);
        let err = Provider::from_config_with("github", &config, env(&[])).unwrap_err();
        match err {
            LlmError::MissingCredential { provider, env_var } => {
                assert_eq!(provider, "github");
                assert_eq!(env_var, "GITHUB_TOKEN");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_credential_is_missing() {
        let config = ProviderConfig::preset(ProviderKind::Openai);
        let result =
            Provider::from_config_with("openai", &config, env(&[("OPENAI_API_KEY", "  ")]));
        assert!(matches!(result, Err(LlmError::MissingCredential { .. })));
    }

    #[test]
    fn test_custom_key_variable() {
        let config = ProviderConfig {
            api_key_env: Some("MY_KEY".to_string()),
            model: Some("qwen-plus".to_string()),
            ..ProviderConfig::preset(ProviderKind::Dashscope)
        };
        let provider =
            Provider::from_config_with("work", &config, env(&[("MY_KEY", "secret")])).unwrap();
        assert!(matches!(provider, Provider::OpenAi(_)));
        assert_eq!(provider.model_name(), "qwen-plus");
    }

    #[test]
    fn test_ollama_needs_no_credential() {
        let config = ProviderConfig::preset(ProviderKind::Ollama);
        let provider = Provider::from_config_with("local", &config, env(&[])).unwrap();
        assert!(matches!(provider, Provider::Ollama(_)));
    }

    #[test]
    fn test_provider_config_from_toml() {
        let config: ProviderConfig = toml::from_str(
            r#"
            kind = "dashscope"
            model = "qwen-max"
            "#,
        )
        .unwrap();
        assert_eq!(config.kind, ProviderKind::Dashscope);
        assert_eq!(config.model(), "qwen-max");
        assert!(config.base_url.is_none());
    }
}
