//! Extraction settings, usually the `[extractor]` table of the CLI config

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits and sampling settings for one extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Content is cut to this many characters before prompting
    pub max_content_chars: usize,

    /// Upper bound on one model call, in seconds
    pub extraction_timeout_secs: u64,

    /// Sampling temperature sent to the model
    pub temperature: f32,

    /// Maximum existing tags offered as suggestions
    pub tag_hint_limit: usize,

    /// Maximum existing sub-event ids listed as taken
    pub id_hint_limit: usize,
}

impl ExtractorConfig {
    /// The model call bound as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_content_chars == 0 {
            return Err("max_content_chars must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature must be within 0.0..=2.0, got {}", self.temperature));
        }
        Ok(())
    }

    /// Parse from a TOML table
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Render as a TOML table
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_content_chars: 8_000,
            extraction_timeout_secs: 120,
            temperature: 0.1,
            tag_hint_limit: 20,
            id_hint_limit: 10,
        }
    }
}
