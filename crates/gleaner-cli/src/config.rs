//! Configuration management for the CLI.

use crate::cli::GlobalArgs;
use crate::error::{CliError, Result};
use gleaner_extractor::ExtractorConfig;
use gleaner_fetch::FetchConfig;
use gleaner_gatekeeper::ValidationConfig;
use gleaner_llm::{ProviderConfig, ProviderKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI configuration.
///
/// API keys never live here: providers name the environment variable that
/// holds theirs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the dataset files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Provider used for extraction
    #[serde(default = "default_provider")]
    pub active_provider: String,

    /// Named providers; the built-in kinds are always available by name
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,

    /// Model call settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// HTTP fetch settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Record rules; `--strict` raises them to the strict set
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Display settings
    #[serde(default)]
    pub settings: Settings,

    /// Model requested on the command line or via `AI_MODEL`
    #[serde(skip)]
    pub model_override: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".gleaner").join("config.toml"))
    }

    /// Load configuration from a file.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path()?, false),
        };

        if path.exists() {
            debug!("Loading configuration from {}", path.display());
            let contents = fs::read_to_string(&path)?;
            Self::from_toml(&contents)
        } else if explicit {
            Err(CliError::Config(format!("Config file {} does not exist", path.display())))
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load, apply command-line and environment overrides, and validate.
    pub fn resolve(global: &GlobalArgs) -> Result<Self> {
        let mut config = Self::load(global.config.as_deref())?;
        config.apply_overrides(global);
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides; clap has already merged flags with their environment variables.
    pub fn apply_overrides(&mut self, global: &GlobalArgs) {
        if let Some(dir) = &global.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(provider) = non_blank(global.provider.as_deref()) {
            self.active_provider = provider.to_string();
        }
        if let Some(model) = non_blank(global.model.as_deref()) {
            self.model_override = Some(model.to_string());
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))?;
        self.fetch
            .validate()
            .map_err(|e| CliError::Config(format!("[fetch] {}", e)))?;
        Ok(())
    }

    /// Settings of the active provider, with the model override applied.
    ///
    /// A configured `[providers.<name>]` table wins; otherwise the name must be
    /// one of the built-in kinds.
    pub fn active_provider_config(&self) -> Result<ProviderConfig> {
        let mut provider = match self.providers.get(&self.active_provider) {
            Some(configured) => configured.clone(),
            None => ProviderKind::parse(&self.active_provider)
                .map(ProviderConfig::preset)
                .ok_or_else(|| {
                    CliError::Config(format!(
                        "Unknown provider '{}': use github, dashscope, openai, ollama or a [providers] entry",
                        self.active_provider
                    ))
                })?,
        };
        if let Some(model) = &self.model_override {
            provider.model = Some(model.clone());
        }
        Ok(provider)
    }

    /// The data directory, which must already exist.
    pub fn existing_data_dir(&self) -> Result<&Path> {
        if self.data_dir.is_dir() {
            Ok(&self.data_dir)
        } else {
            Err(CliError::Config(format!(
                "Data directory {} does not exist",
                self.data_dir.display()
            )))
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            active_provider: default_provider(),
            providers: BTreeMap::new(),
            extractor: ExtractorConfig::default(),
            fetch: FetchConfig::default(),
            validation: ValidationConfig::default(),
            settings: Settings::default(),
            model_override: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self { color: true }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_provider() -> String {
    "github".to_string()
}

fn default_true() -> bool {
    true
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_provider, "github");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.extractor.max_content_chars, 8_000);
        assert!(config.settings.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_toml() {
        let config = Config::from_toml(
            r#"
            data_dir = "/srv/events"
            active_provider = "work"

            [providers.work]
            kind = "dashscope"
            model = "qwen-plus"
            api_key_env = "WORK_DASHSCOPE_KEY"

            [extractor]
            extraction_timeout_secs = 60

            [fetch]
            timeout_secs = 10

            [validation]
            require_tags = true

            [settings]
            color = false
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/events"));
        let provider = config.active_provider_config().unwrap();
        assert_eq!(provider.kind, ProviderKind::Dashscope);
        assert_eq!(provider.api_key_env(), Some("WORK_DASHSCOPE_KEY"));
        assert_eq!(config.extractor.extraction_timeout_secs, 60);
        assert_eq!(config.extractor.tag_hint_limit, 20);
        assert_eq!(config.fetch.timeout_secs, 10);
        assert!(config.validation.require_tags);
        assert!(!config.validation.require_description);
        assert!(!config.settings.color);
    }

    #[test]
    fn test_builtin_provider_by_name() {
        let config = Config {
            active_provider: "Ollama".to_string(),
            ..Default::default()
        };
        assert_eq!(config.active_provider_config().unwrap().kind, ProviderKind::Ollama);
    }

    #[test]
    fn test_unknown_provider() {
        let config = Config {
            active_provider: "azure".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.active_provider_config(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(&GlobalArgs {
            data_dir: Some(PathBuf::from("/tmp/d")),
            provider: Some("openai".to_string()),
            model: Some("gpt-4o".to_string()),
            ..Default::default()
        });

        assert_eq!(config.data_dir, PathBuf::from("/tmp/d"));
        let provider = config.active_provider_config().unwrap();
        assert_eq!(provider.kind, ProviderKind::Openai);
        assert_eq!(provider.model(), "gpt-4o");
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let mut config = Config::default();
        config.apply_overrides(&GlobalArgs {
            provider: Some("  ".to_string()),
            ..Default::default()
        });
        assert_eq!(config.active_provider, "github");
    }

    #[test]
    fn test_invalid_section_is_a_config_error() {
        let config = Config::from_toml("[extractor]\nmax_content_chars = 0").unwrap();
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_explicit_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "active_provider = \"ollama\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.active_provider, "ollama");
    }

    #[test]
    fn test_data_dir_must_exist() {
        let dir = TempDir::new().unwrap();
        let mut config = Config {
            data_dir: dir.path().join("missing"),
            ..Default::default()
        };
        assert!(config.existing_data_dir().is_err());

        config.data_dir = dir.path().to_path_buf();
        assert_eq!(config.existing_data_dir().unwrap(), dir.path());
    }
}
