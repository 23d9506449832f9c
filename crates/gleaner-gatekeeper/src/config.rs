//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for validation rules
///
/// The default only enforces what every record needs. [`ValidationConfig::strict`]
/// additionally demands the fields a published dataset entry is expected to carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject records with an empty description
    #[serde(default)]
    pub require_description: bool,

    /// Reject records without tags
    #[serde(default)]
    pub require_tags: bool,

    /// Reject records without sub-events
    #[serde(default)]
    pub require_sub_events: bool,
}

impl ValidationConfig {
    /// Create a strict configuration (complete entries only)
    pub fn strict() -> Self {
        Self {
            require_description: true,
            require_tags: true,
            require_sub_events: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lenient() {
        let config = ValidationConfig::default();
        assert!(!config.require_description);
        assert!(!config.require_tags);
        assert!(!config.require_sub_events);
    }

    #[test]
    fn test_strict_requires_everything() {
        let config = ValidationConfig::strict();
        assert!(config.require_description && config.require_tags && config.require_sub_events);
    }
}
