//! Engine configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ContentError, ContentResult};

/// Tunables for quest progress, dialogue history and content checking.
///
/// ```toml
/// default_event_amount = 1
/// history_limit = 200
/// strict_references = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Progress added by a game event that carries no amount.
    pub default_event_amount: u32,

    /// Maximum dialogue history entries a walker keeps (0 = unbounded).
    pub history_limit: usize,

    /// Reject content with dangling references instead of logging them.
    pub strict_references: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_event_amount: 1,
            history_limit: 0,
            strict_references: false,
        }
    }
}

impl EngineConfig {
    /// Parse configuration from TOML.
    pub fn from_toml_str(source: &str) -> ContentResult<Self> {
        let config: EngineConfig =
            toml::from_str(source).map_err(|e| ContentError::toml("engine config", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a TOML file.
    pub fn load(path: &Path) -> ContentResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        let config: EngineConfig = toml::from_str(&source)
            .map_err(|e| ContentError::toml(path.display().to_string(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot honour.
    pub fn validate(&self) -> ContentResult<()> {
        if self.default_event_amount == 0 {
            return Err(ContentError::InvalidConfig(
                "default_event_amount must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_event_amount, 1);
        assert_eq!(config.history_limit, 0);
        assert!(!config.strict_references);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str("history_limit = 50").unwrap();
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.default_event_amount, 1);
    }

    #[test]
    fn test_zero_event_amount_rejected() {
        let result = EngineConfig::from_toml_str("default_event_amount = 0");
        assert!(matches!(result, Err(ContentError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = EngineConfig::from_toml_str("history_limit = \"lots\"");
        assert!(matches!(result, Err(ContentError::Toml { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "strict_references = true\n").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert!(config.strict_references);

        let missing = EngineConfig::load(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ContentError::Io { .. })));
    }
}
