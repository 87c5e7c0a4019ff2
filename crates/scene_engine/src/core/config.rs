//! # Scene Configuration
//!
//! Construction-time settings for the scene store and the logging backend.
//! Every field has a serde default, so a partial file (or an empty one) loads.
//!
//! ```toml
//! [arena]
//! capacity = 4096
//! growth = "fixed"   # or "double"
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError, ConfigFormat};
use crate::foundation::arena::{GrowthPolicy, DEFAULT_CAPACITY};

/// # Arena Configuration
///
/// Initial slot count and what happens when a requested gap does not fit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Number of slots allocated up front
    pub capacity: usize,
    /// Growth behaviour on exhaustion
    pub growth: GrowthPolicy,
}

impl ArenaConfig {
    /// Create a fixed arena configuration with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            growth: GrowthPolicy::Fixed,
        }
    }

    /// Set the growth policy
    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 && self.growth == GrowthPolicy::Fixed {
            return Err(ConfigError::Invalid(
                "a fixed arena needs a non-zero capacity".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub level: String,
}

impl LoggingConfig {
    /// Set log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// # Complete Scene Configuration
///
/// Top-level configuration loaded by applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Scene store arena settings
    pub arena: ArenaConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl SceneConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arena.validate()
    }
}

impl Config for SceneConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scene_engine_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.arena.capacity, 4096);
        assert_eq!(config.arena.growth, GrowthPolicy::Fixed);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SceneConfig = toml::from_str("[arena]\ngrowth = \"double\"\n").unwrap();
        assert_eq!(config.arena.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.arena.growth, GrowthPolicy::Double);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_zero_fixed_capacity_is_invalid() {
        let config = ArenaConfig::new(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(config.with_growth(GrowthPolicy::Double).validate().is_ok());
    }

    #[test]
    fn test_toml_file_round_trip() {
        let path = temp_path("round_trip.toml");
        let config = SceneConfig {
            arena: ArenaConfig::new(64).with_growth(GrowthPolicy::Double),
            logging: LoggingConfig::default().with_level("debug"),
        };
        config.save_to_file(&path).unwrap();
        let loaded = SceneConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_file_round_trip() {
        let path = temp_path("round_trip.ron");
        let config = SceneConfig {
            arena: ArenaConfig::new(10),
            logging: LoggingConfig::default().with_level("trace"),
        };
        config.save_to_file(&path).unwrap();
        let loaded = SceneConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = SceneConfig::default().save_to_file("scene.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
        let err = SceneConfig::load_from_file(temp_path("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
