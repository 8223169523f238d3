//! Configuration loading for the unit allocator.

use serde::{Deserialize, Serialize};
use std::path::Path;

use game_events::UnitType;

/// Unit allocator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommanderConfig {
    /// Distance at which a new unit counts as already at the rally point
    pub rally_arrival_distance: f32,
    /// Designated early-game scout unit type
    pub scout_unit_type: UnitType,
}

impl Default for CommanderConfig {
    fn default() -> Self {
        Self {
            rally_arrival_distance: 5.0,
            scout_unit_type: UnitType::Reaper,
        }
    }
}

impl CommanderConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::TomlError)
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file
    IoError(std::io::Error),
    /// Error parsing TOML config
    TomlError(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::TomlError(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CommanderConfig::default();

        assert_eq!(config.rally_arrival_distance, 5.0);
        assert_eq!(config.scout_unit_type, UnitType::Reaper);
    }

    #[test]
    fn test_parse_config_from_toml() {
        let toml = r#"
            rally_arrival_distance = 8.0
            scout_unit_type = "marine"
        "#;

        let config = CommanderConfig::from_str(toml).unwrap();

        assert_eq!(config.rally_arrival_distance, 8.0);
        assert_eq!(config.scout_unit_type, UnitType::Marine);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = CommanderConfig::from_str("rally_arrival_distance = 3.0").unwrap();

        assert_eq!(config.rally_arrival_distance, 3.0);
        assert_eq!(config.scout_unit_type, UnitType::Reaper);
    }
}
