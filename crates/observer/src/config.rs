//! Configuration loading for the camera director.
//!
//! All camera settings are loaded from a TOML configuration file.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Camera director configuration.
///
/// Intervals are in simulation ticks, distances in game units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Full dwell time before any retarget is accepted
    pub move_interval_ticks: u64,
    /// Minimum dwell time before a more urgent retarget is accepted
    pub min_move_interval_ticks: u64,
    /// Last tick of the early-match window for watching scouting workers
    pub watch_scout_worker_until_tick: u64,
    /// Per-tick exponential interpolation factor toward the focus target
    pub smoothing_factor: f32,
    /// Radius used when counting nearby army units for the cluster rule
    pub army_cluster_radius: f32,
    /// Distance within which a unit counts as "near" a start location
    pub near_base_distance: f32,
    /// Maximum distance between a starting structure and its matched
    /// start-location candidate
    pub start_location_tolerance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            move_interval_ticks: 150,
            min_move_interval_ticks: 50,
            watch_scout_worker_until_tick: 7500,
            smoothing_factor: 0.1,
            army_cluster_radius: 50.0,
            near_base_distance: 100.0,
            start_location_tolerance: 20.0,
        }
    }
}

impl CameraConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::TomlError)
    }

    /// Serializes this configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, TomlSerializeError> {
        toml::to_string_pretty(self).map_err(TomlSerializeError)
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

/// Error that can occur during TOML serialization.
#[derive(Debug)]
pub struct TomlSerializeError(pub toml::ser::Error);

impl std::fmt::Display for TomlSerializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TOML serialize error: {}", self.0)
    }
}

impl std::error::Error for TomlSerializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Camera Director Configuration

move_interval_ticks = 150
min_move_interval_ticks = 50
watch_scout_worker_until_tick = 7500
smoothing_factor = 0.1
army_cluster_radius = 50.0
near_base_distance = 100.0
start_location_tolerance = 20.0
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CameraConfig::default();

        assert_eq!(config.move_interval_ticks, 150);
        assert_eq!(config.min_move_interval_ticks, 50);
        assert_eq!(config.watch_scout_worker_until_tick, 7500);
        assert_eq!(config.smoothing_factor, 0.1);
    }

    #[test]
    fn test_parse_config_from_toml() {
        let toml = r#"
            move_interval_ticks = 300
            smoothing_factor = 0.2
        "#;

        let config = CameraConfig::from_str(toml).unwrap();

        assert_eq!(config.move_interval_ticks, 300);
        assert_eq!(config.smoothing_factor, 0.2);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = "min_move_interval_ticks = 25";

        let config = CameraConfig::from_str(toml).unwrap();

        // Specified value
        assert_eq!(config.min_move_interval_ticks, 25);
        // Default values
        assert_eq!(config.move_interval_ticks, 150);
        assert_eq!(config.army_cluster_radius, 50.0);
    }

    #[test]
    fn test_default_config_toml_parses() {
        let toml = default_config_toml();
        let config = CameraConfig::from_str(&toml).unwrap();

        assert_eq!(config.move_interval_ticks, 150);
        assert_eq!(config.near_base_distance, 100.0);
    }

    #[test]
    fn test_config_to_toml_round_trip() {
        let config = CameraConfig::default();
        let toml = config.to_toml().unwrap();
        let parsed = CameraConfig::from_str(&toml).unwrap();

        assert_eq!(parsed.move_interval_ticks, config.move_interval_ticks);
        assert_eq!(parsed.smoothing_factor, config.smoothing_factor);
    }
}
