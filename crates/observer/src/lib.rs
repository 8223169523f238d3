//! Spectator camera director.
//!
//! The observer watches the per-tick frame snapshot and decides where the
//! spectator camera should point. Competing triggers are ranked on a
//! fixed urgency ladder, a hysteresis gate keeps the camera from
//! flapping between targets, and exponential smoothing turns accepted
//! retargets into steady pans.
//!
//! # Modules
//!
//! - [`camera`]: Priority ladder, hysteresis gate, and smoothing
//! - [`config`]: TOML-backed camera settings

pub mod camera;
pub mod config;

// Re-export camera types
pub use camera::{CameraDirector, CameraMove, Focus, Priority};

// Re-export config types
pub use config::{default_config_toml, CameraConfig, ConfigError, TomlSerializeError};
