// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neurodrive configuration
//!
//! Settings for the Cortex connection, the mental-command sensitivity and
//! both robot targets, read from `neurodrive.toml`. Values are layered:
//! file, then `NEURODRIVE_*` environment variables, then command-line
//! overrides. [`validate_config`] reports every problem at once.
//!
//! ```rust,no_run
//! use neurodrive_config::{load_config_or_default, validate_config};
//!
//! let config = load_config_or_default(None, None)?;
//! validate_config(&config)?;
//! println!("{} as {}", config.cortex.url, config.cortex.profile_name);
//! # Ok::<(), neurodrive_config::ConfigError>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    load_config_or_default, CONFIG_FILE_NAME,
};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No `neurodrive.toml` in any searched location
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    ParseError(String),

    /// One line per problem
    #[error("{0}")]
    ValidationError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keep_tuned_constants() {
        let config = NeurodriveConfig::default();
        assert_eq!(config.ground.left_threshold, 0.7);
        assert_eq!(config.ground.forward_threshold, 0.3);
        assert_eq!(config.ground.pulse_repeats, 30);
        assert_eq!(config.ground.pulse_interval_ms, 50);
        assert_eq!(config.sensitivity.values, vec![7, 7, 5, 5]);
        assert_eq!(config.simulator.power_threshold, 0.7);
    }
}
