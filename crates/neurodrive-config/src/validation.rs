//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! present, within valid ranges, and consistent with each other.

use crate::{ConfigError, ConfigResult, NeurodriveConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
    InvalidUrl { field: String, url: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
            Self::InvalidUrl { field, url } => {
                write!(
                    f,
                    "{} = '{}' must be a ws:// or wss:// URL",
                    field, url
                )
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Required credentials and profile name
/// - WebSocket URLs
/// - Threshold ranges and ordering
/// - Sensitivity values and pulse timing
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with every problem found
pub fn validate_config(config: &NeurodriveConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_required_fields(config, &mut errors);
    validate_urls(config, &mut errors);
    validate_value_ranges(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_required_fields(config: &NeurodriveConfig, errors: &mut Vec<ConfigValidationError>) {
    let required = [
        ("cortex.profile_name", &config.cortex.profile_name),
        ("cortex.client_id", &config.cortex.client_id),
        ("cortex.client_secret", &config.cortex.client_secret),
        ("ground.topic", &config.ground.topic),
        ("simulator.left_wheel_topic", &config.simulator.left_wheel_topic),
        ("simulator.right_wheel_topic", &config.simulator.right_wheel_topic),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ConfigValidationError::MissingRequired {
                field: field.to_string(),
            });
        }
    }
}

fn validate_urls(config: &NeurodriveConfig, errors: &mut Vec<ConfigValidationError>) {
    let urls = [
        ("cortex.url", &config.cortex.url),
        ("ground.rosbridge_url", &config.ground.rosbridge_url),
        ("simulator.rosbridge_url", &config.simulator.rosbridge_url),
    ];

    for (field, url) in urls {
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            errors.push(ConfigValidationError::InvalidUrl {
                field: field.to_string(),
                url: url.clone(),
            });
        }
    }
}

fn validate_value_ranges(config: &NeurodriveConfig, errors: &mut Vec<ConfigValidationError>) {
    let ground = &config.ground;

    for (field, value) in [
        ("ground.left_threshold", ground.left_threshold),
        ("ground.forward_threshold", ground.forward_threshold),
        ("simulator.power_threshold", config.simulator.power_threshold),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ConfigValidationError::InvalidValue {
                field: field.to_string(),
                reason: "must be between 0.0 and 1.0".to_string(),
            });
        }
    }

    if ground.forward_threshold >= ground.left_threshold {
        errors.push(ConfigValidationError::InvalidValue {
            field: "ground.forward_threshold".to_string(),
            reason: format!(
                "must be below ground.left_threshold ({})",
                ground.left_threshold
            ),
        });
    }

    if ground.pulse_repeats == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "ground.pulse_repeats".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if ground.pulse_interval_ms == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "ground.pulse_interval_ms".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    let values = &config.sensitivity.values;
    if values.is_empty() || values.len() > 4 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "sensitivity.values".to_string(),
            reason: format!("expected 1 to 4 values, got {}", values.len()),
        });
    }
    if values.iter().any(|v| !(1..=10).contains(v)) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "sensitivity.values".to_string(),
            reason: "each value must be between 1 and 10".to_string(),
        });
    }

    if config.cortex.read_timeout_ms == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "cortex.read_timeout_ms".to_string(),
            reason: "must be positive".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> NeurodriveConfig {
        let mut config = NeurodriveConfig::default();
        config.cortex.client_id = "client".to_string();
        config.cortex.client_secret = "secret".to_string();
        config.cortex.profile_name = "alice".to_string();
        config
    }

    #[test]
    fn test_configured_defaults_are_valid() {
        let result = validate_config(&configured());
        if let Err(e) = &result {
            eprintln!("Validation error: {}", e);
        }
        assert!(result.is_ok());
    }

    #[test]
    fn test_empty_profile_name_rejected() {
        let mut config = configured();
        config.cortex.profile_name = String::new();

        let result = validate_config(&config);
        assert!(result.is_err());

        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("cortex.profile_name"));
        }
    }

    #[test]
    fn test_all_missing_fields_reported_together() {
        let config = NeurodriveConfig::default();

        let Err(ConfigError::ValidationError(msg)) = validate_config(&config) else {
            panic!("default config without credentials must fail");
        };
        assert!(msg.contains("cortex.profile_name"));
        assert!(msg.contains("cortex.client_id"));
        assert!(msg.contains("cortex.client_secret"));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let mut config = configured();
        config.ground.left_threshold = 1.5;

        let result = validate_config(&config);
        assert!(result.is_err());

        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("ground.left_threshold"));
            assert!(msg.contains("0.0 and 1.0"));
        }
    }

    #[test]
    fn test_threshold_ordering() {
        let mut config = configured();
        config.ground.forward_threshold = 0.8;

        let result = validate_config(&config);
        assert!(result.is_err());

        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("ground.forward_threshold"));
        }
    }

    #[test]
    fn test_sensitivity_bounds() {
        let mut config = configured();
        config.sensitivity.values = vec![7, 11, 5, 5];
        assert!(validate_config(&config).is_err());

        config.sensitivity.values = vec![7, 7, 5, 5, 5];
        assert!(validate_config(&config).is_err());

        config.sensitivity.values = vec![10];
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_non_websocket_url_rejected() {
        let mut config = configured();
        config.ground.rosbridge_url = "http://localhost:9090".to_string();

        let result = validate_config(&config);
        assert!(result.is_err());

        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("ground.rosbridge_url"));
            assert!(msg.contains("ws://"));
        }
    }

    #[test]
    fn test_zero_pulse_rejected() {
        let mut config = configured();
        config.ground.pulse_repeats = 0;
        config.ground.pulse_interval_ms = 0;

        let Err(ConfigError::ValidationError(msg)) = validate_config(&config) else {
            panic!("zero pulse must fail");
        };
        assert!(msg.contains("ground.pulse_repeats"));
        assert!(msg.contains("ground.pulse_interval_ms"));
    }
}
