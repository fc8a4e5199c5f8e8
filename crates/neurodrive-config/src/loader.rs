// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, NeurodriveConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name searched for by [`find_config_file`]
pub const CONFIG_FILE_NAME: &str = "neurodrive.toml";

/// Find the neurodrive configuration file
///
/// Search order:
/// 1. `NEURODRIVE_CONFIG_PATH` environment variable
/// 2. Current working directory: `./neurodrive.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("NEURODRIVE_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by NEURODRIVE_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Configuration file '{}' not found in any of these locations:\n{}\n\nSet NEURODRIVE_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML.
/// Validation is a separate step, see [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeurodriveConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: NeurodriveConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Like [`load_config`], but falls back to built-in defaults when no file
/// is given and none is found by searching.
///
/// An explicitly given path that cannot be read is still an error.
pub fn load_config_or_default(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeurodriveConfig> {
    match load_config(config_path, cli_args) {
        Err(ConfigError::FileNotFound(_)) if config_path.is_none() => {
            let mut config = NeurodriveConfig::default();
            apply_environment_overrides(&mut config);
            if let Some(cli) = cli_args {
                apply_cli_overrides(&mut config, cli);
            }
            Ok(config)
        }
        other => other,
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NEURODRIVE_CORTEX_URL` -> `cortex.url`
/// - `NEURODRIVE_CLIENT_ID` -> `cortex.client_id`
/// - `NEURODRIVE_CLIENT_SECRET` -> `cortex.client_secret`
/// - `NEURODRIVE_LICENSE` -> `cortex.license`
/// - `NEURODRIVE_PROFILE` -> `cortex.profile_name`
/// - `NEURODRIVE_HEADSET_ID` -> `cortex.headset_id`
/// - `NEURODRIVE_ROSBRIDGE_URL` -> `ground.rosbridge_url` and `simulator.rosbridge_url`
/// - `NEURODRIVE_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut NeurodriveConfig) {
    if let Ok(value) = env::var("NEURODRIVE_CORTEX_URL") {
        config.cortex.url = value;
    }
    if let Ok(value) = env::var("NEURODRIVE_CLIENT_ID") {
        config.cortex.client_id = value;
    }
    if let Ok(value) = env::var("NEURODRIVE_CLIENT_SECRET") {
        config.cortex.client_secret = value;
    }
    if let Ok(value) = env::var("NEURODRIVE_LICENSE") {
        config.cortex.license = value;
    }
    if let Ok(value) = env::var("NEURODRIVE_PROFILE") {
        config.cortex.profile_name = value;
    }
    if let Ok(value) = env::var("NEURODRIVE_HEADSET_ID") {
        config.cortex.headset_id = value;
    }

    if let Ok(value) = env::var("NEURODRIVE_ROSBRIDGE_URL") {
        config.ground.rosbridge_url = value.clone();
        config.simulator.rosbridge_url = value;
    }

    if let Ok(value) = env::var("NEURODRIVE_LOG_LEVEL") {
        config.logging.level = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"profile": "alice", "headset_id": "INSIGHT-1234"}`)
pub fn apply_cli_overrides(config: &mut NeurodriveConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("cortex_url") {
        config.cortex.url = value.clone();
    }
    if let Some(value) = cli_args.get("profile") {
        config.cortex.profile_name = value.clone();
    }
    if let Some(value) = cli_args.get("headset_id") {
        config.cortex.headset_id = value.clone();
    }

    if let Some(value) = cli_args.get("rosbridge_url") {
        config.ground.rosbridge_url = value.clone();
        config.simulator.rosbridge_url = value.clone();
    }
    if let Some(value) = cli_args.get("topic") {
        config.ground.topic = value.clone();
    }
    if let Some(value) = cli_args.get("pulse_repeats") {
        if let Ok(repeats) = value.parse::<u32>() {
            config.ground.pulse_repeats = repeats;
        }
    }

    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
}
