// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `neurodrive.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NeurodriveConfig {
    pub cortex: CortexConfig,
    pub sensitivity: SensitivityConfig,
    pub ground: GroundRobotConfig,
    pub simulator: SimulatorConfig,
    pub logging: LoggingConfig,
}

/// Emotiv Cortex service connection and credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CortexConfig {
    pub url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Empty means the license attached to the account
    pub license: String,
    pub debit: u32,
    /// Empty means the first headset reported by the service
    pub headset_id: String,
    pub profile_name: String,
    /// Cortex serves a self-signed certificate on localhost
    pub accept_invalid_certs: bool,
    pub read_timeout_ms: u64,
}

impl Default for CortexConfig {
    fn default() -> Self {
        Self {
            url: "wss://localhost:6868".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            license: String::new(),
            debit: 10,
            headset_id: String::new(),
            profile_name: String::new(),
            accept_invalid_certs: true,
            read_timeout_ms: 200,
        }
    }
}

/// Mental-command sensitivity applied to the active actions before streaming.
///
/// Values range 1 (lowest) to 10 (highest), in the order of the active
/// actions reported by the service. Neutral is not included.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SensitivityConfig {
    pub values: Vec<u32>,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            values: vec![7, 7, 5, 5],
        }
    }
}

/// Real ground robot driven over a `geometry_msgs/Twist` topic
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GroundRobotConfig {
    pub rosbridge_url: String,
    pub topic: String,
    pub linear_speed: f64,
    pub angular_speed: f64,
    /// Peak above this turns left
    pub left_threshold: f64,
    /// Peak below this moves forward
    pub forward_threshold: f64,
    pub pulse_repeats: u32,
    pub pulse_interval_ms: u64,
}

impl Default for GroundRobotConfig {
    fn default() -> Self {
        Self {
            rosbridge_url: "ws://localhost:9090".to_string(),
            topic: "cmd_vel".to_string(),
            linear_speed: 0.2,
            angular_speed: 1.0,
            left_threshold: 0.7,
            forward_threshold: 0.3,
            pulse_repeats: 30,
            pulse_interval_ms: 50,
        }
    }
}

/// Simulated two-wheeled robot driven by per-wheel velocities
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub rosbridge_url: String,
    pub left_wheel_topic: String,
    pub right_wheel_topic: String,
    pub wheel_speed: f64,
    /// `left` samples at or above this power turn right instead
    pub power_threshold: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            rosbridge_url: "ws://localhost:9090".to_string(),
            left_wheel_topic: "/e_puck/left_wheel_motor/set_velocity".to_string(),
            right_wheel_topic: "/e_puck/right_wheel_motor/set_velocity".to_string(),
            wheel_speed: 3.0,
            power_threshold: 0.7,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub log_dir: Option<PathBuf>,
    pub retention_days: u64,
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            retention_days: 30,
            retention_runs: 10,
        }
    }
}
