//! Logging option types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    Text,
    Json,
}

/// Options for [`crate::init_logging`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingOptions {
    /// Base level for crates without a debug flag (trace, debug, info, warn, error)
    pub level: String,

    /// Console format
    pub console_format: LogFormat,

    /// Base directory for run logs; `None` disables file logging
    pub log_dir: Option<PathBuf>,

    /// Remove run folders older than this many days
    pub retention_days: u64,

    /// Keep at most this many run folders
    pub retention_runs: usize,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        LoggingOptions {
            level: "info".to_string(),
            console_format: LogFormat::Text,
            log_dir: None,
            retention_days: 30,
            retention_runs: 10,
        }
    }
}
