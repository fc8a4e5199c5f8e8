// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output always; optionally a JSON run log with rotation and
//! retention of previous runs.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::path::{Path, PathBuf};
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingOptions};

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Logging initialization result
///
/// Dropping the guard flushes and closes the run log.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder of this process, if file logging is enabled
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Initialize logging with console output and an optional run log
///
/// With `options.log_dir` set, creates:
/// ```text
/// <log_dir>/
///   └── run_20250101_120000/
///       └── neurodrive.log
/// ```
pub fn init_logging(debug_flags: &CrateDebugFlags, options: &LoggingOptions) -> Result<LoggingGuard> {
    let filter = debug_flags.to_filter_string(&options.level);
    let env_filter = EnvFilter::try_new(&filter)
        .with_context(|| format!("Invalid log filter: {}", filter))?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let console_layer = match options.console_format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_filter(env_filter.clone())
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_filter(env_filter.clone())
            .boxed(),
    };
    layers.push(console_layer);

    let mut file_guard = None;
    let mut run_folder = None;

    if let Some(base_log_dir) = &options.log_dir {
        let timestamp = Utc::now().format(RUN_TIMESTAMP_FORMAT);
        let folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
        std::fs::create_dir_all(&folder)
            .with_context(|| format!("Failed to create log directory: {}", folder.display()))?;

        cleanup_old_logs(base_log_dir, options.retention_days, options.retention_runs)?;

        let file_appender = rolling::daily(&folder, "neurodrive.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(env_filter)
            .boxed();
        layers.push(file_layer);

        file_guard = Some(guard);
        run_folder = Some(folder);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .context("Global tracing subscriber already installed")?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
        log_dir: run_folder,
    })
}

fn parse_run_timestamp(dir_name: &str) -> Option<DateTime<Utc>> {
    let timestamp_str = dir_name.strip_prefix(RUN_PREFIX)?;
    NaiveDateTime::parse_from_str(timestamp_str, RUN_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Clean up old run folders based on retention policy
///
/// Removes runs older than `retention_days`, then the oldest remaining runs
/// until at most `retention_runs` are left.
pub fn cleanup_old_logs(base_log_dir: &Path, retention_days: u64, retention_runs: usize) -> Result<()> {
    if !base_log_dir.exists() {
        return Ok(());
    }

    let cutoff_date = Utc::now() - chrono::Duration::days(retention_days as i64);

    let mut runs: Vec<(PathBuf, DateTime<Utc>)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let parsed = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_run_timestamp);
        if let Some(dt) = parsed {
            runs.push((path, dt));
        }
    }

    // Oldest first
    runs.sort_by_key(|(_, dt)| *dt);

    let (expired, mut kept): (Vec<_>, Vec<_>) =
        runs.into_iter().partition(|(_, dt)| *dt < cutoff_date);

    let excess = kept.len().saturating_sub(retention_runs);
    let surplus: Vec<_> = kept.drain(..excess).collect();

    for (path, _) in expired.iter().chain(surplus.iter()) {
        if let Err(e) = std::fs::remove_dir_all(path) {
            eprintln!(
                "Warning: Failed to remove old log directory {}: {}",
                path.display(),
                e
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_run(base: &Path, when: DateTime<Utc>) -> PathBuf {
        let path = base.join(format!("{}{}", RUN_PREFIX, when.format(RUN_TIMESTAMP_FORMAT)));
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn test_parse_run_timestamp() {
        let dt = parse_run_timestamp("run_20250101_120000").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2025-01-01 12:00:00");
        assert!(parse_run_timestamp("other_20250101_120000").is_none());
        assert!(parse_run_timestamp("run_garbage").is_none());
    }

    #[test]
    fn test_cleanup_removes_expired_runs() {
        let dir = tempdir().unwrap();
        let now = Utc::now();
        let old = make_run(dir.path(), now - chrono::Duration::days(40));
        let recent = make_run(dir.path(), now - chrono::Duration::days(1));

        cleanup_old_logs(dir.path(), 30, 10).unwrap();

        assert!(!old.exists());
        assert!(recent.exists());
    }

    #[test]
    fn test_cleanup_keeps_most_recent_runs() {
        let dir = tempdir().unwrap();
        let now = Utc::now();
        let runs: Vec<PathBuf> = (1..=4)
            .map(|hours| make_run(dir.path(), now - chrono::Duration::hours(hours)))
            .collect();

        cleanup_old_logs(dir.path(), 30, 2).unwrap();

        // runs[0] is the newest
        assert!(runs[0].exists());
        assert!(runs[1].exists());
        assert!(!runs[2].exists());
        assert!(!runs[3].exists());
    }

    #[test]
    fn test_cleanup_ignores_unrelated_directories() {
        let dir = tempdir().unwrap();
        let unrelated = dir.path().join("notes");
        std::fs::create_dir_all(&unrelated).unwrap();

        cleanup_old_logs(dir.path(), 0, 0).unwrap();

        assert!(unrelated.exists());
    }
}
