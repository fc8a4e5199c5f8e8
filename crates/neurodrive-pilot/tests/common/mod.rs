//! Common test utilities and helpers

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write a complete `neurodrive.toml` into `dir`
pub fn write_config(dir: &TempDir, extra: &str) -> PathBuf {
    let path = dir.path().join("neurodrive.toml");
    let content = format!(
        r#"
[cortex]
client_id = "client"
client_secret = "secret"
profile_name = "alice"
read_timeout_ms = 100

[ground]
rosbridge_url = "ws://hunter.local:9090"
pulse_repeats = 20
pulse_interval_ms = 40

{}
"#,
        extra
    );
    fs::write(&path, content).expect("Failed to write config");
    path
}
