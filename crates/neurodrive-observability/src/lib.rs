// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neurodrive-observability
//!
//! Logging infrastructure shared by the neurodrive crates, with per-crate
//! debug flag support.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known neurodrive crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "neurodrive-config",
    "neurodrive-cortex",
    "neurodrive-motion",
    "neurodrive-pilot",
];

/// Convert a crate name to the tracing target of its library
/// (`neurodrive-cortex` logs under `neurodrive_cortex`).
pub fn crate_target(crate_name: &str) -> String {
    crate_name.replace('-', "_")
}
