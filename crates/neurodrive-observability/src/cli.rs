//! Per-crate debug flags
//!
//! Supports `--debug <crate>` values collected by the CLI and the
//! `NEURODRIVE_DEBUG` environment variable.

use std::collections::HashMap;
use std::env;

use crate::{crate_target, KNOWN_CRATES};

/// Set of crates with debug logging enabled
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
}

impl CrateDebugFlags {
    /// Build flags from bare crate names (`all` enables every known crate)
    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for name in names {
            flags.enable(&name);
        }
        flags
    }

    fn enable(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if name == "all" {
            for crate_name in KNOWN_CRATES {
                self.enabled_crates.insert(crate_name.to_string(), true);
            }
        } else {
            self.enabled_crates.insert(name.to_string(), true);
        }
    }

    /// Also enable crates listed in `NEURODRIVE_DEBUG` (comma-separated or `all`)
    pub fn with_environment(mut self) -> Self {
        if let Ok(env_var) = env::var("NEURODRIVE_DEBUG") {
            for crate_name in env_var.split(',') {
                self.enable(crate_name);
            }
        }
        self
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains_key(crate_name)
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Create a tracing filter from debug flags
    ///
    /// Returns a filter string usable with `EnvFilter`, e.g.
    /// `neurodrive_cortex=debug,info`. `base_level` applies to everything else.
    pub fn to_filter_string(&self, base_level: &str) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates
            .keys()
            .map(|crate_name| format!("{}=debug", crate_target(crate_name)))
            .collect();
        filters.sort();
        filters.push(base_level.to_string());
        filters.join(",")
    }
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug all                    Enable debug logging for all crates
  --debug {{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  NEURODRIVE_DEBUG={{crate-name}}[,{{crate-name}}]
  NEURODRIVE_DEBUG=all
"#,
        KNOWN_CRATES.join(", ")
    )
}
