//! Command-line interface

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

/// Drive a robot from Emotiv mental commands
#[derive(Parser, Debug)]
#[command(
    name = "neurodrive",
    version,
    author,
    long_about = None,
    after_help = neurodrive_observability::debug_flags_help()
)]
pub struct Cli {
    /// Path to neurodrive.toml (searched for when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Trained mental-command profile to load
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Headset id (defaults to the first headset found)
    #[arg(long, global = true)]
    pub headset: Option<String>,

    /// Cortex service URL
    #[arg(long, global = true)]
    pub cortex_url: Option<String>,

    /// rosbridge server URL
    #[arg(long, global = true)]
    pub rosbridge_url: Option<String>,

    /// Enable debug logging for a crate (repeatable, or `all`)
    #[arg(long = "debug", value_name = "CRATE", global = true)]
    pub debug: Vec<String>,

    #[command(subcommand)]
    pub target: Target,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Ground robot: peak power of each gesture, Twist on a velocity topic
    Ground {
        /// Velocity topic
        #[arg(long)]
        topic: Option<String>,

        /// Publishes per turn
        #[arg(long)]
        pulse_repeats: Option<u32>,
    },
    /// Simulated e-puck: command label, per-wheel velocities
    Sim,
}

impl Cli {
    /// Overrides in the key format of `neurodrive_config::apply_cli_overrides`
    pub fn config_overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        let mut set = |key: &str, value: &Option<String>| {
            if let Some(v) = value {
                overrides.insert(key.to_string(), v.clone());
            }
        };
        set("profile", &self.profile);
        set("headset_id", &self.headset);
        set("cortex_url", &self.cortex_url);
        set("rosbridge_url", &self.rosbridge_url);

        if let Target::Ground {
            topic,
            pulse_repeats,
        } = &self.target
        {
            set("topic", topic);
            set("pulse_repeats", &pulse_repeats.map(|n| n.to_string()));
        }
        overrides
    }
}
