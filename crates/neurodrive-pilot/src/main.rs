use anyhow::Context;
use clap::Parser;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

use neurodrive_config::{load_config_or_default, validate_config};
use neurodrive_observability::{init_logging, CrateDebugFlags};
use neurodrive_pilot::app::{logging_options, run_ground, run_simulator};
use neurodrive_pilot::{Cli, Target};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = cli.config_overrides();
    let config = load_config_or_default(cli.config.as_deref(), Some(&overrides))
        .context("loading configuration")?;
    validate_config(&config)?;

    let debug_flags = CrateDebugFlags::from_names(cli.debug.iter().cloned()).with_environment();
    let _logging = init_logging(&debug_flags, &logging_options(&config.logging))?;

    info!(
        "neurodrive v{} (profile {})",
        env!("CARGO_PKG_VERSION"),
        config.cortex.profile_name
    );

    // Checked between reads of the Cortex connection
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    ctrlc::set_handler(move || {
        info!("Shutdown signal received...");
        flag.store(true, Ordering::SeqCst);
    })?;

    match cli.target {
        Target::Ground { .. } => run_ground(&config, &shutdown)?,
        Target::Sim => run_simulator(&config, &shutdown)?,
    }

    info!("neurodrive stopped");
    Ok(())
}
