//! neurodrive pilot
//!
//! Command-line parsing and the wiring that turns a [`neurodrive_config::NeurodriveConfig`]
//! into a live Cortex session driving a robot. Exposed as a library for testing.

pub mod app;
pub mod cli;

pub use app::{drive_session, run_ground, run_simulator, session_init};
pub use cli::{Cli, Target};
