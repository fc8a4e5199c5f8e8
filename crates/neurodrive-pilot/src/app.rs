//! Wiring from configuration to a running pilot.

use std::sync::atomic::AtomicBool;
use std::time::Duration;

use anyhow::{Context, Result};
use neurodrive_config::{
    CortexConfig, GroundRobotConfig, LoggingConfig, NeurodriveConfig, SimulatorConfig,
};
use neurodrive_cortex::{
    ConnectionOptions, CortexClient, CortexConnection, CortexListener, CortexSession,
    LiveSession, SessionCredentials, SessionInit,
};
use neurodrive_motion::{
    GroundRobotPilot, LabelMotionMapper, PeakThresholdSelector, PeakThresholds, PulsePlan,
    RosbridgeClient, RosbridgeSocket, RosbridgeTwistPublisher, RosbridgeWheelDriver,
    SimulatedRobotPilot, TimedPulse, TwistProfile, WheelProfile,
};
use neurodrive_observability::{LogFormat, LoggingOptions};
use tracing::{info, warn};

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn session_init(config: &NeurodriveConfig) -> SessionInit {
    let cortex = &config.cortex;
    SessionInit {
        credentials: SessionCredentials {
            client_id: cortex.client_id.clone(),
            client_secret: cortex.client_secret.clone(),
            license: non_empty(&cortex.license),
            debit: cortex.debit,
        },
        wanted_headset: non_empty(&cortex.headset_id),
        wanted_profile: cortex.profile_name.clone(),
    }
}

pub fn connection_options(cortex: &CortexConfig) -> ConnectionOptions {
    ConnectionOptions {
        url: cortex.url.clone(),
        accept_invalid_certs: cortex.accept_invalid_certs,
        read_timeout: Duration::from_millis(cortex.read_timeout_ms),
    }
}

pub fn peak_selector(ground: &GroundRobotConfig) -> PeakThresholdSelector {
    PeakThresholdSelector::new(PeakThresholds {
        left: ground.left_threshold,
        forward: ground.forward_threshold,
    })
}

pub fn twist_profile(ground: &GroundRobotConfig) -> TwistProfile {
    TwistProfile {
        linear_speed: ground.linear_speed,
        angular_speed: ground.angular_speed,
    }
}

/// Turns repeat `pulse_repeats` times; forward is always a single publish
pub fn pulse_plan(ground: &GroundRobotConfig) -> PulsePlan {
    let interval = Duration::from_millis(ground.pulse_interval_ms);
    PulsePlan {
        turn: TimedPulse::new(ground.pulse_repeats, interval),
        forward: TimedPulse::single(interval),
    }
}

pub fn label_mapper(simulator: &SimulatorConfig) -> LabelMotionMapper {
    LabelMotionMapper::new(simulator.power_threshold)
}

pub fn wheel_profile(simulator: &SimulatorConfig) -> WheelProfile {
    WheelProfile {
        speed: simulator.wheel_speed,
    }
}

pub fn logging_options(logging: &LoggingConfig) -> LoggingOptions {
    LoggingOptions {
        level: logging.level.clone(),
        console_format: LogFormat::Text,
        log_dir: logging.log_dir.clone(),
        retention_days: logging.retention_days,
        retention_runs: logging.retention_runs,
    }
}

/// Connect to Cortex and run `listener` until shutdown or session end
pub fn drive_session<L: CortexListener + ?Sized>(
    config: &NeurodriveConfig,
    listener: &mut L,
    shutdown: &AtomicBool,
) -> Result<()> {
    let connection = CortexConnection::connect(&connection_options(&config.cortex))
        .with_context(|| format!("connecting to Cortex at {}", config.cortex.url))?;
    let mut client = CortexClient::new(connection, CortexSession::new(session_init(config)));
    client.run(listener, shutdown)?;
    Ok(())
}

pub fn run_ground(config: &NeurodriveConfig, shutdown: &AtomicBool) -> Result<()> {
    let ground = &config.ground;
    info!(
        "[PILOT] Ground robot on {} via {}",
        ground.topic, ground.rosbridge_url
    );

    let socket = RosbridgeSocket::connect(&ground.rosbridge_url)?;
    let publisher = RosbridgeTwistPublisher::new(RosbridgeClient::new(socket), ground.topic.clone())?;
    let mut pilot = GroundRobotPilot::new(peak_selector(ground), twist_profile(ground), publisher);
    pilot.set_pulses(pulse_plan(ground));

    let mut live = LiveSession::new(
        config.cortex.profile_name.clone(),
        config.sensitivity.values.clone(),
        pilot,
    )?;
    let outcome = drive_session(config, &mut live, shutdown);

    let pilot = live.handler_mut();
    info!("[PILOT] {} commands driven", pilot.commands_sent());
    if let Err(e) = pilot.stop() {
        warn!("[PILOT] Could not stop the robot: {}", e);
    }
    outcome
}

pub fn run_simulator(config: &NeurodriveConfig, shutdown: &AtomicBool) -> Result<()> {
    let simulator = &config.simulator;
    info!("[PILOT] Simulated robot via {}", simulator.rosbridge_url);

    let socket = RosbridgeSocket::connect(&simulator.rosbridge_url)?;
    let driver = RosbridgeWheelDriver::new(
        RosbridgeClient::new(socket),
        simulator.left_wheel_topic.clone(),
        simulator.right_wheel_topic.clone(),
    )?;
    let pilot = SimulatedRobotPilot::new(label_mapper(simulator), wheel_profile(simulator), driver)?;

    let mut live = LiveSession::new(
        config.cortex.profile_name.clone(),
        config.sensitivity.values.clone(),
        pilot,
    )?;
    let outcome = drive_session(config, &mut live, shutdown);

    if let Err(e) = live.handler_mut().stop() {
        warn!("[PILOT] Could not stop the robot: {}", e);
    }
    outcome
}
