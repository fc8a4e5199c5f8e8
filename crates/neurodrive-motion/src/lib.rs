// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neurodrive-motion
//!
//! Turns mental-command samples into robot motion.
//!
//! - [`PeakThresholdSelector`]: classifies a gesture by its peak power when
//!   the power drops back to zero (ground robot)
//! - [`LabelMotionMapper`]: maps the command label directly (simulator)
//! - [`GroundRobotPilot`] / [`SimulatedRobotPilot`]: handlers that drive a
//!   [`TwistPublisher`] or [`WheelDriver`]
//! - [`rosbridge`]: both outputs over a rosbridge WebSocket

pub mod command;
pub mod drive;
mod error;
pub mod label;
pub mod peak;
pub mod pilot;
pub mod pulse;
pub mod rosbridge;
pub mod sink;

pub use command::MotionCommand;
pub use drive::{Twist, TwistProfile, Vector3, WheelProfile, WheelVelocities};
pub use error::{MotionError, Result};
pub use label::LabelMotionMapper;
pub use peak::{PeakOutcome, PeakThresholdSelector, PeakThresholds};
pub use pilot::{GroundRobotPilot, PulsePlan, SimulatedRobotPilot};
pub use pulse::{Pacer, ThreadPacer, TimedPulse};
pub use rosbridge::{
    RosbridgeClient, RosbridgeSocket, RosbridgeTwistPublisher, RosbridgeWheelDriver, TextSink,
};
pub use sink::{TwistPublisher, WheelDriver};
