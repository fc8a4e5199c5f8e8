//! # neurodrive
//!
//! Drive a mobile robot from the mental-command stream of an Emotiv EEG
//! headset.
//!
//! ```toml
//! [dependencies]
//! neurodrive = "0.1"
//! ```
//!
//! ## Crates
//!
//! - [`config`]: `neurodrive.toml` loading with environment and CLI overrides
//! - [`cortex`]: Emotiv Cortex client and the live mental-command session
//! - [`motion`]: gesture classification, pulses and rosbridge drivers
//! - [`observability`]: console and run-file logging
//!
//! ## Example
//!
//! ```rust,no_run
//! use neurodrive::prelude::*;
//!
//! struct Print;
//! impl TwistPublisher for Print {
//!     fn publish_twist(&mut self, twist: &Twist) -> neurodrive::motion::Result<()> {
//!         println!("{:?}", twist);
//!         Ok(())
//!     }
//! }
//!
//! let pilot = GroundRobotPilot::new(
//!     PeakThresholdSelector::default(),
//!     TwistProfile::default(),
//!     Print,
//! );
//! let live = LiveSession::new("alice", vec![7, 7, 5, 5], pilot)?;
//! # let _ = live;
//! # Ok::<(), CortexError>(())
//! ```

pub use neurodrive_config as config;
pub use neurodrive_cortex as cortex;
pub use neurodrive_motion as motion;
pub use neurodrive_observability as observability;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use neurodrive_config::{load_config_or_default, validate_config, NeurodriveConfig};
    pub use neurodrive_cortex::{
        CortexClient, CortexError, CortexListener, CortexSession, LiveSession,
        MentalCommandHandler, MentalCommandSample,
    };
    pub use neurodrive_motion::{
        GroundRobotPilot, LabelMotionMapper, MotionCommand, PeakThresholdSelector,
        SimulatedRobotPilot, Twist, TwistProfile, TwistPublisher, WheelDriver, WheelProfile,
        WheelVelocities,
    };
}
