//! Mental-command handlers that drive a robot.

use neurodrive_cortex::{MentalCommandHandler, MentalCommandSample};
use tracing::{debug, info};

use crate::command::MotionCommand;
use crate::drive::{Twist, TwistProfile, WheelProfile, WheelVelocities};
use crate::error::{MotionError, Result};
use crate::label::LabelMotionMapper;
use crate::peak::{PeakOutcome, PeakThresholdSelector};
use crate::pulse::{Pacer, ThreadPacer, TimedPulse};
use crate::sink::{TwistPublisher, WheelDriver};

/// Timing of the ground robot's pulses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulsePlan {
    pub turn: TimedPulse,
    pub forward: TimedPulse,
}

impl Default for PulsePlan {
    fn default() -> Self {
        let interval = std::time::Duration::from_millis(50);
        Self {
            turn: TimedPulse::new(30, interval),
            forward: TimedPulse::single(interval),
        }
    }
}

/// Ground robot driven by the peak power of each gesture.
///
/// Only the power of each sample matters; the label is ignored. Turns are
/// held for the whole turn pulse, forward is a single publish.
pub struct GroundRobotPilot<P, C = ThreadPacer> {
    selector: PeakThresholdSelector,
    profile: TwistProfile,
    pulses: PulsePlan,
    publisher: P,
    pacer: C,
    commands_sent: u64,
}

impl<P: TwistPublisher> GroundRobotPilot<P> {
    pub fn new(selector: PeakThresholdSelector, profile: TwistProfile, publisher: P) -> Self {
        Self::with_pacer(selector, profile, PulsePlan::default(), publisher, ThreadPacer)
    }
}

impl<P: TwistPublisher, C: Pacer> GroundRobotPilot<P, C> {
    pub fn with_pacer(
        selector: PeakThresholdSelector,
        profile: TwistProfile,
        pulses: PulsePlan,
        publisher: P,
        pacer: C,
    ) -> Self {
        Self {
            selector,
            profile,
            pulses,
            publisher,
            pacer,
            commands_sent: 0,
        }
    }

    pub fn set_pulses(&mut self, pulses: PulsePlan) {
        self.pulses = pulses;
    }

    pub fn selector(&self) -> &PeakThresholdSelector {
        &self.selector
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn pacer(&self) -> &C {
        &self.pacer
    }

    /// Commands driven since start
    pub fn commands_sent(&self) -> u64 {
        self.commands_sent
    }

    /// Feed one power reading, driving the robot if it closes a gesture
    pub fn observe(&mut self, power: f64) -> Result<Option<MotionCommand>> {
        match self.selector.observe(power) {
            PeakOutcome::Rising(peak) => {
                debug!("[PILOT] TEMP {}", peak);
                Ok(None)
            }
            PeakOutcome::Completed { command, peak } => {
                self.drive(command, peak)?;
                Ok(Some(command))
            }
            PeakOutcome::PassThrough => Ok(None),
        }
    }

    fn drive(&mut self, command: MotionCommand, peak: f64) -> Result<()> {
        let twist = self.profile.twist_for(command);
        let pulse = if command.is_turn() {
            self.pulses.turn
        } else {
            self.pulses.forward
        };
        info!("[PILOT] {} (peak {:.3})", command, peak);

        let publisher = &mut self.publisher;
        pulse.run(&mut self.pacer, |i| {
            debug!("[PILOT] {} {}/{}", command, i + 1, pulse.repeats);
            publisher.publish_twist(&twist)
        })?;
        self.commands_sent += 1;
        Ok(())
    }

    /// Publish a zero twist
    pub fn stop(&mut self) -> Result<()> {
        self.publisher.publish_twist(&Twist::default())
    }
}

impl<P: TwistPublisher, C: Pacer> MentalCommandHandler for GroundRobotPilot<P, C> {
    type Error = MotionError;

    fn handle_sample(&mut self, sample: &MentalCommandSample) -> Result<()> {
        self.observe(sample.power).map(|_| ())
    }
}

/// Simulated two-wheeled robot driven by the command label
pub struct SimulatedRobotPilot<D> {
    mapper: LabelMotionMapper,
    profile: WheelProfile,
    driver: D,
}

impl<D: WheelDriver> SimulatedRobotPilot<D> {
    /// Stops both wheels before returning
    pub fn new(mapper: LabelMotionMapper, profile: WheelProfile, mut driver: D) -> Result<Self> {
        driver.set_wheel_velocities(WheelVelocities::STOPPED)?;
        Ok(Self {
            mapper,
            profile,
            driver,
        })
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn apply(&mut self, action: &str, power: f64) -> Result<Option<MotionCommand>> {
        let Some(command) = self.mapper.map(action, power) else {
            return Ok(None);
        };
        info!("[PILOT] {} {}", command, power);
        self.driver
            .set_wheel_velocities(self.profile.wheels_for(command))?;
        Ok(Some(command))
    }

    pub fn stop(&mut self) -> Result<()> {
        self.driver.set_wheel_velocities(WheelVelocities::STOPPED)
    }
}

impl<D: WheelDriver> MentalCommandHandler for SimulatedRobotPilot<D> {
    type Error = MotionError;

    fn handle_sample(&mut self, sample: &MentalCommandSample) -> Result<()> {
        self.apply(&sample.action, sample.power).map(|_| ())
    }
}
