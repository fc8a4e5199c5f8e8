use std::time::Duration;

use neurodrive_cortex::{MentalCommandHandler, MentalCommandSample};
use neurodrive_motion::{
    GroundRobotPilot, LabelMotionMapper, MotionCommand, MotionError, Pacer, PeakThresholdSelector,
    PulsePlan, SimulatedRobotPilot, TimedPulse, Twist, TwistProfile, TwistPublisher, WheelDriver,
    WheelProfile, WheelVelocities,
};

#[derive(Default)]
struct RecordingPublisher {
    twists: Vec<Twist>,
    fail_after: Option<usize>,
}

impl TwistPublisher for RecordingPublisher {
    fn publish_twist(&mut self, twist: &Twist) -> neurodrive_motion::Result<()> {
        if self.fail_after == Some(self.twists.len()) {
            return Err(MotionError::ConnectionClosed);
        }
        self.twists.push(*twist);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingPacer {
    pauses: Vec<Duration>,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, interval: Duration) {
        self.pauses.push(interval);
    }
}

#[derive(Default)]
struct RecordingWheels {
    settings: Vec<WheelVelocities>,
}

impl WheelDriver for RecordingWheels {
    fn set_wheel_velocities(&mut self, velocities: WheelVelocities) -> neurodrive_motion::Result<()> {
        self.settings.push(velocities);
        Ok(())
    }
}

fn ground_pilot() -> GroundRobotPilot<RecordingPublisher, RecordingPacer> {
    GroundRobotPilot::with_pacer(
        PeakThresholdSelector::default(),
        TwistProfile::default(),
        PulsePlan::default(),
        RecordingPublisher::default(),
        RecordingPacer::default(),
    )
}

fn feed<H: MentalCommandHandler>(handler: &mut H, samples: &[(&str, f64)]) {
    for (i, (action, power)) in samples.iter().enumerate() {
        let sample = MentalCommandSample::new(*action, *power, i as f64);
        assert!(handler.handle_sample(&sample).is_ok());
    }
}

#[test]
fn strong_gesture_holds_left_turn_for_full_pulse() {
    let mut pilot = ground_pilot();
    feed(
        &mut pilot,
        &[("left", 0.2), ("left", 0.5), ("left", 0.8), ("neutral", 0.0)],
    );

    assert_eq!(pilot.publisher().twists, vec![Twist::planar(0.2, 1.0); 30]);
    assert_eq!(pilot.pacer().pauses, vec![Duration::from_millis(50); 30]);
    assert_eq!(pilot.commands_sent(), 1);
    assert_eq!(pilot.selector().current_peak(), 0.0);
}

#[test]
fn weak_gesture_moves_forward_once() {
    let mut pilot = ground_pilot();
    feed(&mut pilot, &[("push", 0.1), ("push", 0.2), ("neutral", 0.0)]);

    assert_eq!(pilot.publisher().twists, vec![Twist::planar(0.2, 0.0)]);
    assert_eq!(pilot.pacer().pauses, vec![Duration::from_millis(50)]);
}

#[test]
fn medium_gesture_turns_right() {
    let mut pilot = ground_pilot();
    feed(&mut pilot, &[("left", 0.5), ("left", 0.0)]);
    assert_eq!(pilot.publisher().twists, vec![Twist::planar(0.2, -1.0); 30]);
}

#[test]
fn ground_pilot_ignores_labels() {
    let mut by_label = ground_pilot();
    feed(&mut by_label, &[("right", 0.9), ("push", 0.0)]);
    let mut by_power = ground_pilot();
    feed(&mut by_power, &[("neutral", 0.9), ("neutral", 0.0)]);
    assert_eq!(by_label.publisher().twists, by_power.publisher().twists);
}

#[test]
fn publish_failure_aborts_pulse_and_surfaces() {
    let mut pilot = GroundRobotPilot::with_pacer(
        PeakThresholdSelector::default(),
        TwistProfile::default(),
        PulsePlan::default(),
        RecordingPublisher {
            twists: Vec::new(),
            fail_after: Some(3),
        },
        RecordingPacer::default(),
    );
    assert_eq!(pilot.observe(0.9).unwrap(), None);
    assert!(matches!(pilot.observe(0.0), Err(MotionError::ConnectionClosed)));
    assert_eq!(pilot.publisher().twists.len(), 3);
    assert_eq!(pilot.commands_sent(), 0);
    // The gesture is consumed even though driving failed
    assert_eq!(pilot.selector().current_peak(), 0.0);
}

#[test]
fn custom_pulse_plan() {
    let mut pilot = ground_pilot();
    pilot.set_pulses(PulsePlan {
        turn: TimedPulse::new(3, Duration::from_millis(10)),
        forward: TimedPulse::new(2, Duration::from_millis(5)),
    });
    assert_eq!(pilot.observe(0.8).unwrap(), None);
    assert_eq!(pilot.observe(0.0).unwrap(), Some(MotionCommand::TurnLeft));
    assert_eq!(pilot.observe(0.0).unwrap(), Some(MotionCommand::MoveForward));
    assert_eq!(pilot.publisher().twists.len(), 5);
    assert_eq!(pilot.pacer().pauses.iter().sum::<Duration>(), Duration::from_millis(40));
}

#[test]
fn ground_stop_publishes_zero_twist() {
    let mut pilot = ground_pilot();
    pilot.stop().unwrap();
    assert_eq!(pilot.publisher().twists, vec![Twist::default()]);
}

#[test]
fn simulated_pilot_follows_labels() {
    let mut pilot = SimulatedRobotPilot::new(
        LabelMotionMapper::default(),
        WheelProfile::default(),
        RecordingWheels::default(),
    )
    .unwrap();
    feed(
        &mut pilot,
        &[("neutral", 0.0), ("left", 0.5), ("left", 0.9), ("push", 0.8)],
    );

    assert_eq!(
        pilot.driver().settings,
        vec![
            WheelVelocities::STOPPED,
            WheelVelocities::new(3.0, 3.0),
            WheelVelocities::new(-3.0, 3.0),
            WheelVelocities::new(3.0, -3.0),
        ]
    );
}

#[test]
fn simulated_stop() {
    let mut pilot = SimulatedRobotPilot::new(
        LabelMotionMapper::default(),
        WheelProfile { speed: 6.0 },
        RecordingWheels::default(),
    )
    .unwrap();
    assert_eq!(pilot.apply("left", 0.1).unwrap(), Some(MotionCommand::TurnLeft));
    pilot.stop().unwrap();
    assert_eq!(
        pilot.driver().settings.last(),
        Some(&WheelVelocities::STOPPED)
    );
    assert_eq!(pilot.driver().settings[1], WheelVelocities::new(-6.0, 6.0));
}
