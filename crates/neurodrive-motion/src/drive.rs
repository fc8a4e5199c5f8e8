//! Velocity messages and the per-command profiles that produce them.

use crate::command::MotionCommand;
use serde::Serialize;

/// `geometry_msgs/Vector3`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// `geometry_msgs/Twist`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Twist {
    pub linear: Vector3,
    pub angular: Vector3,
}

impl Twist {
    /// Forward speed along x, yaw rate about z
    pub fn planar(linear_x: f64, angular_z: f64) -> Self {
        Self {
            linear: Vector3 {
                x: linear_x,
                ..Default::default()
            },
            angular: Vector3 {
                z: angular_z,
                ..Default::default()
            },
        }
    }
}

/// Target angular velocities of a differential-drive robot's wheels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelVelocities {
    pub left: f64,
    pub right: f64,
}

impl WheelVelocities {
    pub const STOPPED: Self = Self {
        left: 0.0,
        right: 0.0,
    };

    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwistProfile {
    pub linear_speed: f64,
    pub angular_speed: f64,
}

impl Default for TwistProfile {
    fn default() -> Self {
        Self {
            linear_speed: 0.2,
            angular_speed: 1.0,
        }
    }
}

impl TwistProfile {
    /// Turns keep moving forward while yawing
    pub fn twist_for(&self, command: MotionCommand) -> Twist {
        match command {
            MotionCommand::TurnLeft => Twist::planar(self.linear_speed, self.angular_speed),
            MotionCommand::MoveForward => Twist::planar(self.linear_speed, 0.0),
            MotionCommand::TurnRight => Twist::planar(self.linear_speed, -self.angular_speed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelProfile {
    pub speed: f64,
}

impl Default for WheelProfile {
    fn default() -> Self {
        Self { speed: 3.0 }
    }
}

impl WheelProfile {
    /// Turns spin in place
    pub fn wheels_for(&self, command: MotionCommand) -> WheelVelocities {
        let s = self.speed;
        match command {
            MotionCommand::TurnLeft => WheelVelocities::new(-s, s),
            MotionCommand::MoveForward => WheelVelocities::new(s, s),
            MotionCommand::TurnRight => WheelVelocities::new(s, -s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_twists() {
        let profile = TwistProfile::default();
        assert_eq!(profile.twist_for(MotionCommand::TurnLeft), Twist::planar(0.2, 1.0));
        assert_eq!(profile.twist_for(MotionCommand::MoveForward), Twist::planar(0.2, 0.0));
        assert_eq!(profile.twist_for(MotionCommand::TurnRight), Twist::planar(0.2, -1.0));
    }

    #[test]
    fn default_wheels() {
        let profile = WheelProfile::default();
        assert_eq!(profile.wheels_for(MotionCommand::MoveForward), WheelVelocities::new(3.0, 3.0));
        assert_eq!(profile.wheels_for(MotionCommand::TurnLeft), WheelVelocities::new(-3.0, 3.0));
        assert_eq!(profile.wheels_for(MotionCommand::TurnRight), WheelVelocities::new(3.0, -3.0));
    }

    #[test]
    fn twist_serializes_as_ros_message() {
        let value = serde_json::to_value(Twist::planar(0.2, -1.0)).unwrap();
        assert_eq!(
            value,
            json!({
                "linear": {"x": 0.2, "y": 0.0, "z": 0.0},
                "angular": {"x": 0.0, "y": 0.0, "z": -1.0}
            })
        );
    }
}
