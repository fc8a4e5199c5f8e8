//! Output seams between motion selection and a robot.

use crate::drive::{Twist, WheelVelocities};
use crate::error::Result;

/// Publishes velocity commands to a mobile base
pub trait TwistPublisher {
    fn publish_twist(&mut self, twist: &Twist) -> Result<()>;
}

/// Sets target velocities on a pair of wheel motors
pub trait WheelDriver {
    fn set_wheel_velocities(&mut self, velocities: WheelVelocities) -> Result<()>;
}

impl<T: TwistPublisher + ?Sized> TwistPublisher for Box<T> {
    fn publish_twist(&mut self, twist: &Twist) -> Result<()> {
        (**self).publish_twist(twist)
    }
}

impl<T: WheelDriver + ?Sized> WheelDriver for Box<T> {
    fn set_wheel_velocities(&mut self, velocities: WheelVelocities) -> Result<()> {
        (**self).set_wheel_velocities(velocities)
    }
}
