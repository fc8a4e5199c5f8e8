use crate::command::MotionCommand;

/// Stateless mapping from a mental-command label to a motion.
///
/// `neutral` moves forward at any power. `left` turns left below the power
/// threshold and right at or above it, so a single trained action covers
/// both turns. Other labels are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMotionMapper {
    power_threshold: f64,
}

impl Default for LabelMotionMapper {
    fn default() -> Self {
        Self::new(0.7)
    }
}

impl LabelMotionMapper {
    pub fn new(power_threshold: f64) -> Self {
        Self { power_threshold }
    }

    pub fn power_threshold(&self) -> f64 {
        self.power_threshold
    }

    pub fn map(&self, action: &str, power: f64) -> Option<MotionCommand> {
        match action {
            "neutral" => Some(MotionCommand::MoveForward),
            "left" if power < self.power_threshold => Some(MotionCommand::TurnLeft),
            "left" => Some(MotionCommand::TurnRight),
            _ => None,
        }
    }
}
