use std::fmt;

/// Discrete robot motion derived from a mental command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionCommand {
    TurnLeft,
    MoveForward,
    TurnRight,
}

impl MotionCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionCommand::TurnLeft => "LEFT",
            MotionCommand::MoveForward => "FORWARD",
            MotionCommand::TurnRight => "RIGHT",
        }
    }

    /// Turns are held for a full pulse, forward is a single nudge
    pub fn is_turn(&self) -> bool {
        !matches!(self, MotionCommand::MoveForward)
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
