//! Peak-threshold motion selection.
//!
//! Tracks the strongest power seen since the last zero reading. A zero
//! reading closes the gesture and classifies it by that peak:
//!
//! | peak              | command        |
//! |-------------------|----------------|
//! | `> left`          | turn left      |
//! | `< forward`       | move forward   |
//! | otherwise         | turn right     |
//!
//! The checks run in a fixed order (rising, zero, pass-through), so a zero
//! reading while the peak is still zero closes an empty gesture and moves
//! forward.

use crate::command::MotionCommand;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakThresholds {
    pub left: f64,
    pub forward: f64,
}

impl Default for PeakThresholds {
    fn default() -> Self {
        Self {
            left: 0.7,
            forward: 0.3,
        }
    }
}

impl PeakThresholds {
    pub fn classify(&self, peak: f64) -> MotionCommand {
        if peak > self.left {
            MotionCommand::TurnLeft
        } else if peak < self.forward {
            MotionCommand::MoveForward
        } else {
            MotionCommand::TurnRight
        }
    }
}

/// Result of feeding one power reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PeakOutcome {
    /// New peak recorded
    Rising(f64),
    /// Zero reading closed a gesture
    Completed {
        command: MotionCommand,
        peak: f64,
    },
    /// Neither a new peak nor zero
    PassThrough,
}

impl PeakOutcome {
    pub fn command(&self) -> Option<MotionCommand> {
        match self {
            PeakOutcome::Completed { command, .. } => Some(*command),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PeakThresholdSelector {
    thresholds: PeakThresholds,
    current_peak: f64,
}

impl PeakThresholdSelector {
    pub fn new(thresholds: PeakThresholds) -> Self {
        Self {
            thresholds,
            current_peak: 0.0,
        }
    }

    pub fn current_peak(&self) -> f64 {
        self.current_peak
    }

    pub fn thresholds(&self) -> PeakThresholds {
        self.thresholds
    }

    pub fn observe(&mut self, power: f64) -> PeakOutcome {
        if power > self.current_peak {
            self.current_peak = power;
            PeakOutcome::Rising(power)
        } else if power == 0.0 {
            let peak = self.current_peak;
            self.current_peak = 0.0;
            PeakOutcome::Completed {
                command: self.thresholds.classify(peak),
                peak,
            }
        } else {
            PeakOutcome::PassThrough
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(readings: &[f64]) -> Vec<MotionCommand> {
        let mut selector = PeakThresholdSelector::default();
        readings
            .iter()
            .filter_map(|p| selector.observe(*p).command())
            .collect()
    }

    #[test]
    fn strong_gesture_turns_left() {
        assert_eq!(commands(&[0.2, 0.5, 0.8, 0.0]), vec![MotionCommand::TurnLeft]);
    }

    #[test]
    fn weak_gesture_moves_forward() {
        assert_eq!(commands(&[0.1, 0.2, 0.0]), vec![MotionCommand::MoveForward]);
    }

    #[test]
    fn medium_gesture_turns_right() {
        assert_eq!(commands(&[0.4, 0.6, 0.5, 0.0]), vec![MotionCommand::TurnRight]);
    }

    #[test]
    fn boundaries_fall_to_turn_right() {
        // Neither strictly above 0.7 nor strictly below 0.3
        assert_eq!(commands(&[0.7, 0.0]), vec![MotionCommand::TurnRight]);
        assert_eq!(commands(&[0.3, 0.0]), vec![MotionCommand::TurnRight]);
    }

    #[test]
    fn zero_with_no_peak_moves_forward() {
        assert_eq!(
            commands(&[0.0, 0.0]),
            vec![MotionCommand::MoveForward, MotionCommand::MoveForward]
        );
    }

    #[test]
    fn peak_resets_after_each_gesture() {
        let mut selector = PeakThresholdSelector::default();
        assert_eq!(selector.observe(0.9), PeakOutcome::Rising(0.9));
        assert_eq!(selector.observe(0.4), PeakOutcome::PassThrough);
        assert_eq!(
            selector.observe(0.0),
            PeakOutcome::Completed {
                command: MotionCommand::TurnLeft,
                peak: 0.9
            }
        );
        assert_eq!(selector.current_peak(), 0.0);
        assert_eq!(commands(&[0.9, 0.0, 0.1, 0.0]).len(), 2);
    }

    #[test]
    fn classification_follows_running_maximum() {
        // Every sequence ends in zero; the command depends only on its maximum
        let sequences: [&[f64]; 5] = [
            &[0.75, 0.1, 0.2],
            &[0.05, 0.29, 0.1],
            &[0.5, 0.69, 0.3],
            &[0.71],
            &[0.2, 0.3, 0.35],
        ];
        let thresholds = PeakThresholds::default();
        for sequence in sequences {
            let max = sequence.iter().cloned().fold(0.0, f64::max);
            let mut readings = sequence.to_vec();
            readings.push(0.0);
            assert_eq!(commands(&readings), vec![thresholds.classify(max)], "{:?}", sequence);
        }
    }

    #[test]
    fn custom_thresholds() {
        let mut selector = PeakThresholdSelector::new(PeakThresholds {
            left: 0.9,
            forward: 0.1,
        });
        selector.observe(0.8);
        assert_eq!(selector.observe(0.0).command(), Some(MotionCommand::TurnRight));
    }
}
