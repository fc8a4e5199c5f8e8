//! Open-loop timed pulses.
//!
//! A hold gesture becomes a burst of identical publishes with a fixed pause
//! after each one. The burst blocks the caller and cannot be cancelled.

use std::time::Duration;

/// Source of the pause between publishes
pub trait Pacer {
    fn pause(&mut self, interval: Duration);
}

/// Sleeps the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedPulse {
    pub repeats: u32,
    pub interval: Duration,
}

impl TimedPulse {
    pub fn new(repeats: u32, interval: Duration) -> Self {
        Self { repeats, interval }
    }

    /// One publish followed by one pause
    pub fn single(interval: Duration) -> Self {
        Self::new(1, interval)
    }

    pub fn total_duration(&self) -> Duration {
        self.interval * self.repeats
    }

    /// Run `emit` `repeats` times, pausing after each call.
    /// Stops at the first error.
    pub fn run<E, P, F>(&self, pacer: &mut P, mut emit: F) -> Result<(), E>
    where
        P: Pacer + ?Sized,
        F: FnMut(u32) -> Result<(), E>,
    {
        for i in 0..self.repeats {
            emit(i)?;
            pacer.pause(self.interval);
        }
        Ok(())
    }
}
