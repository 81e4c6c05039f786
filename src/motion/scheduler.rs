//! Step timing.
//!
//! Gates pulses on a free-running 32-bit microsecond counter.

use crate::config::units::Micros;
use crate::error::{MotorError, Result};
use crate::motor::{Position, StepPulse};

use super::generator::ProfileGenerator;

/// Source of the current time in microseconds.
///
/// The counter may wrap at 2³²; only differences are ever used.
pub trait MicrosClock {
    /// Current counter value.
    fn now_micros(&mut self) -> u32;
}

impl<F> MicrosClock for F
where
    F: FnMut() -> u32,
{
    fn now_micros(&mut self) -> u32 {
        self()
    }
}

/// Decides when the next pulse is due and fires it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepScheduler {
    last_step_time: u32,
}

impl StepScheduler {
    /// Create a scheduler whose last step is at time zero.
    pub const fn new() -> Self {
        Self { last_step_time: 0 }
    }

    /// Timestamp of the last pulse.
    #[inline]
    pub fn last_step_time(&self) -> u32 {
        self.last_step_time
    }

    /// Time since the last pulse, correct across one counter wrap.
    #[inline]
    pub fn elapsed(&self, now: u32) -> Micros {
        Micros(now.wrapping_sub(self.last_step_time))
    }

    /// Whether a step with `interval` is due at `now`. A zero interval never is.
    #[inline]
    pub fn is_due(&self, now: u32, interval: Micros) -> bool {
        interval.0 != 0 && self.elapsed(now) >= interval
    }

    /// Fire at most one step if it is due.
    ///
    /// On a due step: pulses `pulse` in the generator's direction, moves
    /// `position` one step, commits the ramp state and records `now`.
    /// The caller must then re-plan with [`ProfileGenerator::recompute`].
    ///
    /// Returns `Ok(true)` if a step was taken.
    ///
    /// # Errors
    ///
    /// `MotorError::PinError` if the pulse output failed; nothing is updated.
    pub fn poll<P, const N: usize>(
        &mut self,
        now: u32,
        generator: &mut ProfileGenerator<N>,
        position: &mut Position,
        pulse: &mut P,
    ) -> Result<bool>
    where
        P: StepPulse,
    {
        if !self.is_due(now, generator.interval()) {
            return Ok(false);
        }

        let direction = generator.direction();
        pulse.step(direction).map_err(|_| MotorError::PinError)?;

        position.advance(direction);
        generator.step_taken();
        self.last_step_time = now;
        Ok(true)
    }

    /// Forget the last pulse time.
    #[inline]
    pub fn reset(&mut self, now: u32) {
        self.last_step_time = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_is_never_due() {
        let scheduler = StepScheduler::new();
        assert!(!scheduler.is_due(u32::MAX, Micros(0)));
    }

    #[test]
    fn test_due_after_interval() {
        let mut scheduler = StepScheduler::new();
        scheduler.reset(1000);
        assert!(!scheduler.is_due(5999, Micros(5000)));
        assert!(scheduler.is_due(6000, Micros(5000)));
        assert!(scheduler.is_due(7000, Micros(5000)));
    }

    #[test]
    fn test_due_across_wraparound() {
        let mut scheduler = StepScheduler::new();
        scheduler.reset(u32::MAX - 999);
        // 1000 us up to the wrap, 4000 after it
        assert!(!scheduler.is_due(3998, Micros(5000)));
        assert!(scheduler.is_due(4000, Micros(5000)));
        assert_eq!(scheduler.elapsed(4000), Micros(5000));
    }

    #[test]
    fn test_closure_clock() {
        let mut t = 0u32;
        let mut clock = || {
            t += 10;
            t
        };
        assert_eq!(clock.now_micros(), 10);
        assert_eq!(clock.now_micros(), 20);
    }
}
