//! Real-time speed ramp decisions.
//!
//! After every step and every parameter or target change the generator
//! decides the interval before the next step, comparing the braking
//! distance with the distance left to the target.

use crate::config::units::{Micros, StepsPerSec, StepsPerSecSquared};
use crate::error::Result;

use super::table::{ProfileTable, DEFAULT_CAPACITY};

/// Direction of motor motion.
///
/// Only distinguishes the two pulse outputs; which one is physically
/// clockwise depends on the wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Position increases.
    Forward,
    /// Position decreases.
    Backward,
}

impl Direction {
    /// Get direction from signed step count.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// Get the opposite direction.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Ramp state of the axis.
///
/// The index is the number of ramp steps since the last standstill,
/// which is also the number of steps needed to brake to a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampPhase {
    /// At rest, no step scheduled.
    Stopped,
    /// Speeding up; at ramp index `n`.
    Accelerating(u32),
    /// At cruise speed; the index is the full ramp length.
    Cruising,
    /// Slowing down; at ramp index `n`.
    Decelerating(u32),
}

impl RampPhase {
    /// Ramp index for a table of `ramp_len` entries.
    #[inline]
    pub fn index(self, ramp_len: u32) -> u32 {
        match self {
            RampPhase::Stopped => 0,
            RampPhase::Accelerating(n) | RampPhase::Decelerating(n) => n,
            RampPhase::Cruising => ramp_len,
        }
    }
}

/// Stateful kinematic controller for one axis.
///
/// `phase` reflects the steps actually taken. `recompute` plans the next
/// step into `next_phase`, which is committed by [`step_taken`] once the
/// pulse fires, so re-planning never counts a step twice.
///
/// [`step_taken`]: ProfileGenerator::step_taken
#[derive(Debug, Clone)]
pub struct ProfileGenerator<const N: usize = DEFAULT_CAPACITY> {
    table: ProfileTable<N>,
    phase: RampPhase,
    next_phase: RampPhase,
    direction: Direction,
    interval: Micros,
}

impl<const N: usize> ProfileGenerator<N> {
    /// Create a stopped generator.
    ///
    /// # Errors
    ///
    /// Fails like [`ProfileTable::build`].
    pub fn new(max_speed: StepsPerSec, acceleration: StepsPerSecSquared) -> Result<Self> {
        Ok(Self {
            table: ProfileTable::build(acceleration, max_speed)?,
            phase: RampPhase::Stopped,
            next_phase: RampPhase::Stopped,
            direction: Direction::Forward,
            interval: Micros(0),
        })
    }

    /// Plan the interval before the next step.
    ///
    /// `distance_to_go` is `target - current`. Leaves the committed ramp
    /// index untouched.
    pub fn recompute(&mut self, distance_to_go: i64) {
        let ramp_len = self.ramp_len();
        let steps_to_stop = self.phase.index(ramp_len);

        if distance_to_go == 0 && steps_to_stop <= 1 {
            if self.phase != RampPhase::Stopped {
                #[cfg(feature = "defmt")]
                defmt::debug!("move complete");
            }
            self.phase = RampPhase::Stopped;
            self.next_phase = RampPhase::Stopped;
            self.interval = Micros(0);
            return;
        }

        if steps_to_stop == 0 {
            // Starting from rest: always head for the target
            self.direction = Direction::from_steps(distance_to_go);
            self.interval = self.table.first_interval();
            self.next_phase = RampPhase::Accelerating(1);
            return;
        }

        let toward = distance_to_go != 0 && Direction::from_steps(distance_to_go) == self.direction;
        let accelerate = toward && u64::from(steps_to_stop) < distance_to_go.unsigned_abs();

        self.interval = self.table.interval_at(steps_to_stop as usize);
        self.next_phase = if steps_to_stop >= ramp_len {
            if accelerate {
                RampPhase::Cruising
            } else {
                RampPhase::Decelerating(ramp_len - 1)
            }
        } else if accelerate {
            RampPhase::Accelerating(steps_to_stop + 1)
        } else {
            RampPhase::Decelerating(steps_to_stop - 1)
        };
    }

    /// Commit the planned ramp state after a pulse fired.
    #[inline]
    pub fn step_taken(&mut self) {
        self.phase = self.next_phase;
    }

    /// Change the cruise speed.
    ///
    /// Rebuilds the table. While moving, the ramp index is re-derived from
    /// the current speed as `v² / 2a`. Call [`recompute`] afterwards.
    ///
    /// # Errors
    ///
    /// Fails like [`ProfileTable::build`]; the generator is left unchanged.
    ///
    /// [`recompute`]: ProfileGenerator::recompute
    pub fn set_max_speed(&mut self, speed: StepsPerSec) -> Result<()> {
        if speed == self.table.max_speed() {
            return Ok(());
        }
        let table = ProfileTable::build(self.table.acceleration(), speed)?;
        let current_speed = self.speed();
        let index = table.acceleration().steps_to_reach(current_speed) as u32;
        self.table = table;
        self.reseat(index);
        Ok(())
    }

    /// Change the acceleration.
    ///
    /// Rebuilds the table, so this costs a square root plus a pass over the
    /// whole ramp. While moving, the ramp index is scaled by the ratio of old
    /// to new acceleration. Call [`recompute`] afterwards.
    ///
    /// # Errors
    ///
    /// Fails like [`ProfileTable::build`]; the generator is left unchanged.
    ///
    /// [`recompute`]: ProfileGenerator::recompute
    pub fn set_acceleration(&mut self, acceleration: StepsPerSecSquared) -> Result<()> {
        if acceleration == self.table.acceleration() {
            return Ok(());
        }
        let table = ProfileTable::build(acceleration, self.table.max_speed())?;
        let old = self.table.acceleration().0;
        let index = self.phase.index(self.ramp_len());
        let scaled = (index as f32 * (old / acceleration.0)) as u32;
        self.table = table;
        self.reseat(scaled);
        Ok(())
    }

    /// Forget any motion, e.g. after the position was redefined.
    pub fn reset(&mut self) {
        self.phase = RampPhase::Stopped;
        self.next_phase = RampPhase::Stopped;
        self.interval = Micros(0);
    }

    // Move the committed index to `index`, keeping the phase kind
    fn reseat(&mut self, index: u32) {
        let ramp_len = self.ramp_len();
        if self.phase.index(ramp_len) == 0 {
            return;
        }
        let index = index.clamp(1, ramp_len);
        self.phase = match self.phase {
            RampPhase::Decelerating(_) => RampPhase::Decelerating(index),
            _ if index >= ramp_len => RampPhase::Cruising,
            _ => RampPhase::Accelerating(index),
        };
        self.next_phase = self.phase;
    }

    /// Interval before the next step; zero when stopped.
    #[inline]
    pub fn interval(&self) -> Micros {
        self.interval
    }

    /// Direction of the current or pending motion.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Ramp state after the last step taken.
    #[inline]
    pub fn phase(&self) -> RampPhase {
        self.phase
    }

    /// Ramp state once the pending step fires.
    #[inline]
    pub fn next_phase(&self) -> RampPhase {
        self.next_phase
    }

    /// Steps needed to brake to a stop from the current ramp state.
    #[inline]
    pub fn steps_to_stop(&self) -> u32 {
        self.phase.index(self.ramp_len())
    }

    /// Whether a step is scheduled.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.interval.0 != 0
    }

    /// Instantaneous speed magnitude implied by the current interval.
    #[inline]
    pub fn speed(&self) -> StepsPerSec {
        self.interval.to_speed()
    }

    /// Configured cruise speed.
    #[inline]
    pub fn max_speed(&self) -> StepsPerSec {
        self.table.max_speed()
    }

    /// Configured acceleration.
    #[inline]
    pub fn acceleration(&self) -> StepsPerSecSquared {
        self.table.acceleration()
    }

    /// The acceleration ramp in use.
    #[inline]
    pub fn table(&self) -> &ProfileTable<N> {
        &self.table
    }

    #[inline]
    fn ramp_len(&self) -> u32 {
        self.table.ramp_len() as u32
    }
}
