//! Stepper motor driver.
//!
//! Ties position, ramp generator, step timing and the pulse output into the
//! polling API an application drives from its main loop.

use crate::config::units::{Micros, StepsPerSec, StepsPerSecSquared};
use crate::error::Result;
use crate::motion::{
    Direction, MicrosClock, ProfileGenerator, ProfileTable, RampPhase, StepScheduler,
    DEFAULT_CAPACITY,
};

use super::position::Position;
use super::pulse::StepPulse;

/// One stepper axis moving on trapezoidal speed ramps.
///
/// Generic over:
/// - `P`: pulse output (must implement [`StepPulse`])
/// - `N`: acceleration table capacity (defaults to [`DEFAULT_CAPACITY`])
///
/// Not reentrant: drive it from a single thread of control, and do not call
/// setters concurrently with [`poll`](Self::poll).
pub struct StepperMotor<P, const N: usize = DEFAULT_CAPACITY>
where
    P: StepPulse,
{
    /// Pulse output.
    pulse: P,

    /// Current and target position.
    position: Position,

    /// Ramp state and acceleration table.
    generator: ProfileGenerator<N>,

    /// Pulse timing.
    scheduler: StepScheduler,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,
}

impl<P, const N: usize> StepperMotor<P, N>
where
    P: StepPulse,
{
    /// Create a stopped motor.
    pub(crate) fn new(
        pulse: P,
        generator: ProfileGenerator<N>,
        position: Position,
        name: heapless::String<32>,
    ) -> Self {
        Self {
            pulse,
            position,
            generator,
            scheduler: StepScheduler::new(),
            name,
        }
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Set the absolute target position and plan the next step.
    pub fn move_to(&mut self, target: i64) {
        self.position.set_target(target);
        self.recompute();
    }

    /// Move by a relative amount from the current position.
    pub fn move_by(&mut self, delta: i64) {
        self.move_to(self.position.current() + delta);
    }

    /// Fire one step if it is due at `now` (microseconds).
    ///
    /// Cheap when no step is due. Does not plan the following step; use
    /// [`run`](Self::run) for the combined cycle.
    ///
    /// # Errors
    ///
    /// `MotorError::PinError` if the pulse output failed.
    #[inline]
    pub fn poll(&mut self, now: u32) -> Result<bool> {
        self.scheduler
            .poll(now, &mut self.generator, &mut self.position, &mut self.pulse)
    }

    /// Fire one step if due, then plan the next one.
    ///
    /// Call this at least once per minimum step interval.
    /// Returns `Ok(true)` if a step was taken.
    ///
    /// # Errors
    ///
    /// `MotorError::PinError` if the pulse output failed.
    pub fn run(&mut self, now: u32) -> Result<bool> {
        let stepped = self.poll(now)?;
        if stepped {
            self.recompute();
        }
        Ok(stepped)
    }

    /// Run until the target is reached and the axis is at rest (blocking).
    ///
    /// # Errors
    ///
    /// `MotorError::PinError` if the pulse output failed.
    pub fn run_to_position<C: MicrosClock>(&mut self, clock: &mut C) -> Result<()> {
        while self.is_running() {
            self.run(clock.now_micros())?;
        }
        Ok(())
    }

    /// Re-plan the pending step from the current state.
    ///
    /// Runs automatically after every step and every target or parameter
    /// change.
    pub fn recompute(&mut self) {
        self.generator.recompute(self.position.distance_to_go());
    }

    /// Brake to a stop as soon as the acceleration allows.
    ///
    /// Retargets to the position reached after braking from the current
    /// ramp state. Does nothing while at rest.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        let braking = i64::from(self.generator.steps_to_stop());
        let target = self.position.current() + self.generator.direction().sign() * braking;
        self.move_to(target);
    }

    /// Change the cruise speed (steps/s).
    ///
    /// Rebuilds the acceleration table: not a per-step operation.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidMaxSpeed` or `MotionError::CapacityExceeded`;
    /// the previous speed stays in effect.
    pub fn set_max_speed(&mut self, speed: StepsPerSec) -> Result<()> {
        if let Err(e) = self.generator.set_max_speed(speed) {
            #[cfg(feature = "defmt")]
            defmt::warn!("max speed {} rejected", speed.0);
            return Err(e);
        }
        self.recompute();
        Ok(())
    }

    /// Change the acceleration (steps/s²).
    ///
    /// Costs a square root plus a full table rebuild: call it only when the
    /// value actually changes.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidAcceleration` or `MotionError::CapacityExceeded`;
    /// the previous acceleration stays in effect.
    pub fn set_acceleration(&mut self, acceleration: StepsPerSecSquared) -> Result<()> {
        if let Err(e) = self.generator.set_acceleration(acceleration) {
            #[cfg(feature = "defmt")]
            defmt::warn!("acceleration {} rejected", acceleration.0);
            return Err(e);
        }
        self.recompute();
        Ok(())
    }

    /// Redefine the current position; the axis is considered at rest there.
    pub fn set_current_position(&mut self, steps: i64) {
        self.position.reset_to(steps);
        self.generator.reset();
    }

    /// Steps from the current to the target position.
    #[inline]
    pub fn distance_to_go(&self) -> i64 {
        self.position.distance_to_go()
    }

    /// Get current position in steps.
    #[inline]
    pub fn current_position(&self) -> i64 {
        self.position.current()
    }

    /// Get target position in steps.
    #[inline]
    pub fn target_position(&self) -> i64 {
        self.position.target()
    }

    /// Whether a step is scheduled.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.generator.is_running()
    }

    /// Interval before the next step; zero when stopped.
    #[inline]
    pub fn step_interval(&self) -> Micros {
        self.generator.interval()
    }

    /// Current ramp state.
    #[inline]
    pub fn phase(&self) -> RampPhase {
        self.generator.phase()
    }

    /// Direction of the current or pending motion.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.generator.direction()
    }

    /// Instantaneous speed in steps/s, negative when moving backward.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.generator.speed().0 * self.generator.direction().sign() as f32
    }

    /// Configured cruise speed.
    #[inline]
    pub fn max_speed(&self) -> StepsPerSec {
        self.generator.max_speed()
    }

    /// Configured acceleration.
    #[inline]
    pub fn acceleration(&self) -> StepsPerSecSquared {
        self.generator.acceleration()
    }

    /// The acceleration ramp in use.
    #[inline]
    pub fn profile_table(&self) -> &ProfileTable<N> {
        self.generator.table()
    }

    /// Timestamp of the last step.
    #[inline]
    pub fn last_step_time(&self) -> u32 {
        self.scheduler.last_step_time()
    }

    /// Access the pulse output.
    #[inline]
    pub fn pulse(&self) -> &P {
        &self.pulse
    }

    /// Mutable access to the pulse output.
    #[inline]
    pub fn pulse_mut(&mut self) -> &mut P {
        &mut self.pulse
    }

    /// Release the pulse output.
    pub fn into_pulse(self) -> P {
        self.pulse
    }
}
