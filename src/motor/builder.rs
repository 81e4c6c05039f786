//! Builder pattern for StepperMotor.

use crate::config::units::{Micros, StepsPerSec, StepsPerSecSquared};
use crate::config::MotorConfig;
use crate::error::{ConfigError, Error, Result};
use crate::motion::{ProfileGenerator, DEFAULT_CAPACITY};

use super::driver::StepperMotor;
use super::position::Position;
use super::pulse::StepPulse;

/// Builder for creating StepperMotor instances.
pub struct StepperMotorBuilder<P, const N: usize = DEFAULT_CAPACITY>
where
    P: StepPulse,
{
    pulse: Option<P>,
    name: Option<heapless::String<32>>,
    max_speed: Option<StepsPerSec>,
    acceleration: Option<StepsPerSecSquared>,
    step_pulse: Option<Micros>,
    position: i64,
}

impl<P> StepperMotorBuilder<P, DEFAULT_CAPACITY>
where
    P: StepPulse,
{
    /// Create a new builder with the default table capacity.
    pub fn new() -> Self {
        Self::with_capacity()
    }
}

impl<P> Default for StepperMotorBuilder<P, DEFAULT_CAPACITY>
where
    P: StepPulse,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, const N: usize> StepperMotorBuilder<P, N>
where
    P: StepPulse,
{
    /// Create a new builder for a table of `N` entries.
    pub fn with_capacity() -> Self {
        Self {
            pulse: None,
            name: None,
            max_speed: None,
            acceleration: None,
            step_pulse: None,
            position: 0,
        }
    }

    /// Set the pulse output.
    pub fn pulse(mut self, pulse: P) -> Self {
        self.pulse = Some(pulse);
        self
    }

    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set the cruise speed in steps per second.
    pub fn max_speed(mut self, speed: StepsPerSec) -> Self {
        self.max_speed = Some(speed);
        self
    }

    /// Set the acceleration in steps per second squared.
    pub fn acceleration(mut self, acceleration: StepsPerSecSquared) -> Self {
        self.acceleration = Some(acceleration);
        self
    }

    /// Set the starting position in steps.
    pub fn position(mut self, steps: i64) -> Self {
        self.position = steps;
        self
    }

    /// Set the STEP pulse width the output will use.
    ///
    /// Only checked against the cruise interval; the pulse output applies
    /// the width itself (see [`StepDirPins::pulse_width`]).
    ///
    /// [`StepDirPins::pulse_width`]: super::StepDirPins::pulse_width
    pub fn step_pulse(mut self, width: Micros) -> Self {
        self.step_pulse = Some(width);
        self
    }

    /// Configure from a MotorConfig.
    ///
    /// Applies the name, speed, acceleration and STEP pulse width; the
    /// pulse width is validated by [`build`](Self::build).
    pub fn from_config(mut self, config: &MotorConfig) -> Self {
        self.name = Some(config.name.clone());
        self.max_speed = Some(config.max_speed);
        self.acceleration = Some(config.acceleration);
        self.step_pulse = Some(config.step_pulse);
        self
    }

    /// Build the StepperMotor.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing, the kinematic
    /// parameters are rejected by [`ProfileGenerator::new`], or the STEP
    /// pulse is zero or not shorter than the cruise interval.
    pub fn build(self) -> Result<StepperMotor<P, N>> {
        let pulse = self
            .pulse
            .ok_or(Error::Config(ConfigError::MissingField("pulse")))?;

        let max_speed = self
            .max_speed
            .ok_or(Error::Config(ConfigError::MissingField("max_speed")))?;

        let acceleration = self
            .acceleration
            .ok_or(Error::Config(ConfigError::MissingField("acceleration")))?;

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("motor").unwrap_or_default());

        let generator = ProfileGenerator::<N>::new(max_speed, acceleration)?;

        if let Some(width) = self.step_pulse {
            if width.0 == 0 || width >= generator.table().min_interval() {
                return Err(Error::Config(ConfigError::InvalidStepPulse(width.0)));
            }
        }

        Ok(StepperMotor::new(
            pulse,
            generator,
            Position::at(self.position),
            name,
        ))
    }
}
