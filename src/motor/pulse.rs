//! Step pulse outputs.
//!
//! A [`StepPulse`] is the only hardware the ramp generator touches. It runs
//! inline in the polling path, so implementations must return quickly and
//! must not call back into the motor.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Micros;
use crate::config::MotorConfig;
use crate::motion::Direction;

/// Emits one step in either direction.
pub trait StepPulse {
    /// Error reported by the output.
    type Error;

    /// Emit one step that increases the position.
    fn forward(&mut self) -> Result<(), Self::Error>;

    /// Emit one step that decreases the position.
    fn backward(&mut self) -> Result<(), Self::Error>;

    /// Emit one step in `direction`.
    #[inline]
    fn step(&mut self, direction: Direction) -> Result<(), Self::Error> {
        match direction {
            Direction::Forward => self.forward(),
            Direction::Backward => self.backward(),
        }
    }
}

/// Pulse output backed by two callbacks.
pub struct FnPulse<F, B> {
    forward: F,
    backward: B,
}

impl<F, B> FnPulse<F, B>
where
    F: FnMut(),
    B: FnMut(),
{
    /// Wrap the forward and backward step callbacks.
    pub fn new(forward: F, backward: B) -> Self {
        Self { forward, backward }
    }

    /// Return the callbacks.
    pub fn into_inner(self) -> (F, B) {
        (self.forward, self.backward)
    }
}

impl<F, B> StepPulse for FnPulse<F, B>
where
    F: FnMut(),
    B: FnMut(),
{
    type Error = Infallible;

    #[inline]
    fn forward(&mut self) -> Result<(), Infallible> {
        (self.forward)();
        Ok(())
    }

    #[inline]
    fn backward(&mut self) -> Result<(), Infallible> {
        (self.backward)();
        Ok(())
    }
}

/// STEP/DIR driver pins.
///
/// DIR is written only when the direction changes. STEP is held high for
/// the configured pulse width.
pub struct StepDirPins<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    /// STEP pin (pulse to move one step).
    step_pin: STEP,

    /// DIR pin (high = forward, low = backward, or inverted).
    dir_pin: DIR,

    /// Delay provider for the pulse width.
    delay: DELAY,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// STEP high time.
    pulse_width: Micros,
}

/// Pin errors surfaced by [`StepDirPins`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinFault {
    /// Writing the STEP pin failed.
    Step,
    /// Writing the DIR pin failed.
    Dir,
}

impl<STEP, DIR, DELAY> StepDirPins<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    /// Create pins with a 2 µs pulse and non-inverted direction.
    pub fn new(step_pin: STEP, dir_pin: DIR, delay: DELAY) -> Self {
        Self {
            step_pin,
            dir_pin,
            delay,
            current_direction: None,
            invert_direction: false,
            pulse_width: Micros(2),
        }
    }

    /// Create pins using the inversion and pulse width from `config`.
    pub fn from_config(step_pin: STEP, dir_pin: DIR, delay: DELAY, config: &MotorConfig) -> Self {
        Self::new(step_pin, dir_pin, delay)
            .invert_direction(config.invert_direction)
            .pulse_width(config.step_pulse)
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Set the STEP high time.
    pub fn pulse_width(mut self, width: Micros) -> Self {
        self.pulse_width = width;
        self
    }

    /// Release the pins and delay.
    pub fn release(self) -> (STEP, DIR, DELAY) {
        (self.step_pin, self.dir_pin, self.delay)
    }

    fn set_direction(&mut self, direction: Direction) -> Result<(), PinFault> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Direction::Forward => !self.invert_direction,
            Direction::Backward => self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| PinFault::Dir)?;
        } else {
            self.dir_pin.set_low().map_err(|_| PinFault::Dir)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }

    fn pulse(&mut self, direction: Direction) -> Result<(), PinFault> {
        self.set_direction(direction)?;
        self.step_pin.set_high().map_err(|_| PinFault::Step)?;
        self.delay.delay_us(self.pulse_width.0);
        self.step_pin.set_low().map_err(|_| PinFault::Step)
    }
}

impl<STEP, DIR, DELAY> StepPulse for StepDirPins<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    type Error = PinFault;

    fn forward(&mut self) -> Result<(), PinFault> {
        self.pulse(Direction::Forward)
    }

    fn backward(&mut self) -> Result<(), PinFault> {
        self.pulse(Direction::Backward)
    }
}
