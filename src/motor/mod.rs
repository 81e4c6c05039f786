//! Motor module for stepper-ramp.
//!
//! Provides the stepper motor driver, position tracking and pulse outputs.

mod builder;
mod driver;
mod position;
mod pulse;

pub use builder::StepperMotorBuilder;
pub use driver::StepperMotor;
pub use position::Position;
pub use pulse::{FnPulse, PinFault, StepDirPins, StepPulse};
