//! Motion module for stepper-ramp.
//!
//! Provides the precomputed acceleration ramp, the per-step speed decisions
//! and the pulse timing gate.

mod generator;
mod scheduler;
mod table;

pub use generator::{Direction, ProfileGenerator, RampPhase};
pub use scheduler::{MicrosClock, StepScheduler};
pub use table::{ProfileTable, DEFAULT_CAPACITY};
