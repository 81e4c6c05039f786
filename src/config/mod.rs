//! Configuration module for stepper-ramp.
//!
//! Provides the motor configuration type, loaded from TOML files (with the
//! `std` feature) or built in code, and its validation.

mod motor;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::MotorConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Micros, StepsPerSec, StepsPerSecSquared, UnitExt};
