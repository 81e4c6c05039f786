//! # stepper-ramp
//!
//! Real-time trapezoidal speed ramps for one stepper axis, with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Precomputed ramp**: Austin's recurrence evaluated once per parameter change,
//!   so the per-step path is a table lookup
//! - **Braking lookahead**: decelerates exactly in time to land on the target
//! - **Wraparound-safe timing**: 32-bit microsecond timers may roll over mid-move
//! - **no_std compatible**: Fixed-capacity tables with `heapless`, no allocation
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR, `DelayNs` for the pulse width
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_ramp::{StepDirPins, StepperMotorBuilder, UnitExt};
//!
//! let mut motor = StepperMotorBuilder::new()
//!     .pulse(StepDirPins::new(step_pin, dir_pin, delay))
//!     .max_speed(200.0_f32.steps_per_sec())
//!     .acceleration(200.0_f32.steps_per_sec_squared())
//!     .build()?;
//!
//! motor.move_to(1000);
//! loop {
//!     motor.run(timer.now_micros())?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use config::{validate_config, MotorConfig};
pub use error::{Error, Result};
pub use motion::{
    Direction, MicrosClock, ProfileGenerator, ProfileTable, RampPhase, StepScheduler,
    DEFAULT_CAPACITY,
};
pub use motor::{FnPulse, PinFault, Position, StepDirPins, StepPulse, StepperMotor, StepperMotorBuilder};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Micros, StepsPerSec, StepsPerSecSquared, UnitExt};
