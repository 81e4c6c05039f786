//! Error types for stepper-ramp.
//!
//! Provides unified error handling across configuration, ramp generation and pulse output.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-ramp operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Pulse output error
    Motor(MotorError),
    /// Ramp generation error
    Motion(MotionError),
}

/// Configuration-related errors.
///
/// Setters reject these values and keep the previous configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid max speed (must be > 0 and at most 1 000 000 steps/s)
    InvalidMaxSpeed(f32),
    /// Invalid acceleration (must be > 0 and large enough for a 32-bit first interval)
    InvalidAcceleration(f32),
    /// Invalid STEP pulse width (must be > 0 and shorter than the cruise interval)
    InvalidStepPulse(u32),
    /// Builder field was never set
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Pulse output errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Pin operation failed
    PinError,
}

/// Ramp generation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// The acceleration ramp does not fit in the profile table
    CapacityExceeded {
        /// Table entries the ramp needs; the closed-form estimate
        /// max_speed² / 2·acceleration for ramps too long to count
        required: u32,
        /// Table capacity in entries
        capacity: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMaxSpeed(v) => {
                write!(f, "Invalid max speed: {}. Must be > 0 and <= 1000000 steps/s", v)
            }
            ConfigError::InvalidAcceleration(v) => {
                write!(
                    f,
                    "Invalid acceleration: {}. Must be > 0 steps/s² and large enough for a 32-bit first interval",
                    v
                )
            }
            ConfigError::InvalidStepPulse(v) => {
                write!(f, "Invalid step pulse: {} us. Must be > 0 and below the cruise interval", v)
            }
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::CapacityExceeded { required, capacity } => write!(
                f,
                "Acceleration ramp needs {} entries, table holds {}",
                required, capacity
            ),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}
