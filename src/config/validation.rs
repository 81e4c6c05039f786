//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::motion::{ProfileTable, DEFAULT_CAPACITY};

use super::MotorConfig;

/// Validate a motor configuration.
///
/// Checks:
/// - Max speed and acceleration are accepted by the ramp builder
/// - The acceleration ramp fits the default table capacity
/// - The STEP pulse is non-zero and shorter than the cruise interval
pub fn validate_config(config: &MotorConfig) -> Result<()> {
    let table = ProfileTable::<DEFAULT_CAPACITY>::build(config.acceleration, config.max_speed)?;

    if config.step_pulse.0 == 0 || config.step_pulse >= table.min_interval() {
        return Err(Error::Config(ConfigError::InvalidStepPulse(
            config.step_pulse.0,
        )));
    }

    Ok(())
}
