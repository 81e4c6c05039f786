//! Unit tests for configuration validation.

use stepper_ramp::config::{validate_config, MotorConfig};
use stepper_ramp::error::{ConfigError, Error, MotionError};
use stepper_ramp::{Micros, StepsPerSec, StepsPerSecSquared};

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let toml_str = r#"
name = "main_axis"
max_speed_steps_per_sec = 1000.0
acceleration_steps_per_sec2 = 5000.0
step_pulse_us = 10
"#;

    let config: MotorConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a negative acceleration.
#[test]
fn test_invalid_acceleration() {
    let config = MotorConfig::new(StepsPerSec(200.0), StepsPerSecSquared(-50.0));
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidAcceleration(-50.0)))
    );
}

/// Test validation fails for a speed faster than the microsecond timer.
#[test]
fn test_speed_beyond_timer_resolution() {
    let config = MotorConfig::new(StepsPerSec(2_000_000.0), StepsPerSecSquared(1.0e12));
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMaxSpeed(_)))
    ));
}

/// Test validation fails when the ramp exceeds the default table.
#[test]
fn test_ramp_exceeds_capacity() {
    // 1000² / (2 * 100) = 5000 ramp steps
    let config = MotorConfig::new(StepsPerSec(1000.0), StepsPerSecSquared(100.0));
    match validate_config(&config) {
        Err(Error::Motion(MotionError::CapacityExceeded { required, capacity })) => {
            assert_eq!(capacity, 500);
            assert!((4990..=5010).contains(&required), "required = {}", required);
        }
        other => panic!("expected CapacityExceeded, got {:?}", other),
    }
}

/// Test validation fails for a pulse as long as the cruise interval.
#[test]
fn test_step_pulse_too_long() {
    let mut config = MotorConfig::new(StepsPerSec(1000.0), StepsPerSecSquared(5000.0));
    config.step_pulse = Micros(1000);
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStepPulse(1000)))
    );
}
