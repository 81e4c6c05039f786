//! Unit tests for TOML configuration parsing.

use stepper_ramp::config::{load_config, parse_config, MotorConfig};
use stepper_ramp::error::{ConfigError, Error};
use stepper_ramp::{FnPulse, Micros, StepperMotorBuilder};

/// Test parsing a valid motor configuration from TOML.
#[test]
fn test_parse_motor_config() {
    let toml_str = r#"
name = "main_axis"
max_speed_steps_per_sec = 200.0
acceleration_steps_per_sec2 = 200.0
invert_direction = false
"#;

    let config: MotorConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.name.as_str(), "main_axis");
    assert_eq!(config.max_speed.0, 200.0);
    assert_eq!(config.acceleration.0, 200.0);
    assert!(!config.invert_direction);
    assert_eq!(config.step_pulse, Micros(2));
}

/// Test that an unknown speed unit is not silently accepted.
#[test]
fn test_wrong_field_names_fail() {
    let toml_str = r#"
name = "main_axis"
max_velocity_deg_per_sec = 360.0
max_acceleration_deg_per_sec2 = 720.0
"#;

    let result = parse_config(toml_str);
    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}

/// Test that parsing runs validation.
#[test]
fn test_parse_rejects_invalid_values() {
    let toml_str = r#"
max_speed_steps_per_sec = 0.0
acceleration_steps_per_sec2 = 200.0
"#;

    let result = parse_config(toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidMaxSpeed(_)))
    ));
}

/// Test loading from a file and building a motor from it.
#[test]
fn test_load_config_builds_motor() {
    let path = std::env::temp_dir().join("stepper_ramp_load_config_test.toml");
    std::fs::write(
        &path,
        r#"
name = "Y-Axis"
max_speed_steps_per_sec = 500.0
acceleration_steps_per_sec2 = 1000.0
step_pulse_us = 4
"#,
    )
    .expect("Failed to write config file");

    let config = load_config(&path).expect("Failed to load config");
    std::fs::remove_file(&path).ok();

    let motor = StepperMotorBuilder::new()
        .from_config(&config)
        .pulse(FnPulse::new(|| {}, || {}))
        .build()
        .expect("Failed to build motor");

    assert_eq!(motor.name(), "Y-Axis");
    assert_eq!(motor.max_speed().0, 500.0);
    assert_eq!(motor.acceleration().0, 1000.0);
    assert_eq!(motor.profile_table().min_interval(), Micros(2000));
}
