//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::{Micros, StepsPerSec, StepsPerSecSquared};

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    #[serde(default = "default_name")]
    pub name: String<32>,

    /// Cruise speed in steps per second.
    #[serde(rename = "max_speed_steps_per_sec")]
    pub max_speed: StepsPerSec,

    /// Acceleration and deceleration in steps per second squared.
    #[serde(rename = "acceleration_steps_per_sec2")]
    pub acceleration: StepsPerSecSquared,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// STEP pin high time.
    #[serde(default = "default_step_pulse", rename = "step_pulse_us")]
    pub step_pulse: Micros,
}

fn default_name() -> String<32> {
    String::try_from("motor").unwrap_or_default()
}

fn default_step_pulse() -> Micros {
    Micros(2)
}

impl MotorConfig {
    /// Create a configuration with default name, polarity and pulse width.
    pub fn new(max_speed: StepsPerSec, acceleration: StepsPerSecSquared) -> Self {
        Self {
            name: default_name(),
            max_speed,
            acceleration,
            invert_direction: false,
            step_pulse: default_step_pulse(),
        }
    }

    /// Interval between steps at cruise speed, `None` if the speed is invalid.
    pub fn min_interval(&self) -> Option<Micros> {
        self.max_speed.to_interval()
    }

    /// Approximate number of steps needed to reach cruise speed from rest.
    pub fn ramp_steps(&self) -> f32 {
        self.acceleration.steps_to_reach(self.max_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_values() {
        let config = MotorConfig::new(StepsPerSec(200.0), StepsPerSecSquared(200.0));

        // 1e6 / 200
        assert_eq!(config.min_interval(), Some(Micros(5000)));
        // 200² / (2 * 200)
        assert!((config.ramp_steps() - 100.0).abs() < 0.001);
        assert_eq!(config.name.as_str(), "motor");
        assert_eq!(config.step_pulse, Micros(2));
    }
}
