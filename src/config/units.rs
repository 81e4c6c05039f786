//! Unit types for physical quantities.
//!
//! Keeps speeds, accelerations and timer intervals apart at compile time.

use serde::Deserialize;

/// Microseconds per second, the timer resolution of every interval.
pub const MICROS_PER_SEC: f32 = 1_000_000.0;

/// Step rate in steps per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct StepsPerSec(pub f32);

impl StepsPerSec {
    /// Create a new StepsPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Inter-step interval at this rate.
    ///
    /// Returns `None` for non-positive rates and for rates whose interval
    /// would round below one microsecond.
    #[inline]
    pub fn to_interval(self) -> Option<Micros> {
        if self.0 <= 0.0 || !self.0.is_finite() {
            return None;
        }
        let interval = MICROS_PER_SEC / self.0;
        if interval < 1.0 {
            None
        } else {
            Some(Micros(interval as u32))
        }
    }
}

/// Step acceleration in steps per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct StepsPerSecSquared(pub f32);

impl StepsPerSecSquared {
    /// Create a new StepsPerSecSquared value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Steps needed to reach `speed` from rest (v² / 2a).
    #[inline]
    pub fn steps_to_reach(self, speed: StepsPerSec) -> f32 {
        (speed.0 * speed.0) / (2.0 * self.0)
    }
}

/// Time span in microseconds on the wrapping 32-bit timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct Micros(pub u32);

impl Micros {
    /// Create a new Micros value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Step rate matching this interval, zero for a zero interval.
    #[inline]
    pub fn to_speed(self) -> StepsPerSec {
        if self.0 == 0 {
            StepsPerSec(0.0)
        } else {
            StepsPerSec(MICROS_PER_SEC / self.0 as f32)
        }
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to StepsPerSec.
    fn steps_per_sec(self) -> StepsPerSec;
    /// Convert to StepsPerSecSquared.
    fn steps_per_sec_squared(self) -> StepsPerSecSquared;
}

impl UnitExt for f32 {
    #[inline]
    fn steps_per_sec(self) -> StepsPerSec {
        StepsPerSec(self)
    }

    #[inline]
    fn steps_per_sec_squared(self) -> StepsPerSecSquared {
        StepsPerSecSquared(self)
    }
}
