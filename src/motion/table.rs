//! Precomputed acceleration ramp.
//!
//! Holds the inter-step intervals of a constant-acceleration ramp from
//! standstill up to cruise speed, following D. Austin's discretized
//! recurrence `c(n) = c(n-1) - 2·c(n-1) / (4n + 1)`.

use heapless::Vec;
use libm::{ceilf, sqrtf};

use crate::config::units::{Micros, StepsPerSec, StepsPerSecSquared, MICROS_PER_SEC};
use crate::error::{ConfigError, Error, MotionError, Result};

/// Default number of ramp entries a table can hold.
pub const DEFAULT_CAPACITY: usize = 500;

/// Correction applied to the continuous first-step formula `sqrt(2/a)`.
///
/// The recurrence underestimates the first interval by this factor when
/// seeded with the exact value.
const FIRST_STEP_CORRECTION: f32 = 0.676;

/// Longest ramp measured exactly when reporting a capacity overflow.
const MAX_COUNTED_RAMP: u32 = 1 << 20;

/// Acceleration ramp with a fixed capacity of `N` entries.
///
/// Entry `i` is the interval preceding step `i + 1` of a ramp from rest.
/// Entries are non-increasing, never below the cruise interval, and the
/// last entry equals the cruise interval.
#[derive(Debug, Clone)]
pub struct ProfileTable<const N: usize = DEFAULT_CAPACITY> {
    intervals: Vec<u32, N>,
    first_step: f32,
    min_interval: Micros,
    max_speed: StepsPerSec,
    acceleration: StepsPerSecSquared,
}

impl<const N: usize> ProfileTable<N> {
    /// Compute the ramp for `acceleration` up to `max_speed`.
    ///
    /// This is O(ramp length) plus a square root. Do not call it per step.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidMaxSpeed` if the speed is not positive or its
    ///   interval would round below one microsecond
    /// - `ConfigError::InvalidAcceleration` if the acceleration is not
    ///   positive or the first interval overflows the 32-bit timer
    /// - `MotionError::CapacityExceeded` if the ramp needs more than `N` entries
    pub fn build(acceleration: StepsPerSecSquared, max_speed: StepsPerSec) -> Result<Self> {
        let min_interval = max_speed
            .to_interval()
            .ok_or(Error::Config(ConfigError::InvalidMaxSpeed(max_speed.0)))?;

        if acceleration.0 <= 0.0 || !acceleration.0.is_finite() {
            return Err(Error::Config(ConfigError::InvalidAcceleration(acceleration.0)));
        }

        let first_step = FIRST_STEP_CORRECTION * sqrtf(2.0 / acceleration.0) * MICROS_PER_SEC;
        if !first_step.is_finite() || first_step >= u32::MAX as f32 {
            return Err(Error::Config(ConfigError::InvalidAcceleration(acceleration.0)));
        }

        let cruise = MICROS_PER_SEC / max_speed.0;
        let overflow = |required: u32| {
            Error::Motion(MotionError::CapacityExceeded {
                required,
                capacity: N,
            })
        };

        let mut intervals: Vec<u32, N> = Vec::new();
        let mut cn = first_step;
        let mut n: u32 = 0;
        while cn > cruise {
            if intervals.push(cn as u32).is_err() {
                let required = Self::count_ramp(cn, n, cruise).unwrap_or_else(|| {
                    let estimate = ceilf(acceleration.steps_to_reach(max_speed)) as u32;
                    estimate.max(n + 1)
                });
                return Err(overflow(required));
            }
            n += 1;
            cn -= (2.0 * cn) / (4.0 * n as f32 + 1.0);
        }
        intervals.push(min_interval.0).map_err(|_| overflow(n + 1))?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ramp table: {} entries, c0 = {} us, cmin = {} us",
            intervals.len(),
            first_step as u32,
            min_interval.0
        );

        Ok(Self {
            intervals,
            first_step,
            min_interval,
            max_speed,
            acceleration,
        })
    }

    // Total entries of a ramp whose entry `n` is `cn`, or `None` past
    // MAX_COUNTED_RAMP entries.
    fn count_ramp(mut cn: f32, mut n: u32, cruise: f32) -> Option<u32> {
        while cn > cruise {
            if n >= MAX_COUNTED_RAMP {
                return None;
            }
            n += 1;
            cn -= (2.0 * cn) / (4.0 * n as f32 + 1.0);
        }
        Some(n + 1)
    }

    /// Number of steps from rest to cruise speed.
    #[inline]
    pub fn ramp_len(&self) -> usize {
        self.intervals.len()
    }

    /// Maximum number of entries.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Interval before the first step from rest.
    #[inline]
    pub fn first_interval(&self) -> Micros {
        self.intervals
            .first()
            .map(|&c| Micros(c))
            .unwrap_or(self.min_interval)
    }

    /// Unclamped first-step interval `c0` in microseconds.
    #[inline]
    pub fn first_step_raw(&self) -> f32 {
        self.first_step
    }

    /// Cruise interval `cMin`.
    #[inline]
    pub fn min_interval(&self) -> Micros {
        self.min_interval
    }

    /// Interval for ramp index `index`; the cruise interval past the end.
    #[inline]
    pub fn interval_at(&self, index: usize) -> Micros {
        self.intervals
            .get(index)
            .map(|&c| Micros(c))
            .unwrap_or(self.min_interval)
    }

    /// Entry at `index`, if inside the ramp.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Micros> {
        self.intervals.get(index).map(|&c| Micros(c))
    }

    /// Raw intervals in microseconds.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.intervals
    }

    /// Iterate over the ramp intervals.
    pub fn iter(&self) -> impl Iterator<Item = Micros> + '_ {
        self.intervals.iter().map(|&c| Micros(c))
    }

    /// Speed the table ramps up to.
    #[inline]
    pub fn max_speed(&self) -> StepsPerSec {
        self.max_speed
    }

    /// Acceleration the table was computed for.
    #[inline]
    pub fn acceleration(&self) -> StepsPerSecSquared {
        self.acceleration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(speed: f32, accel: f32) -> ProfileTable {
        ProfileTable::build(StepsPerSecSquared(accel), StepsPerSec(speed)).unwrap()
    }

    #[test]
    fn test_first_interval() {
        let t = table(200.0, 200.0);
        // 0.676 * sqrt(2 / 200) * 1e6
        assert!((t.first_interval().value() as i64 - 67_600).abs() <= 1);
        // c1 = c0 * 3 / 5
        assert!((t.get(1).unwrap().value() as i64 - 40_560).abs() <= 2);
    }

    #[test]
    fn test_ramp_shape() {
        let t = table(200.0, 200.0);
        assert_eq!(t.min_interval(), Micros(5000));
        // v² / 2a = 100 steps
        assert!((95..=105).contains(&t.ramp_len()), "ramp_len = {}", t.ramp_len());
        assert_eq!(*t.as_slice().last().unwrap(), 5000);
        assert!(t.iter().all(|c| c >= t.min_interval()));
        assert!(t.as_slice().windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_interval_past_end_is_cruise() {
        let t = table(200.0, 200.0);
        assert_eq!(t.interval_at(t.ramp_len()), Micros(5000));
        assert_eq!(t.interval_at(10_000), Micros(5000));
        assert!(t.get(t.ramp_len()).is_none());
    }

    #[test]
    fn test_first_step_faster_than_cruise() {
        // c0 is about 956 us, cruise is 100 ms
        let t = table(10.0, 1_000_000.0);
        assert_eq!(t.ramp_len(), 1);
        assert_eq!(t.first_interval(), Micros(100_000));
    }

    #[test]
    fn test_capacity_exceeded() {
        let needed = table(200.0, 200.0).ramp_len() as u32;
        let result = ProfileTable::<16>::build(StepsPerSecSquared(200.0), StepsPerSec(200.0));
        assert_eq!(
            result.unwrap_err(),
            Error::Motion(MotionError::CapacityExceeded {
                required: needed,
                capacity: 16,
            })
        );
    }

    #[test]
    fn test_capacity_exceeded_by_one_entry() {
        // v² / 2a is exactly 500, the recurrence needs one entry more
        let accel = StepsPerSecSquared(1000.0);
        let speed = StepsPerSec(1000.0);
        let needed = ProfileTable::<600>::build(accel, speed).unwrap().ramp_len();

        match ProfileTable::<500>::build(accel, speed) {
            Err(Error::Motion(MotionError::CapacityExceeded { required, capacity })) => {
                assert!(required as usize > capacity, "required {} <= capacity {}", required, capacity);
                assert_eq!(required as usize, needed);
            }
            other => panic!("expected CapacityExceeded, got {:?}", other.map(|t| t.ramp_len())),
        }
    }

    #[test]
    fn test_capacity_exceeded_on_cruise_entry() {
        // c0 is below the cruise interval, so the only entry is the cruise one
        let result = ProfileTable::<0>::build(StepsPerSecSquared(1_000_000.0), StepsPerSec(10.0));
        assert!(matches!(
            result,
            Err(Error::Motion(MotionError::CapacityExceeded { required: 1, capacity: 0 }))
        ));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            ProfileTable::<8>::build(StepsPerSecSquared(0.0), StepsPerSec(100.0)),
            Err(Error::Config(ConfigError::InvalidAcceleration(_)))
        ));
        assert!(matches!(
            ProfileTable::<8>::build(StepsPerSecSquared(100.0), StepsPerSec(-1.0)),
            Err(Error::Config(ConfigError::InvalidMaxSpeed(_)))
        ));
        assert!(matches!(
            ProfileTable::<8>::build(StepsPerSecSquared(1e-12), StepsPerSec(1.0)),
            Err(Error::Config(ConfigError::InvalidAcceleration(_)))
        ));
    }
}
