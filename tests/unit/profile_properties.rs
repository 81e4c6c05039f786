//! Property tests for ramp tables and complete moves.

use proptest::prelude::*;
use stepper_ramp::{FnPulse, ProfileTable, StepperMotorBuilder, StepsPerSec, StepsPerSecSquared};

/// Speed/acceleration pairs whose ramp fits the default table.
fn kinematics() -> impl Strategy<Value = (f32, f32)> {
    (20.0f32..2000.0, 20.0f32..20000.0)
        .prop_filter("ramp fits the table", |(v, a)| v * v / (2.0 * a) < 400.0)
}

proptest! {
    #[test]
    fn table_is_a_monotone_ramp((speed, accel) in kinematics()) {
        let table: ProfileTable =
            ProfileTable::build(StepsPerSecSquared(accel), StepsPerSec(speed)).unwrap();
        let entries = table.as_slice();
        let cmin = table.min_interval().value();

        prop_assert!(!entries.is_empty());
        prop_assert_eq!(*entries.last().unwrap(), cmin);
        prop_assert!(entries.iter().all(|&c| c >= cmin));
        prop_assert!(entries.windows(2).all(|w| w[0] >= w[1]));
        prop_assert_eq!(entries[0], table.first_interval().value());
        prop_assert!(table.first_interval().value() >= cmin);
    }

    #[test]
    fn moves_land_without_overshoot(
        (speed, accel) in kinematics(),
        distance in -3000i64..3000,
    ) {
        let mut m = StepperMotorBuilder::new()
            .pulse(FnPulse::new(|| {}, || {}))
            .max_speed(StepsPerSec(speed))
            .acceleration(StepsPerSecSquared(accel))
            .build()
            .unwrap();
        let cmin = m.profile_table().min_interval().value();

        m.move_to(distance);
        let mut steps = 0i64;
        while m.is_running() {
            let interval = m.step_interval().value();
            prop_assert!(interval >= cmin);
            let now = m.last_step_time().wrapping_add(interval);
            prop_assert!(m.run(now).unwrap());
            steps += 1;
            // Never past the target when starting from rest
            prop_assert!(m.current_position().abs() <= distance.abs());
            prop_assert!(m.current_position().signum() * distance.signum() >= 0);
        }

        prop_assert_eq!(m.current_position(), distance);
        prop_assert_eq!(steps, distance.abs());
    }
}
