//! Property-based tests for the shift logic and the auto-reverse toggle.

use proptest::prelude::*;
use robodrive_transmission::*;

fn gearbox_strategy() -> impl Strategy<Value = Gearbox> {
    (
        proptest::collection::vec(0.5f64..20.0, 2..8),
        200.0f64..2000.0,
        0.2f64..0.5,
    )
        .prop_map(|(mut forward, redline, wheel_radius)| {
            forward.sort_by(|a, b| b.total_cmp(a));
            let mut ratios = vec![-12.0, 0.0];
            ratios.extend(forward);
            let gear_count = i32::try_from(ratios.len()).unwrap_or(i32::MAX);
            Gearbox::new(ratios, 1, redline, wheel_radius, gear_count)
        })
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn upshift_point_exceeds_downshift_point_by_margin(
        gearbox in gearbox_strategy(),
        gear in 2i32..8,
    ) {
        let ctrl = TransmissionController::default();
        let gear = GearCommand::new(gear);
        let lower = GearCommand::new(gear.get() - 1);

        if let (Some(up), Some(down)) = (
            ctrl.upshift_threshold(&gearbox, lower),
            ctrl.downshift_threshold(&gearbox, gear),
        ) {
            prop_assert!(up - down >= 4.0 - 1e-9);
        }
    }

    #[test]
    fn no_oscillation_between_thresholds(
        gearbox in gearbox_strategy(),
        gear in 2i32..6,
        t in 0.0f64..1.0,
    ) {
        let ctrl = TransmissionController::default();
        let gear = GearCommand::new(gear);
        let lower = GearCommand::new(gear.get() - 1);

        if let (Some(up), Some(down)) = (
            ctrl.upshift_threshold(&gearbox, lower),
            ctrl.downshift_threshold(&gearbox, gear),
        ) {
            let speed = down + (up - down) * t;
            prop_assume!(speed > down && speed < up);

            // Whichever of the two gears the box is in, it stays there.
            let from_lower = ctrl.select(&gearbox, lower, speed);
            prop_assert_eq!(from_lower.gear, lower);
            let from_upper = ctrl.select(&gearbox, gear, speed);
            prop_assert!(from_upper.gear >= gear);
        }
    }

    #[test]
    fn selected_gear_never_below_first(
        gearbox in gearbox_strategy(),
        gear in -1i32..10,
        speed in -50.0f64..150.0,
    ) {
        let decision = TransmissionController::default().select(&gearbox, GearCommand::new(gear), speed);
        prop_assert!(decision.gear >= GearCommand::FIRST);
    }

    #[test]
    fn engaged_iff_reverse_gear(
        ticks in proptest::collection::vec((0.0f64..=1.0, 0.0f64..=1.0, -5.0f64..5.0), 1..200),
    ) {
        let mut ctrl = AutoReverseController::default();
        for (brake, accel, speed_x) in ticks {
            let out = ctrl.update(brake, accel, speed_x, GearCommand::FIRST);
            prop_assert_eq!(ctrl.is_engaged(), out.gear == GearCommand::REVERSE);
        }
    }
}

#[test]
fn forward_reverse_round_trip() {
    let mut ctrl = AutoReverseController::default();

    let out = ctrl.update(0.8, 0.0, 0.0, GearCommand::FIRST);
    assert_eq!(out.gear, GearCommand::REVERSE);
    assert!((out.accel - 0.8).abs() < f64::EPSILON);

    for _ in 0..10 {
        let out = ctrl.update(0.8, 0.0, -2.5, GearCommand::REVERSE);
        assert_eq!(out.transition, ReverseTransition::Held);
    }

    let out = ctrl.update(0.0, 0.5, -0.2, GearCommand::REVERSE);
    assert_eq!(out.transition, ReverseTransition::Released);
    assert_eq!(out.gear, GearCommand::FIRST);
    assert_eq!(ctrl.mode(), DriveMode::Forward);
}
