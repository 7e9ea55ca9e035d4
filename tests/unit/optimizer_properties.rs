//! Property tests for state optimization, calibration and anti-jitter.

use proptest::prelude::*;

use swerve_module::config::units::{Degrees, MetersPerSec};
use swerve_module::hal::sim::{SimAbsoluteEncoder, SimMotor};
use swerve_module::hal::RelativeEncoder;
use swerve_module::module::{optimize, AngleLoop, Calibrator, ModuleState, FLIP_THRESHOLD};

const EPS: f32 = 1e-3;

fn state(speed: f32, heading: f32) -> ModuleState {
    ModuleState::new(MetersPerSec(speed), Degrees(heading))
}

/// Angular distance between two headings, in `[0, 180]`.
fn distance(a: Degrees, b: Degrees) -> f32 {
    a.delta_from(b).0.abs()
}

proptest! {
    #[test]
    fn setpoint_within_ninety_of_current(
        speed in -5.0f32..5.0,
        heading in 0.0f32..360.0,
        current in -1080.0f32..1080.0,
    ) {
        let out = optimize(state(speed, heading), Degrees(current));

        prop_assert!((out.setpoint.0 - current).abs() <= FLIP_THRESHOLD.0 + EPS);
        prop_assert!(distance(out.state.heading(), Degrees(current)) <= FLIP_THRESHOLD.0 + EPS);
    }

    #[test]
    fn wheel_velocity_is_preserved(
        speed in -5.0f32..5.0,
        heading in 0.0f32..360.0,
        current in -1080.0f32..1080.0,
    ) {
        let desired = state(speed, heading);
        let out = optimize(desired, Degrees(current));

        let (x0, y0) = desired.velocity();
        let (x1, y1) = out.state.velocity();
        prop_assert!((x0 - x1).abs() < EPS, "x {} != {}", x0, x1);
        prop_assert!((y0 - y1).abs() < EPS, "y {} != {}", y0, y1);
        prop_assert_eq!(out.state.speed().abs(), speed.abs());
    }

    #[test]
    fn reoptimizing_is_a_no_op(
        speed in -5.0f32..5.0,
        heading in 0.0f32..360.0,
        current in -1080.0f32..1080.0,
    ) {
        // Rounding can land either side of the flip boundary
        let delta = Degrees(heading).delta_from(Degrees(current)).0.abs();
        prop_assume!((delta - FLIP_THRESHOLD.0).abs() > 0.01);

        let once = optimize(state(speed, heading), Degrees(current));
        let twice = optimize(once.state, Degrees(current));

        prop_assert_eq!(twice.state.speed(), once.state.speed());
        prop_assert!(distance(twice.state.heading(), once.state.heading()) < EPS);
        prop_assert!((twice.setpoint.0 - once.setpoint.0).abs() < EPS);
    }

    #[test]
    fn calibration_zero_is_absolute_minus_offset(
        offset in -360.0f32..=360.0,
        absolute in 0.0f32..=360.0,
        boot_position in -10_000.0f32..10_000.0,
    ) {
        let mut calibrator = Calibrator::new(Degrees(offset), false);
        let mut sensor = SimAbsoluteEncoder::new(absolute);
        let mut encoder = SimMotor::frozen();
        encoder.set_measured_position(boot_position);

        let zero = calibrator.calibrate(&mut sensor, &mut encoder).unwrap();

        prop_assert!((0.0..360.0).contains(&zero.0));
        prop_assert_eq!(encoder.position(), zero.0);
        prop_assert!(distance(zero, Degrees(absolute - offset)) < EPS);
    }

    #[test]
    fn low_speed_never_moves_steering(
        held in 0.0f32..360.0,
        commands in prop::collection::vec((-0.041f32..=0.041, 0.0f32..360.0), 1..20),
    ) {
        let mut angle = AngleLoop::new(0.041, Degrees(held));
        let mut motor = SimMotor::new();
        motor.set_measured_position(held);

        for (speed, heading) in commands {
            let out = optimize(state(speed, heading), Degrees(motor.position()));
            let target = angle.command(&mut motor, &out).unwrap();

            prop_assert_eq!(target.0, held);
            prop_assert_eq!(angle.last_commanded().0, held);
        }
    }
}

#[test]
fn exact_boundary_is_not_flipped() {
    for current in [0.0, 45.0, 359.0, -720.0, 1000.0] {
        let out = optimize(state(1.0, current + 90.0), Degrees(current));
        assert_eq!(out.state.speed().0, 1.0, "current {current}");
    }
}
