//! Example: Configuration-driven swerve drivetrain on simulated hardware.
//!
//! This example demonstrates how to:
//! - Parse chassis, motor and module configuration from TOML
//! - Build all four modules with calibration from the absolute encoders
//! - Drive them through a few control cycles in open and closed loop
//!
//! Run with: `cargo run --example sim_module --features std`

use swerve_module::{
    config::units::UnitExt,
    error::Result,
    hal::sim::{SimAbsoluteEncoder, SimMotor},
    parse_config, DriveMode, ModuleState, SwerveModule,
};

const CONFIG: &str = r#"
[chassis]
max_speed_mps = 4.1
wheel_circumference_m = 0.3192

[drive]
gear_ratio = 6.75
open_loop_ramp_s = 0.25
current_limit = { continuous_amps = 35.0, peak_amps = 60.0, peak_duration_s = 0.1 }
pid = { kp = 0.05 }
feedforward = { ks = 0.01405, kv = 0.22238, ka = 0.02896 }

[angle]
gear_ratio = 21.428571
invert = true
current_limit = { continuous_amps = 25.0, peak_amps = 40.0, peak_duration_s = 0.1 }
pid = { kp = 0.01 }

[modules.front_left]
drive_motor_id = 1
angle_motor_id = 2
absolute_encoder_id = 3
angle_offset_deg = -78.22

[modules.front_right]
drive_motor_id = 4
angle_motor_id = 5
absolute_encoder_id = 6
angle_offset_deg = 206.71

[modules.back_left]
drive_motor_id = 7
angle_motor_id = 8
absolute_encoder_id = 9
angle_offset_deg = 33.4

[modules.back_right]
drive_motor_id = 10
angle_motor_id = 11
absolute_encoder_id = 12
angle_offset_deg = 281.0
"#;

type SimModule = SwerveModule<SimMotor, SimMotor, SimAbsoluteEncoder>;

fn main() -> Result<()> {
    println!("=== Simulated Swerve Drivetrain ===\n");

    let config = parse_config(CONFIG)?;

    // Wheels resting wherever they were left at power-off
    let resting = [0.0, 120.0, 200.0, 359.0];

    let mut modules: Vec<SimModule> = Vec::new();
    for (name, absolute) in config.module_names().zip(resting) {
        let module = SwerveModule::builder()
            .from_config(&config, name)?
            .drive_motor(SimMotor::new().with_free_speed(config.chassis.max_speed.0))
            .angle_motor(SimMotor::new())
            .absolute_encoder(SimAbsoluteEncoder::new(absolute))
            .build()?;

        println!(
            "{:<12} absolute {:>6.2} -> heading {:>6.2} ({:?})",
            module.name(),
            absolute,
            module.heading().0,
            module.calibration_status()
        );
        modules.push(module);
    }

    let cycles = [
        ("forward", ModuleState::new(2.0_f32.meters_per_sec(), 0.0_f32.degrees()), DriveMode::OpenLoop),
        ("strafe left", ModuleState::new(2.0_f32.meters_per_sec(), 90.0_f32.degrees()), DriveMode::OpenLoop),
        ("reverse", ModuleState::new(1.0_f32.meters_per_sec(), 180.0_f32.degrees()), DriveMode::ClosedLoop),
        ("coast", ModuleState::new(0.01_f32.meters_per_sec(), 45.0_f32.degrees()), DriveMode::ClosedLoop),
    ];

    for (label, desired, mode) in cycles {
        println!(
            "\n--- {} ({:.2} m/s at {:.1} deg, {:?}) ---",
            label,
            desired.speed().0,
            desired.heading().0,
            mode
        );

        for module in modules.iter_mut() {
            module.set_desired_state(desired, mode)?;

            let state = module.state();
            println!(
                "{:<12} speed {:>6.2} m/s  heading {:>6.2}  held {:>7.2}",
                module.name(),
                state.speed().0,
                state.heading().0,
                module.last_commanded_heading().0
            );
        }
    }

    for module in modules.iter_mut() {
        module.stop()?;
    }
    println!("\nAll modules stopped.");

    Ok(())
}
