//! Unit tests for TOML configuration parsing.

use swerve_module::config::{load_config, parse_config, NeutralMode, SwerveConfig};
use swerve_module::error::{ConfigError, Error};

const CHASSIS: &str = r#"
[chassis]
max_speed_mps = 4.1
wheel_circumference_m = 0.3192

[drive]
gear_ratio = 6.75
current_limit = { continuous_amps = 35.0 }

[angle]
gear_ratio = 21.428571
current_limit = { continuous_amps = 25.0 }
"#;

/// Test parsing a module with every default left in place.
#[test]
fn test_parse_defaults() {
    let toml_str = format!(
        "{CHASSIS}
[modules.front_left]
drive_motor_id = 1
angle_motor_id = 2
absolute_encoder_id = 3
angle_offset_deg = 12.5
"
    );

    let config: SwerveConfig = toml::from_str(&toml_str).expect("Failed to parse TOML");

    assert_eq!(config.chassis.jitter_threshold, 0.01);
    assert_eq!(config.chassis.voltage_compensation, 12.0);
    assert!(!config.chassis.absolute_encoder_invert);
    assert_eq!(config.drive.neutral_mode, NeutralMode::Brake);
    assert_eq!(config.angle.neutral_mode, NeutralMode::Coast);
    assert!(config.drive.current_limit.enabled);
    assert_eq!(config.drive.feedforward.ks, 0.0);

    let module = config.module("front_left").expect("Module not found");
    assert_eq!(module.absolute_encoder_id, 3);
    assert_eq!(module.angle_offset.0, 12.5);
}

/// Test parsing tuned gains and limits.
#[test]
fn test_parse_tuning() {
    let toml_str = r#"
[chassis]
max_speed_mps = 4.5
jitter_threshold = 0.02
wheel_circumference_m = 0.3192
voltage_compensation = 11.5
absolute_encoder_invert = true

[drive]
gear_ratio = 6.12
invert = true
neutral_mode = "coast"
open_loop_ramp_s = 0.25
closed_loop_ramp_s = 0.1

[drive.current_limit]
continuous_amps = 35.0
peak_amps = 60.0
peak_duration_s = 0.1

[drive.pid]
kp = 0.1
ki = 0.001

[drive.feedforward]
ks = 0.014
kv = 0.222
ka = 0.029

[angle]
gear_ratio = 21.428571
neutral_mode = "brake"
current_limit = { continuous_amps = 20.0, enabled = false }
pid = { kp = 0.01, kd = 0.0002 }
"#;

    let config = parse_config(toml_str).expect("Failed to parse TOML");

    assert!((config.chassis.jitter_speed() - 0.09).abs() < 1e-6);
    assert!(config.chassis.absolute_encoder_invert);
    assert!(config.drive.invert);
    assert_eq!(config.drive.neutral_mode, NeutralMode::Coast);
    assert_eq!(config.drive.current_limit.peak_amps, 60.0);
    assert!((config.drive.pid.ki - 0.001).abs() < 1e-7);
    assert!((config.drive.feedforward.kv - 0.222).abs() < 1e-6);
    assert_eq!(config.angle.neutral_mode, NeutralMode::Brake);
    assert!(!config.angle.current_limit.enabled);
    assert!((config.angle.pid.kd - 0.0002).abs() < 1e-8);
    assert_eq!(config.modules.len(), 0);
}

/// Test that shared sections are merged into each resolved module.
#[test]
fn test_module_config_resolution() {
    let toml_str = format!(
        "{CHASSIS}
[modules.front_left]
drive_motor_id = 1
angle_motor_id = 2
absolute_encoder_id = 3
angle_offset_deg = 12.5

[modules.front_right]
drive_motor_id = 4
angle_motor_id = 5
absolute_encoder_id = 6
angle_offset_deg = -40.0
"
    );

    let config = parse_config(&toml_str).expect("Failed to parse TOML");
    let resolved = config.module_config("front_right").expect("Module not found");

    assert_eq!(resolved.name.as_str(), "front_right");
    assert_eq!(resolved.constants.angle_motor_id, 5);
    assert_eq!(resolved.angle_offset().0, -40.0);
    assert_eq!(resolved.chassis, config.chassis);
    assert_eq!(resolved.drive, config.drive);
    assert_eq!(config.module_configs().count(), 2);
    assert!(config.module_config("back_left").is_none());
}

/// Test that a missing required field is a parse error.
#[test]
fn test_missing_required_field() {
    let toml_str = format!(
        "{CHASSIS}
[modules.front_left]
drive_motor_id = 1
angle_motor_id = 2
angle_offset_deg = 12.5
"
    );

    let result = parse_config(&toml_str);
    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}

/// Test that more modules than a drivetrain can hold is rejected.
#[test]
fn test_too_many_modules() {
    let mut toml_str = String::from(CHASSIS);
    for i in 0..5u8 {
        toml_str.push_str(&format!(
            "
[modules.m{i}]
drive_motor_id = {}
angle_motor_id = {}
absolute_encoder_id = {}
angle_offset_deg = 0.0
",
            i * 3,
            i * 3 + 1,
            i * 3 + 2
        ));
    }

    assert!(parse_config(&toml_str).is_err());
}

/// Test unknown neutral mode values.
#[test]
fn test_unknown_neutral_mode() {
    let toml_str = CHASSIS.replace(
        "gear_ratio = 6.75",
        "gear_ratio = 6.75\nneutral_mode = \"freewheel\"",
    );

    assert!(matches!(
        parse_config(&toml_str),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test loading from a file on disk.
#[test]
fn test_load_config_file() {
    let path = std::env::temp_dir().join("swerve_module_load_config_test.toml");
    let toml_str = format!(
        "{CHASSIS}
[modules.back_left]
drive_motor_id = 7
angle_motor_id = 8
absolute_encoder_id = 9
angle_offset_deg = 0.0
"
    );
    std::fs::write(&path, toml_str).expect("Failed to write temp config");

    let config = load_config(&path).expect("Failed to load config");
    assert!(config.module("back_left").is_some());

    let _ = std::fs::remove_file(&path);
}
