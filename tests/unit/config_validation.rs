//! Unit tests for configuration validation.

use swerve_module::config::{validate_config, validate_module, SwerveConfig};
use swerve_module::error::{ConfigError, Error};
use swerve_module::parse_config;

const VALID: &str = r#"
[chassis]
max_speed_mps = 4.1
wheel_circumference_m = 0.3192

[drive]
gear_ratio = 6.75
current_limit = { continuous_amps = 35.0 }
feedforward = { ks = 0.014, kv = 0.222 }

[angle]
gear_ratio = 21.428571
current_limit = { continuous_amps = 25.0 }

[modules.front_left]
drive_motor_id = 1
angle_motor_id = 2
absolute_encoder_id = 3
angle_offset_deg = -78.22
"#;

fn config(toml_str: &str) -> SwerveConfig {
    toml::from_str(toml_str).expect("Failed to parse TOML")
}

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    assert!(validate_config(&config(VALID)).is_ok());
}

/// Test validation fails for a non-positive max speed.
#[test]
fn test_zero_max_speed() {
    let result = validate_config(&config(&VALID.replace("max_speed_mps = 4.1", "max_speed_mps = 0.0")));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidMaxSpeed(_)))
    ));
}

/// Test validation fails for a negative gear ratio.
#[test]
fn test_negative_gear_ratio() {
    let result = validate_config(&config(&VALID.replace("gear_ratio = 6.75", "gear_ratio = -6.75")));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidGearRatio(_)))
    ));
}

/// Test validation fails for a jitter threshold that is not a fraction.
#[test]
fn test_jitter_threshold_range() {
    for bad in ["1.0", "-0.1", "2.5"] {
        let toml_str = VALID.replace(
            "wheel_circumference_m = 0.3192",
            &format!("wheel_circumference_m = 0.3192\njitter_threshold = {bad}"),
        );
        assert!(matches!(
            validate_config(&config(&toml_str)),
            Err(Error::Config(ConfigError::InvalidJitterThreshold(_)))
        ));
    }

    // Zero disables the hold entirely, except for an exactly stopped wheel
    let toml_str = VALID.replace(
        "wheel_circumference_m = 0.3192",
        "wheel_circumference_m = 0.3192\njitter_threshold = 0.0",
    );
    assert!(validate_config(&config(&toml_str)).is_ok());
}

/// Test validation of the calibration offset bounds.
#[test]
fn test_angle_offset_bounds() {
    for (offset, ok) in [("-360.0", true), ("360.0", true), ("360.5", false), ("-1000.0", false)] {
        let toml_str = VALID.replace("angle_offset_deg = -78.22", &format!("angle_offset_deg = {offset}"));
        let result = validate_config(&config(&toml_str));
        assert_eq!(result.is_ok(), ok, "offset {offset}");
        if !ok {
            assert!(matches!(
                result,
                Err(Error::Config(ConfigError::InvalidAngleOffset(_)))
            ));
        }
    }
}

/// Test validation fails when a module reuses a motor id.
#[test]
fn test_duplicate_motor_id() {
    let result = validate_config(&config(&VALID.replace("angle_motor_id = 2", "angle_motor_id = 1")));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::DuplicateMotorId(1)))
    ));
}

fn with_second_module(drive: u8, angle: u8, encoder: u8) -> String {
    format!(
        "{}\n[modules.front_right]\ndrive_motor_id = {drive}\nangle_motor_id = {angle}\nabsolute_encoder_id = {encoder}\nangle_offset_deg = 150.0\n",
        VALID
    )
}

/// Test validation fails when another module reuses a motor id.
#[test]
fn test_motor_id_reused_across_modules() {
    assert!(validate_config(&config(&with_second_module(4, 5, 6))).is_ok());

    // Same ids as front_left on every device
    assert!(matches!(
        validate_config(&config(&with_second_module(1, 2, 3))),
        Err(Error::Config(ConfigError::DuplicateMotorId(1)))
    ));

    // front_left's angle motor reused as a drive motor
    assert!(matches!(
        validate_config(&config(&with_second_module(2, 5, 6))),
        Err(Error::Config(ConfigError::DuplicateMotorId(2)))
    ));

    assert!(matches!(
        parse_config(&with_second_module(4, 1, 6)),
        Err(Error::Config(ConfigError::DuplicateMotorId(1)))
    ));
}

/// Test validation fails when two modules share an absolute encoder id.
#[test]
fn test_encoder_id_reused_across_modules() {
    assert!(matches!(
        validate_config(&config(&with_second_module(4, 5, 3))),
        Err(Error::Config(ConfigError::DuplicateEncoderId(3)))
    ));

    // Encoders are a separate device class from motors
    assert!(validate_config(&config(&with_second_module(4, 5, 1))).is_ok());
}

/// Test validation of the peak current window.
#[test]
fn test_peak_current_must_be_finite_and_non_negative() {
    for peak in [
        "peak_amps = nan",
        "peak_amps = inf",
        "peak_amps = -40.0",
        "peak_duration_s = nan",
        "peak_duration_s = -0.1",
    ] {
        let toml_str = VALID.replace(
            "current_limit = { continuous_amps = 35.0 }",
            &format!("current_limit = {{ continuous_amps = 35.0, {peak} }}"),
        );
        assert!(
            matches!(
                parse_config(&toml_str),
                Err(Error::Config(ConfigError::InvalidCurrentLimit(_)))
            ),
            "{peak}"
        );
    }

    let toml_str = VALID.replace(
        "current_limit = { continuous_amps = 35.0 }",
        "current_limit = { continuous_amps = 35.0, peak_amps = 60.0, peak_duration_s = 0.1 }",
    );
    assert!(parse_config(&toml_str).is_ok());

    // Not checked when limiting is off
    let toml_str = VALID.replace(
        "current_limit = { continuous_amps = 35.0 }",
        "current_limit = { continuous_amps = 35.0, peak_amps = nan, enabled = false }",
    );
    assert!(parse_config(&toml_str).is_ok());
}

/// Test that a disabled current limit is not checked.
#[test]
fn test_disabled_current_limit() {
    let enabled = VALID.replace(
        "current_limit = { continuous_amps = 25.0 }",
        "current_limit = { continuous_amps = 0.0 }",
    );
    assert!(matches!(
        validate_config(&config(&enabled)),
        Err(Error::Config(ConfigError::InvalidCurrentLimit(_)))
    ));

    let disabled = VALID.replace(
        "current_limit = { continuous_amps = 25.0 }",
        "current_limit = { continuous_amps = 0.0, enabled = false }",
    );
    assert!(validate_config(&config(&disabled)).is_ok());
}

/// Test that a single resolved module is validated the same way.
#[test]
fn test_validate_single_module() {
    let swerve = config(VALID);
    let mut module = swerve.module_config("front_left").expect("Module not found");
    assert!(validate_module(&module).is_ok());

    module.chassis.voltage_compensation = 0.0;
    assert!(matches!(
        validate_module(&module),
        Err(Error::Config(ConfigError::InvalidVoltage(_)))
    ));

    module.chassis.voltage_compensation = 12.0;
    module.angle.pid.kp = f32::NAN;
    assert!(matches!(
        validate_module(&module),
        Err(Error::Config(ConfigError::InvalidGain(_)))
    ));
}
