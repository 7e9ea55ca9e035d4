//! Configuration validation.

use heapless::Vec;

use crate::error::{ConfigError, Error, Result};

use super::axis::{CurrentLimit, PidGains};
use super::module::ModuleConfig;
use super::{SwerveConfig, MAX_MODULES};

/// Validate a system configuration.
///
/// Checks:
/// - Chassis parameters are positive and the jitter threshold is a fraction
/// - Gear ratios are positive
/// - Enabled current limits are positive, peaks finite and non-negative
/// - All gains are finite
/// - Every module offset is within [-360, 360]
/// - No drive or angle motor CAN id is used twice across the drivetrain
/// - No absolute encoder CAN id is used twice across the drivetrain
pub fn validate_config(config: &SwerveConfig) -> Result<()> {
    for module in config.module_configs() {
        validate_module(&module)?;
    }

    validate_unique_ids(config)
}

/// Validate the resolved configuration of a single module.
pub fn validate_module(config: &ModuleConfig) -> Result<()> {
    let chassis = &config.chassis;

    // Max speed must be positive
    if !is_positive(chassis.max_speed.0) {
        return Err(Error::Config(ConfigError::InvalidMaxSpeed(chassis.max_speed.0)));
    }

    if !is_positive(chassis.wheel_circumference.0) {
        return Err(Error::Config(ConfigError::InvalidWheelCircumference(
            chassis.wheel_circumference.0,
        )));
    }

    // Jitter threshold is a fraction of max speed
    if !(0.0..1.0).contains(&chassis.jitter_threshold) {
        return Err(Error::Config(ConfigError::InvalidJitterThreshold(
            chassis.jitter_threshold,
        )));
    }

    if !is_positive(chassis.voltage_compensation) {
        return Err(Error::Config(ConfigError::InvalidVoltage(
            chassis.voltage_compensation,
        )));
    }

    // Gear ratios must be positive
    for ratio in [config.drive.gear_ratio, config.angle.gear_ratio] {
        if !is_positive(ratio) {
            return Err(Error::Config(ConfigError::InvalidGearRatio(ratio)));
        }
    }

    validate_current_limit(&config.drive.current_limit)?;
    validate_current_limit(&config.angle.current_limit)?;

    validate_gains(&config.drive.pid)?;
    validate_gains(&config.angle.pid)?;

    let ff = &config.drive.feedforward;
    for gain in [ff.ks, ff.kv, ff.ka] {
        if !gain.is_finite() {
            return Err(Error::Config(ConfigError::InvalidGain(gain)));
        }
    }

    let offset = config.constants.angle_offset.0;
    if !offset.is_finite() || !(-360.0..=360.0).contains(&offset) {
        return Err(Error::Config(ConfigError::InvalidAngleOffset(offset)));
    }

    if config.constants.drive_motor_id == config.constants.angle_motor_id {
        return Err(Error::Config(ConfigError::DuplicateMotorId(
            config.constants.drive_motor_id,
        )));
    }

    Ok(())
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn validate_current_limit(limit: &CurrentLimit) -> Result<()> {
    if !limit.enabled {
        return Ok(());
    }

    if !is_positive(limit.continuous_amps) {
        return Err(Error::Config(ConfigError::InvalidCurrentLimit(
            limit.continuous_amps,
        )));
    }

    // Zero peak means no peak window
    for value in [limit.peak_amps, limit.peak_duration_s] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::Config(ConfigError::InvalidCurrentLimit(value)));
        }
    }

    Ok(())
}

/// Motors share one id space; absolute encoders are a separate device
/// class and only need to be distinct from each other.
fn validate_unique_ids(config: &SwerveConfig) -> Result<()> {
    let mut motors: Vec<u8, { 2 * MAX_MODULES }> = Vec::new();
    let mut encoders: Vec<u8, MAX_MODULES> = Vec::new();

    for constants in config.modules.values() {
        for id in [constants.drive_motor_id, constants.angle_motor_id] {
            if motors.contains(&id) || motors.push(id).is_err() {
                return Err(Error::Config(ConfigError::DuplicateMotorId(id)));
            }
        }

        let id = constants.absolute_encoder_id;
        if encoders.contains(&id) || encoders.push(id).is_err() {
            return Err(Error::Config(ConfigError::DuplicateEncoderId(id)));
        }
    }

    Ok(())
}

fn validate_gains(gains: &PidGains) -> Result<()> {
    match gains.iter().find(|g| !g.is_finite()) {
        Some(bad) => Err(Error::Config(ConfigError::InvalidGain(bad))),
        None => Ok(()),
    }
}
