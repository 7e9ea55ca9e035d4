//! Chassis-wide parameters shared by every module.

use serde::Deserialize;

use super::units::{Meters, MetersPerSec};

/// Parameters common to all four modules.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ChassisConfig {
    /// Top wheel speed; open-loop output is `speed / max_speed`.
    #[serde(rename = "max_speed_mps")]
    pub max_speed: MetersPerSec,

    /// Fraction of `max_speed` at or below which the steering holds still.
    #[serde(default = "default_jitter_threshold")]
    pub jitter_threshold: f32,

    /// Wheel circumference.
    #[serde(rename = "wheel_circumference_m")]
    pub wheel_circumference: Meters,

    /// Nominal battery voltage the motor controllers compensate to.
    #[serde(default = "default_voltage_compensation")]
    pub voltage_compensation: f32,

    /// Absolute encoders count clockwise-positive.
    #[serde(default)]
    pub absolute_encoder_invert: bool,
}

fn default_jitter_threshold() -> f32 {
    0.01
}

fn default_voltage_compensation() -> f32 {
    12.0
}

impl ChassisConfig {
    /// Speed magnitude below which steering commands are suppressed.
    #[inline]
    pub fn jitter_speed(&self) -> f32 {
        self.max_speed.0 * self.jitter_threshold
    }
}
