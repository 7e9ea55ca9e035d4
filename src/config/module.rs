//! Per-module identity and the resolved configuration bundle.

use heapless::String;
use serde::Deserialize;

use super::axis::{AngleConfig, DriveConfig};
use super::chassis::ChassisConfig;
use super::units::Degrees;

/// Hardware ids and calibration offset for one wheel, from TOML.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ModuleConstants {
    /// CAN id of the drive motor controller.
    pub drive_motor_id: u8,

    /// CAN id of the angle motor controller.
    pub angle_motor_id: u8,

    /// CAN id of the absolute encoder.
    pub absolute_encoder_id: u8,

    /// Absolute encoder reading when the wheel points true forward.
    #[serde(rename = "angle_offset_deg")]
    pub angle_offset: Degrees,
}

impl ModuleConstants {
    /// Create module constants.
    pub const fn new(
        drive_motor_id: u8,
        angle_motor_id: u8,
        absolute_encoder_id: u8,
        angle_offset: Degrees,
    ) -> Self {
        Self {
            drive_motor_id,
            angle_motor_id,
            absolute_encoder_id,
            angle_offset,
        }
    }
}

/// Everything one module needs, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleConfig {
    /// Module name (e.g. `front_left`).
    pub name: String<32>,
    /// Ids and offset.
    pub constants: ModuleConstants,
    /// Shared chassis parameters.
    pub chassis: ChassisConfig,
    /// Drive motor parameters.
    pub drive: DriveConfig,
    /// Angle motor parameters.
    pub angle: AngleConfig,
}

impl ModuleConfig {
    /// Calibration offset of this module.
    #[inline]
    pub fn angle_offset(&self) -> Degrees {
        self.constants.angle_offset
    }
}
