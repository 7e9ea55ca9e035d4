//! Encoder conversion factors derived from module configuration.

use super::module::ModuleConfig;

/// Factors that turn raw motor rotations into wheel units.
///
/// Computed once at construction and loaded onto the motor controllers so
/// that encoder reads come back in meters, m/s and degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionFactors {
    /// Meters of wheel travel per drive motor rotation.
    pub drive_position: f32,

    /// m/s of wheel speed per drive motor RPM.
    pub drive_velocity: f32,

    /// Degrees of module rotation per angle motor rotation.
    pub angle_position: f32,
}

impl ConversionFactors {
    /// Compute conversion factors from module configuration.
    pub fn from_config(config: &ModuleConfig) -> Self {
        let drive_position = config.chassis.wheel_circumference.0 / config.drive.gear_ratio;

        Self {
            drive_position,
            drive_velocity: drive_position / 60.0,
            angle_position: 360.0 / config.angle.gear_ratio,
        }
    }

    /// Convert drive motor rotations to meters.
    #[inline]
    pub fn rotations_to_meters(&self, rotations: f32) -> f32 {
        rotations * self.drive_position
    }

    /// Convert drive motor RPM to m/s.
    #[inline]
    pub fn rpm_to_meters_per_sec(&self, rpm: f32) -> f32 {
        rpm * self.drive_velocity
    }

    /// Convert angle motor rotations to module degrees.
    #[inline]
    pub fn rotations_to_degrees(&self, rotations: f32) -> f32 {
        rotations * self.angle_position
    }
}
