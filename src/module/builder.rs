//! Builder pattern for SwerveModule.

use crate::config::{validate_module, ModuleConfig, SwerveConfig};
use crate::error::{Axis, ConfigError, Error, ModuleError, Result};
use crate::hal::{AbsoluteEncoder, MotorController, MotorSettings};

use super::driver::SwerveModule;

/// Builder for creating SwerveModule instances.
pub struct SwerveModuleBuilder<DRIVE, ANGLE, ABS>
where
    DRIVE: MotorController,
    ANGLE: MotorController,
    ABS: AbsoluteEncoder,
{
    drive_motor: Option<DRIVE>,
    angle_motor: Option<ANGLE>,
    absolute_encoder: Option<ABS>,
    config: Option<ModuleConfig>,
}

impl<DRIVE, ANGLE, ABS> Default for SwerveModuleBuilder<DRIVE, ANGLE, ABS>
where
    DRIVE: MotorController,
    ANGLE: MotorController,
    ABS: AbsoluteEncoder,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<DRIVE, ANGLE, ABS> SwerveModuleBuilder<DRIVE, ANGLE, ABS>
where
    DRIVE: MotorController,
    ANGLE: MotorController,
    ABS: AbsoluteEncoder,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            drive_motor: None,
            angle_motor: None,
            absolute_encoder: None,
            config: None,
        }
    }

    /// Set the drive motor controller.
    pub fn drive_motor(mut self, motor: DRIVE) -> Self {
        self.drive_motor = Some(motor);
        self
    }

    /// Set the angle motor controller.
    pub fn angle_motor(mut self, motor: ANGLE) -> Self {
        self.angle_motor = Some(motor);
        self
    }

    /// Set the absolute heading sensor.
    pub fn absolute_encoder(mut self, encoder: ABS) -> Self {
        self.absolute_encoder = Some(encoder);
        self
    }

    /// Configure from a resolved ModuleConfig.
    pub fn from_module_config(mut self, config: ModuleConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Configure from SwerveConfig by module name.
    pub fn from_config(self, config: &SwerveConfig, module_name: &str) -> Result<Self> {
        let module_config = config.module_config(module_name).ok_or_else(|| {
            Error::Config(ConfigError::ModuleNotFound(
                heapless::String::try_from(module_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_module_config(module_config))
    }

    /// Build the SwerveModule.
    ///
    /// Validates the configuration, applies the one-time motor settings,
    /// zeroes the drive encoder and calibrates the angle encoder.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or any hardware is missing, the
    /// configuration is invalid, or a motor rejects its settings or zero.
    /// An unusable absolute reading does not fail the build: the module is
    /// returned with a `Faulted` calibration status.
    pub fn build(self) -> Result<SwerveModule<DRIVE, ANGLE, ABS>> {
        let config = self
            .config
            .ok_or(Error::Config(ConfigError::MissingField("module configuration")))?;

        validate_module(&config)?;

        let mut drive_motor = self
            .drive_motor
            .ok_or(Error::Config(ConfigError::MissingField("drive_motor")))?;
        let mut angle_motor = self
            .angle_motor
            .ok_or(Error::Config(ConfigError::MissingField("angle_motor")))?;
        let absolute_encoder = self
            .absolute_encoder
            .ok_or(Error::Config(ConfigError::MissingField("absolute_encoder")))?;

        drive_motor
            .configure(&MotorSettings::drive(&config))
            .map_err(|_| ModuleError::ConfigureFailed(Axis::Drive))?;
        angle_motor
            .configure(&MotorSettings::angle(&config))
            .map_err(|_| ModuleError::ConfigureFailed(Axis::Angle))?;
        debug!(
            "{}: motors {} and {} configured",
            config.name.as_str(),
            config.constants.drive_motor_id,
            config.constants.angle_motor_id
        );

        drive_motor
            .set_position(0.0)
            .map_err(|_| ModuleError::ZeroWriteFailed(Axis::Drive))?;

        let mut module = SwerveModule::new(config, drive_motor, angle_motor, absolute_encoder);

        match module.reset_to_absolute() {
            Ok(_) => {}
            // Already logged; the caller checks `is_calibrated`
            Err(Error::Sensor(_)) => {}
            Err(e) => return Err(e),
        }

        Ok(module)
    }
}

impl<DRIVE, ANGLE, ABS> SwerveModule<DRIVE, ANGLE, ABS>
where
    DRIVE: MotorController,
    ANGLE: MotorController,
    ABS: AbsoluteEncoder,
{
    /// Start building a module.
    pub fn builder() -> SwerveModuleBuilder<DRIVE, ANGLE, ABS> {
        SwerveModuleBuilder::new()
    }
}
