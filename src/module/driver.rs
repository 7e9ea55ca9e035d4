//! Swerve module driver.
//!
//! Generic over the motor controller and absolute encoder types so that the
//! same control logic runs against real hardware and [`crate::hal::sim`].

use crate::config::units::{Degrees, Meters, MetersPerSec};
use crate::config::{ConversionFactors, ModuleConfig};
use crate::error::{ActuatorError, Axis, Error, ModuleError, Result};
use crate::hal::{AbsoluteEncoder, Error as _, MotorController};

use super::actuation::{AngleLoop, DriveLoop, DriveMode, SimpleMotorFeedforward};
use super::calibration::{CalibrationStatus, Calibrator};
use super::optimize::optimize;
use super::state::{ModulePosition, ModuleState};

/// One steerable, drivable wheel.
///
/// Generic over:
/// - `DRIVE`: drive motor controller (encoder in meters, m/s)
/// - `ANGLE`: angle motor controller (encoder in degrees)
/// - `ABS`: absolute heading sensor
///
/// Built with [`SwerveModuleBuilder`](super::SwerveModuleBuilder).
pub struct SwerveModule<DRIVE, ANGLE, ABS>
where
    DRIVE: MotorController,
    ANGLE: MotorController,
    ABS: AbsoluteEncoder,
{
    /// Immutable parameter set.
    config: ModuleConfig,

    /// Encoder unit conversions applied to both motors.
    conversions: ConversionFactors,

    drive_motor: DRIVE,
    angle_motor: ANGLE,
    absolute_encoder: ABS,

    /// Relative encoder zeroing and its status.
    calibrator: Calibrator,

    /// Steering loop, owns the last commanded heading.
    angle_loop: AngleLoop,

    drive_loop: DriveLoop,
}

impl<DRIVE, ANGLE, ABS> SwerveModule<DRIVE, ANGLE, ABS>
where
    DRIVE: MotorController,
    ANGLE: MotorController,
    ABS: AbsoluteEncoder,
{
    /// Assemble a module around already configured hardware.
    ///
    /// The held heading starts at wherever the angle encoder currently reads.
    pub(crate) fn new(
        config: ModuleConfig,
        drive_motor: DRIVE,
        angle_motor: ANGLE,
        absolute_encoder: ABS,
    ) -> Self {
        let conversions = ConversionFactors::from_config(&config);
        let calibrator = Calibrator::new(
            config.angle_offset(),
            config.chassis.absolute_encoder_invert,
        );
        let angle_loop = AngleLoop::new(
            config.chassis.jitter_speed(),
            Degrees(angle_motor.position()),
        );
        let drive_loop = DriveLoop::new(
            config.chassis.max_speed,
            SimpleMotorFeedforward::from(config.drive.feedforward),
        );

        Self {
            config,
            conversions,
            drive_motor,
            angle_motor,
            absolute_encoder,
            calibrator,
            angle_loop,
            drive_loop,
        }
    }

    /// Get the module name.
    #[inline]
    pub fn name(&self) -> &str {
        self.config.name.as_str()
    }

    /// Get the module configuration.
    #[inline]
    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    /// Get the encoder unit conversions.
    #[inline]
    pub fn conversions(&self) -> &ConversionFactors {
        &self.conversions
    }

    /// Command a desired wheel speed and heading.
    ///
    /// The state is optimized against the current encoder heading, the angle
    /// loop is commanded first and the drive loop second. Nothing is retried:
    /// if a motor rejects its command the error names the axis and that
    /// motor keeps its previous command.
    ///
    /// A state with a non-finite speed or heading is rejected before either
    /// motor is commanded, so the held heading is unchanged.
    pub fn set_desired_state(&mut self, desired: ModuleState, mode: DriveMode) -> Result<()> {
        if !desired.speed().0.is_finite() || !desired.heading().0.is_finite() {
            warn!("{}: ignoring non-finite desired state", self.config.name.as_str());
            return Err(ModuleError::NonFiniteState.into());
        }

        let current = Degrees(self.angle_motor.position());
        let optimized = optimize(desired, current);

        let heading = self.angle_loop.command(&mut self.angle_motor, &optimized)?;
        self.drive_loop
            .command(&mut self.drive_motor, optimized.state.speed(), mode)?;

        trace!(
            "{}: speed {} heading {}",
            self.config.name.as_str(),
            optimized.state.speed().0,
            heading.0
        );

        Ok(())
    }

    /// Stop the wheel.
    ///
    /// Zero open-loop output on the drive motor. The angle motor keeps its
    /// last position setpoint.
    pub fn stop(&mut self) -> Result<()> {
        self.drive_motor.set_percent_output(0.0).map_err(|e| {
            Error::Actuator(ActuatorError {
                axis: Axis::Drive,
                kind: e.kind(),
            })
        })
    }

    /// Measured wheel speed and heading.
    pub fn state(&self) -> ModuleState {
        ModuleState::new(
            MetersPerSec(self.drive_motor.velocity()),
            Degrees(self.angle_motor.position()),
        )
    }

    /// Measured wheel travel and heading, for odometry.
    pub fn position(&self) -> ModulePosition {
        ModulePosition::new(
            Meters(self.drive_motor.position()),
            Degrees(self.angle_motor.position()),
        )
    }

    /// Heading reported by the angle encoder, in `[0, 360)`.
    #[inline]
    pub fn heading(&self) -> Degrees {
        Degrees(self.angle_motor.position()).normalized()
    }

    /// Heading most recently sent to the angle motor, in the encoder's
    /// continuous domain.
    #[inline]
    pub fn last_commanded_heading(&self) -> Degrees {
        self.angle_loop.last_commanded()
    }

    /// Read the absolute sensor (inversion applied, offset not applied).
    pub fn absolute_heading(&mut self) -> Result<Degrees> {
        self.calibrator
            .read_absolute(&mut self.absolute_encoder)
            .map_err(Error::Sensor)
    }

    /// Re-derive the angle encoder zero from the absolute sensor.
    ///
    /// Must not be interleaved with [`set_desired_state`](Self::set_desired_state)
    /// from another context. On success the held heading is re-seeded to the
    /// new encoder reading so the next low-speed cycle does not swing the
    /// wheel back to a heading expressed in the old zero.
    pub fn reset_to_absolute(&mut self) -> Result<Degrees> {
        match self
            .calibrator
            .calibrate(&mut self.absolute_encoder, &mut self.angle_motor)
        {
            Ok(zero) => {
                self.angle_loop.reset(zero);
                info!(
                    "{}: angle encoder zeroed at {} deg (offset {})",
                    self.config.name.as_str(),
                    zero.0,
                    self.calibrator.offset().0
                );
                Ok(zero)
            }
            Err(e) => {
                error!("{}: calibration failed", self.config.name.as_str());
                Err(e)
            }
        }
    }

    /// Outcome of the most recent calibration.
    #[inline]
    pub fn calibration_status(&self) -> CalibrationStatus {
        self.calibrator.status()
    }

    /// Whether closed-loop heading commands can be trusted.
    #[inline]
    pub fn is_calibrated(&self) -> bool {
        self.calibrator.is_calibrated()
    }

    /// Zero the accumulated drive distance.
    pub fn reset_drive_distance(&mut self) -> Result<()> {
        self.drive_motor
            .set_position(0.0)
            .map_err(|_| ModuleError::ZeroWriteFailed(Axis::Drive).into())
    }

    /// Release the hardware.
    pub fn release(self) -> (DRIVE, ANGLE, ABS) {
        (self.drive_motor, self.angle_motor, self.absolute_encoder)
    }
}
