//! Hardware capability traits.
//!
//! The module never talks to a vendor SDK directly. Motor controllers and
//! absolute encoders are reached through the traits below, following the
//! embedded-hal 1.0 pattern: each trait carries an associated error type that
//! can be classified with [`Error::kind`].
//!
//! Reads of the relative encoder are infallible; smart motor controllers
//! cache them from periodic status frames. Writes may be rejected.

pub mod as5600;
pub mod sim;

use core::fmt::Debug;

use crate::config::units::Degrees;
use crate::config::{
    ConversionFactors, CurrentLimit, ModuleConfig, NeutralMode, PidGains,
};

/// Hardware error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The device refused the request (bad parameter, wrong mode).
    Rejected,
    /// The device did not answer in time.
    Timeout,
    /// The device is not present on the bus.
    Disconnected,
    /// Bus-level failure (CAN/I2C error frame, arbitration loss).
    Bus,
    /// The device answered but flagged its own measurement as invalid.
    Signal,
    /// Anything else.
    Other,
}

/// Hardware error trait.
pub trait Error: Debug {
    /// Convert error to a generic error kind.
    fn kind(&self) -> ErrorKind;
}

impl Error for ErrorKind {
    #[inline]
    fn kind(&self) -> ErrorKind {
        *self
    }
}

impl Error for core::convert::Infallible {
    #[inline]
    fn kind(&self) -> ErrorKind {
        match *self {}
    }
}

/// Error type trait.
pub trait ErrorType {
    /// Error type
    type Error: Error;
}

impl<T: ErrorType + ?Sized> ErrorType for &mut T {
    type Error = T::Error;
}

/// Absolute, non-resettable heading sensor.
pub trait AbsoluteEncoder: ErrorType {
    /// Read the heading in degrees, nominally in `[0, 360)`.
    fn absolute_position(&mut self) -> Result<Degrees, Self::Error>;
}

impl<T: AbsoluteEncoder + ?Sized> AbsoluteEncoder for &mut T {
    #[inline]
    fn absolute_position(&mut self) -> Result<Degrees, Self::Error> {
        T::absolute_position(self)
    }
}

/// Relative encoder with a settable zero.
///
/// Units are whatever the conversion factors in [`MotorSettings`] produce:
/// meters and m/s for a drive motor, degrees for an angle motor.
pub trait RelativeEncoder: ErrorType {
    /// Current position.
    fn position(&self) -> f32;

    /// Current velocity.
    fn velocity(&self) -> f32;

    /// Overwrite the current position (sets the zero point).
    fn set_position(&mut self, position: f32) -> Result<(), Self::Error>;
}

impl<T: RelativeEncoder + ?Sized> RelativeEncoder for &mut T {
    #[inline]
    fn position(&self) -> f32 {
        T::position(self)
    }

    #[inline]
    fn velocity(&self) -> f32 {
        T::velocity(self)
    }

    #[inline]
    fn set_position(&mut self, position: f32) -> Result<(), Self::Error> {
        T::set_position(self, position)
    }
}

/// Closed-loop mode of a motor controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    /// Track a position setpoint.
    Position,
    /// Track a velocity setpoint.
    Velocity,
}

/// Which status frames the controller should publish at a high rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackUsage {
    /// Position only (angle motors).
    PositionOnly,
    /// Position and velocity (drive motors).
    All,
}

/// One-time configuration applied to a motor controller at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorSettings {
    /// CAN id of the controller.
    pub id: u8,
    /// Invert output direction.
    pub invert: bool,
    /// Behavior at zero output.
    pub neutral_mode: NeutralMode,
    /// Current limiting.
    pub current_limit: CurrentLimit,
    /// Onboard PID gains.
    pub pid: PidGains,
    /// Encoder position units per motor rotation.
    pub position_conversion: f32,
    /// Encoder velocity units per motor RPM.
    pub velocity_conversion: f32,
    /// Voltage the output is compensated to.
    pub voltage_compensation: f32,
    /// Open-loop ramp time in seconds.
    pub open_loop_ramp_s: f32,
    /// Closed-loop ramp time in seconds.
    pub closed_loop_ramp_s: f32,
    /// Status frame selection.
    pub feedback: FeedbackUsage,
}

impl MotorSettings {
    /// Settings for the drive motor of a module.
    pub fn drive(config: &ModuleConfig) -> Self {
        let factors = ConversionFactors::from_config(config);
        Self {
            id: config.constants.drive_motor_id,
            invert: config.drive.invert,
            neutral_mode: config.drive.neutral_mode,
            current_limit: config.drive.current_limit,
            pid: config.drive.pid,
            position_conversion: factors.drive_position,
            velocity_conversion: factors.drive_velocity,
            voltage_compensation: config.chassis.voltage_compensation,
            open_loop_ramp_s: config.drive.open_loop_ramp_s,
            closed_loop_ramp_s: config.drive.closed_loop_ramp_s,
            feedback: FeedbackUsage::All,
        }
    }

    /// Settings for the angle motor of a module.
    pub fn angle(config: &ModuleConfig) -> Self {
        let factors = ConversionFactors::from_config(config);
        Self {
            id: config.constants.angle_motor_id,
            invert: config.angle.invert,
            neutral_mode: config.angle.neutral_mode,
            current_limit: config.angle.current_limit,
            pid: config.angle.pid,
            position_conversion: factors.angle_position,
            velocity_conversion: factors.angle_position / 60.0,
            voltage_compensation: config.chassis.voltage_compensation,
            open_loop_ramp_s: 0.0,
            closed_loop_ramp_s: 0.0,
            feedback: FeedbackUsage::PositionOnly,
        }
    }
}

/// Smart motor controller with an integrated relative encoder and onboard PID.
pub trait MotorController: RelativeEncoder {
    /// Apply one-time configuration.
    fn configure(&mut self, settings: &MotorSettings) -> Result<(), Self::Error>;

    /// Drive with a fraction of full output, nominally `[-1, 1]`.
    fn set_percent_output(&mut self, output: f32) -> Result<(), Self::Error>;

    /// Run the onboard loop toward `setpoint` with an additive feedforward
    /// term in percent output.
    fn set_reference(
        &mut self,
        setpoint: f32,
        mode: ControlMode,
        feedforward: f32,
    ) -> Result<(), Self::Error>;
}

impl<T: MotorController + ?Sized> MotorController for &mut T {
    #[inline]
    fn configure(&mut self, settings: &MotorSettings) -> Result<(), Self::Error> {
        T::configure(self, settings)
    }

    #[inline]
    fn set_percent_output(&mut self, output: f32) -> Result<(), Self::Error> {
        T::set_percent_output(self, output)
    }

    #[inline]
    fn set_reference(
        &mut self,
        setpoint: f32,
        mode: ControlMode,
        feedforward: f32,
    ) -> Result<(), Self::Error> {
        T::set_reference(self, setpoint, mode, feedforward)
    }
}
