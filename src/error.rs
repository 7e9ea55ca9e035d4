//! Error types for swerve-module library.
//!
//! Provides unified error handling across configuration, calibration and actuation.

use core::fmt;

use crate::hal::ErrorKind;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all swerve-module operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Absolute sensor fault during calibration
    Sensor(SensorError),
    /// Hardware rejected an actuator command
    Actuator(ActuatorError),
    /// Module construction or usage error
    Module(ModuleError),
}

/// Configuration-related errors.
///
/// Any of these is fatal at construction: the module is not built.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Module name not found in configuration
    ModuleNotFound(heapless::String<32>),
    /// Invalid gear ratio (must be > 0)
    InvalidGearRatio(f32),
    /// Invalid max speed (must be > 0)
    InvalidMaxSpeed(f32),
    /// Invalid wheel circumference (must be > 0)
    InvalidWheelCircumference(f32),
    /// Invalid jitter threshold (must be in [0, 1))
    InvalidJitterThreshold(f32),
    /// Invalid compensation voltage (must be > 0)
    InvalidVoltage(f32),
    /// Invalid current limit: when enabled, the continuous limit must be > 0
    /// and the peak current and duration finite and >= 0
    InvalidCurrentLimit(f32),
    /// A PID or feedforward gain is not finite
    InvalidGain(f32),
    /// Calibration offset is not finite or outside [-360, 360]
    InvalidAngleOffset(f32),
    /// A motor CAN id is used twice. Drive and angle motor ids of every
    /// module share one id space, so this covers both axes of one module and
    /// any motor of another module.
    DuplicateMotorId(u8),
    /// Two modules use the same absolute encoder CAN id
    DuplicateEncoderId(u8),
    /// A required builder input (hardware or configuration) was not supplied
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Absolute sensor faults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    /// The sensor could not be read
    Read(ErrorKind),
    /// The sensor returned a value outside [0, 360] degrees (or not a number)
    OutOfRange(f32),
}

/// Physical axis of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Wheel drive motor
    Drive,
    /// Steering (angle) motor
    Angle,
}

/// Actuator command faults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorError {
    /// Which motor rejected the command
    pub axis: Axis,
    /// Kind of hardware failure
    pub kind: ErrorKind,
}

/// Module-level errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleError {
    /// Applying one-time motor configuration failed
    ConfigureFailed(Axis),
    /// Writing the relative encoder zero failed
    ZeroWriteFailed(Axis),
    /// A desired speed or heading was NaN or infinite
    NonFiniteState,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Sensor(e) => write!(f, "Sensor fault: {}", e),
            Error::Actuator(e) => write!(f, "Actuator fault: {}", e),
            Error::Module(e) => write!(f, "Module error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::ModuleNotFound(name) => write!(f, "Module '{}' not found", name),
            ConfigError::InvalidGearRatio(v) => write!(f, "Invalid gear ratio: {}. Must be > 0", v),
            ConfigError::InvalidMaxSpeed(v) => write!(f, "Invalid max speed: {}. Must be > 0", v),
            ConfigError::InvalidWheelCircumference(v) => {
                write!(f, "Invalid wheel circumference: {}. Must be > 0", v)
            }
            ConfigError::InvalidJitterThreshold(v) => {
                write!(f, "Invalid jitter threshold: {}. Must be in [0, 1)", v)
            }
            ConfigError::InvalidVoltage(v) => write!(f, "Invalid compensation voltage: {}. Must be > 0", v),
            ConfigError::InvalidCurrentLimit(v) => write!(f, "Invalid current limit: {}", v),
            ConfigError::InvalidGain(v) => write!(f, "Invalid gain: {}. Must be finite", v),
            ConfigError::InvalidAngleOffset(v) => {
                write!(f, "Invalid angle offset: {}. Must be within [-360, 360]", v)
            }
            ConfigError::DuplicateMotorId(id) => {
                write!(f, "Motor CAN id {} is used more than once", id)
            }
            ConfigError::DuplicateEncoderId(id) => {
                write!(f, "Absolute encoder CAN id {} is used more than once", id)
            }
            ConfigError::MissingField(what) => write!(f, "{} is required", what),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::Read(kind) => write!(f, "absolute sensor read failed ({:?})", kind),
            SensorError::OutOfRange(v) => {
                write!(f, "absolute sensor reading {} outside [0, 360]", v)
            }
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Drive => write!(f, "drive"),
            Axis::Angle => write!(f, "angle"),
        }
    }
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} motor rejected command ({:?})", self.axis, self.kind)
    }
}

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleError::ConfigureFailed(axis) => write!(f, "Failed to configure {} motor", axis),
            ModuleError::ZeroWriteFailed(axis) => {
                write!(f, "Failed to write {} encoder position", axis)
            }
            ModuleError::NonFiniteState => write!(f, "Desired state is not finite"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Error::Sensor(e)
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Error::Actuator(e)
    }
}

impl From<ModuleError> for Error {
    fn from(e: ModuleError) -> Self {
        Error::Module(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for SensorError {}

#[cfg(feature = "std")]
impl std::error::Error for ActuatorError {}

#[cfg(feature = "std")]
impl std::error::Error for ModuleError {}
