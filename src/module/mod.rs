//! Per-wheel swerve module control.
//!
//! - [`optimize`]: minimal-rotation equivalent of a desired state
//! - [`Calibrator`]: relative encoder zero from the absolute sensor
//! - [`AngleLoop`] / [`DriveLoop`]: one control loop per axis
//! - [`SwerveModule`]: the composition consumed by the chassis solver

mod actuation;
mod builder;
mod calibration;
mod driver;
mod optimize;
mod state;

pub use actuation::{AngleLoop, DriveLoop, DriveMode, SimpleMotorFeedforward};
pub use builder::SwerveModuleBuilder;
pub use calibration::{CalibrationStatus, Calibrator};
pub use driver::SwerveModule;
pub use optimize::{optimize, Optimized, FLIP_THRESHOLD};
pub use state::{ModulePosition, ModuleState};
