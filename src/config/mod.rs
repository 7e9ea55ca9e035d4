//! Configuration module for swerve-module.
//!
//! Provides the immutable parameter set of a module (ids, calibration offset,
//! gear ratios, limits and gains) loaded from TOML files (with `std` feature)
//! or built in code.

mod axis;
mod chassis;
mod conversion;
mod module;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::{AngleConfig, CurrentLimit, DriveConfig, FeedforwardGains, NeutralMode, PidGains};
pub use chassis::ChassisConfig;
pub use conversion::ConversionFactors;
pub use module::{ModuleConfig, ModuleConstants};
pub use system::{SwerveConfig, MAX_MODULES};
pub use validation::{validate_config, validate_module};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, Meters, MetersPerSec};
