//! # swerve-module
//!
//! Per-wheel control for swerve drivetrains with embedded-hal style hardware traits.
//!
//! ## Features
//!
//! - **Minimal rotation**: desired states are reversed instead of steered past 90 degrees
//! - **Calibration**: relative encoder zero derived from an absolute sensor and a fixed offset
//! - **Open and closed loop drive**: percent output or onboard velocity loop with feedforward
//! - **Anti-jitter**: steering holds still when the wheel is nominally stopped
//! - **Configuration-driven**: chassis, motor and module parameters in TOML files
//! - **no_std compatible**: core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use swerve_module::{DriveMode, ModuleState, SwerveConfig, SwerveModule};
//! use swerve_module::config::units::UnitExt;
//!
//! // Load configuration from TOML
//! let config: SwerveConfig = swerve_module::load_config("swerve.toml")?;
//!
//! // Create a module around motor controllers and an absolute encoder
//! let mut module = SwerveModule::builder()
//!     .from_config(&config, "front_left")?
//!     .drive_motor(drive)
//!     .angle_motor(angle)
//!     .absolute_encoder(cancoder)
//!     .build()?;
//!
//! // Every control cycle
//! let desired = ModuleState::new(2.0_f32.meters_per_sec(), 45.0_f32.degrees());
//! module.set_desired_state(desired, DriveMode::OpenLoop)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets
//! - `log`: Enables `log` facade logging on hosts

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible everywhere
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod hal;
pub mod module;

// Re-exports for ergonomic API
pub use config::{validate_config, ModuleConfig, SwerveConfig};
pub use error::{Error, Result};
pub use module::{
    optimize, CalibrationStatus, DriveMode, ModulePosition, ModuleState, SwerveModule,
    SwerveModuleBuilder,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, Meters, MetersPerSec};
