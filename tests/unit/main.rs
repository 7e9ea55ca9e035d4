//! Unit test harness for swerve-module.
//!
//! This module organizes unit tests for each component of the library.

mod config_parsing;
mod config_validation;
mod optimizer_properties;
