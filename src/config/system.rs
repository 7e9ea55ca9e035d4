//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::axis::{AngleConfig, DriveConfig};
use super::chassis::ChassisConfig;
use super::module::{ModuleConfig, ModuleConstants};

/// Maximum number of modules in one drivetrain.
pub const MAX_MODULES: usize = 4;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SwerveConfig {
    /// Shared chassis parameters.
    pub chassis: ChassisConfig,

    /// Drive motor parameters (same for every module).
    pub drive: DriveConfig,

    /// Angle motor parameters (same for every module).
    pub angle: AngleConfig,

    /// Named per-module ids and offsets.
    pub modules: FnvIndexMap<String<32>, ModuleConstants, MAX_MODULES>,
}

impl SwerveConfig {
    /// Get the constants of a module by name.
    pub fn module(&self, name: &str) -> Option<&ModuleConstants> {
        self.modules
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Resolve the full configuration bundle of a module by name.
    pub fn module_config(&self, name: &str) -> Option<ModuleConfig> {
        let (key, constants) = self.modules.iter().find(|(k, _)| k.as_str() == name)?;

        Some(ModuleConfig {
            name: key.clone(),
            constants: *constants,
            chassis: self.chassis,
            drive: self.drive,
            angle: self.angle,
        })
    }

    /// List all module names, in declaration order.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(|s| s.as_str())
    }

    /// Resolve every declared module.
    pub fn module_configs(&self) -> impl Iterator<Item = ModuleConfig> + '_ {
        self.module_names().filter_map(|name| self.module_config(name))
    }
}
