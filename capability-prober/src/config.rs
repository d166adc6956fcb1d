//! Configuration for the beacon probe host.

use std::path::Path;

use beacons_common::ScanPeriods;
use config::builder::DefaultState;
use config::{Config as ConfigLoader, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::prober::{DEFAULT_GATED_PLATFORM, DEFAULT_MODULE_ID};

/// Main configuration structure for the probe host.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub prober: ProberConfig,
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub beacons: BeaconsConfig,
}

/// Which module to probe and on which platform it is expected to exist.
#[derive(Debug, Clone, Deserialize)]
pub struct ProberConfig {
    #[serde(default = "default_module_id")]
    pub module_id: String,
    #[serde(default = "default_gated_platform")]
    pub gated_platform: String,
}

impl Default for ProberConfig {
    fn default() -> Self {
        Self {
            module_id: default_module_id(),
            gated_platform: default_gated_platform(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct HostConfig {
    /// Platform to report when none is given on the command line.
    /// Falls back to the compile-time OS name when unset.
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BeaconsConfig {
    /// Start ranging automatically when a monitored region is entered.
    #[serde(default = "default_true")]
    pub auto_range: bool,
    /// Availability answer of the in-memory beacon backend.
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub scan_periods: ScanPeriods,
}

impl Default for BeaconsConfig {
    fn default() -> Self {
        Self {
            auto_range: true,
            available: true,
            scan_periods: ScanPeriods::default(),
        }
    }
}

// Default values
fn default_module_id() -> String {
    DEFAULT_MODULE_ID.to_string()
}
fn default_gated_platform() -> String {
    DEFAULT_GATED_PLATFORM.to_string()
}
fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (PROBER__SECTION__KEY format)
    /// 2. config.toml file (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("PROBER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from an explicit file, without environment overrides.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        ConfigLoader::builder()
            .set_default("prober.module_id", default_module_id())?
            .set_default("prober.gated_platform", default_gated_platform())
    }
}
