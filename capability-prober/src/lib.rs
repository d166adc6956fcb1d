//! Platform-gated capability probe.
//!
//! Decides whether an optional native module should exist on the current
//! platform, loads it through a [`ModuleRegistry`] and asks it whether its
//! capability is available. Ships the beacons module as the module to probe.

pub mod beacons;
pub mod config;
pub mod error;
pub mod module;
pub mod prober;
pub mod state;

pub use beacons::{BeaconManager, BeaconsModule, InMemoryBeaconManager, RegionRequest};
pub use config::Config;
pub use error::{Error, ProbeError, Result};
pub use module::{ModuleLoader, ModuleRegistry, PlatformModule};
pub use prober::{render_json, render_status, CapabilityProber};
pub use state::ProbeHost;
