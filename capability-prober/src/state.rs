//! Host wiring: the registry, the beacons module and the prober built from config.

use std::sync::Arc;

use beacons_common::Platform;

use crate::beacons::{BeaconsModule, InMemoryBeaconManager};
use crate::config::Config;
use crate::error::Result;
use crate::module::ModuleRegistry;
use crate::prober::CapabilityProber;

/// Everything the host needs to answer a probe.
pub struct ProbeHost {
    pub config: Config,
    pub registry: Arc<ModuleRegistry>,
    pub beacons: Arc<BeaconsModule>,
    pub prober: CapabilityProber,
}

impl ProbeHost {
    pub async fn new(config: Config) -> Result<Self> {
        let manager = Arc::new(InMemoryBeaconManager::new(config.beacons.available));
        let beacons = Arc::new(BeaconsModule::new(manager));
        beacons.set_auto_range(config.beacons.auto_range);
        beacons.set_scan_periods(config.beacons.scan_periods).await?;

        let registry = Arc::new(ModuleRegistry::new());
        registry.register(beacons.clone()).await;
        tracing::debug!(modules = ?registry.ids().await, "Module registry ready");

        let prober = CapabilityProber::from_config(registry.clone(), &config.prober);

        Ok(Self {
            config,
            registry,
            beacons,
            prober,
        })
    }

    /// Pick the platform to probe: explicit argument, then config, then the OS name.
    pub fn resolve_platform(&self, explicit: Option<&str>) -> Platform {
        explicit
            .map(str::to_string)
            .or_else(|| self.config.host.platform.clone())
            .unwrap_or_else(|| std::env::consts::OS.to_string())
            .into()
    }
}
