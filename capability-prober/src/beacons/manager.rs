//! Bluetooth LE beacon backend abstraction.
//!
//! The beacons module never talks to a radio itself; it drives a
//! [`BeaconManager`] and reacts to the notifications the manager reports back.

use std::collections::HashSet;

use async_trait::async_trait;
use beacons_common::{Region, ScanPeriods};
use tokio::sync::RwLock;

use crate::error::{Error, Result};

/// Scanner backend used by the beacons module.
#[async_trait]
pub trait BeaconManager: Send + Sync {
    /// Whether Bluetooth LE is present and permitted on this device.
    async fn check_availability(&self) -> Result<bool>;

    async fn set_scan_periods(&self, periods: ScanPeriods) -> Result<()>;

    /// Throttle scanning down while the app is in the background.
    async fn set_background_mode(&self, background: bool) -> Result<()>;

    async fn start_monitoring(&self, region: &Region) -> Result<()>;

    async fn stop_monitoring(&self, region: &Region) -> Result<()>;

    async fn start_ranging(&self, region: &Region) -> Result<()>;

    async fn stop_ranging(&self, region: &Region) -> Result<()>;

    async fn monitored_regions(&self) -> Vec<Region>;

    async fn ranged_regions(&self) -> Vec<Region>;
}

#[derive(Debug)]
struct ManagerState {
    availability: std::result::Result<bool, String>,
    scan_periods: ScanPeriods,
    background: bool,
    monitored: Vec<Region>,
    ranged: Vec<Region>,
    failing_regions: HashSet<String>,
}

/// Deterministic in-process backend.
///
/// Regions are keyed by identifier: starting a region again replaces it.
/// Failures can be injected per region identifier and for the availability check.
#[derive(Debug)]
pub struct InMemoryBeaconManager {
    state: RwLock<ManagerState>,
}

impl InMemoryBeaconManager {
    pub fn new(available: bool) -> Self {
        Self {
            state: RwLock::new(ManagerState {
                availability: Ok(available),
                scan_periods: ScanPeriods::default(),
                background: false,
                monitored: Vec::new(),
                ranged: Vec::new(),
                failing_regions: HashSet::new(),
            }),
        }
    }

    pub async fn set_available(&self, available: bool) {
        self.state.write().await.availability = Ok(available);
    }

    /// Make every availability check fail with `reason`.
    pub async fn fail_availability(&self, reason: impl Into<String>) {
        self.state.write().await.availability = Err(reason.into());
    }

    /// Make every start/stop call for the region `identifier` fail.
    pub async fn fail_region(&self, identifier: impl Into<String>) {
        self.state.write().await.failing_regions.insert(identifier.into());
    }

    pub async fn scan_periods(&self) -> ScanPeriods {
        self.state.read().await.scan_periods
    }

    pub async fn is_background(&self) -> bool {
        self.state.read().await.background
    }

    pub async fn is_ranging(&self, identifier: &str) -> bool {
        self.state
            .read()
            .await
            .ranged
            .iter()
            .any(|r| r.identifier == identifier)
    }
}

impl Default for InMemoryBeaconManager {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ManagerState {
    fn check_region(&self, region: &Region) -> Result<()> {
        if self.failing_regions.contains(&region.identifier) {
            return Err(Error::Backend(format!(
                "service refused region {}",
                region.identifier
            )));
        }
        Ok(())
    }
}

fn upsert(regions: &mut Vec<Region>, region: &Region) {
    regions.retain(|r| r.identifier != region.identifier);
    regions.push(region.clone());
}

fn remove(regions: &mut Vec<Region>, region: &Region) {
    regions.retain(|r| r.identifier != region.identifier);
}

#[async_trait]
impl BeaconManager for InMemoryBeaconManager {
    async fn check_availability(&self) -> Result<bool> {
        self.state
            .read()
            .await
            .availability
            .clone()
            .map_err(Error::Backend)
    }

    async fn set_scan_periods(&self, periods: ScanPeriods) -> Result<()> {
        self.state.write().await.scan_periods = periods;
        Ok(())
    }

    async fn set_background_mode(&self, background: bool) -> Result<()> {
        self.state.write().await.background = background;
        Ok(())
    }

    async fn start_monitoring(&self, region: &Region) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_region(region)?;
        upsert(&mut state.monitored, region);
        Ok(())
    }

    async fn stop_monitoring(&self, region: &Region) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_region(region)?;
        remove(&mut state.monitored, region);
        Ok(())
    }

    async fn start_ranging(&self, region: &Region) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_region(region)?;
        upsert(&mut state.ranged, region);
        Ok(())
    }

    async fn stop_ranging(&self, region: &Region) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_region(region)?;
        remove(&mut state.ranged, region);
        Ok(())
    }

    async fn monitored_regions(&self) -> Vec<Region> {
        self.state.read().await.monitored.clone()
    }

    async fn ranged_regions(&self) -> Vec<Region> {
        self.state.read().await.ranged.clone()
    }
}
