//! The beacons module: region monitoring and ranging over a [`BeaconManager`].
//!
//! Scripts drive the module through its methods and listen for
//! [`BeaconEvent`]s. The backend reports region transitions and ranging
//! results through the `did_*` notifier methods.

mod manager;
mod region;

pub use manager::{BeaconManager, InMemoryBeaconManager};
pub use region::RegionRequest;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use beacons_common::{Beacon, BeaconEvent, ModuleDescriptor, Region, RegionState, ScanPeriods};
use tokio::sync::broadcast;

use crate::error::Result;
use crate::module::PlatformModule;

pub const MODULE_ID: &str = "com.liferay.beacons";
pub const MODULE_NAME: &str = "LiferayBeacons";

const EVENT_CHANNEL_CAPACITY: usize = 256;

pub struct BeaconsModule {
    manager: Arc<dyn BeaconManager>,
    auto_range: AtomicBool,
    events: broadcast::Sender<BeaconEvent>,
}

impl BeaconsModule {
    pub fn new(manager: Arc<dyn BeaconManager>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            manager,
            auto_range: AtomicBool::new(true),
            events,
        }
    }

    /// Subscribe to region and proximity events.
    pub fn subscribe(&self) -> broadcast::Receiver<BeaconEvent> {
        self.events.subscribe()
    }

    /// See if Bluetooth 4.0 LE is available on the device.
    ///
    /// Backend failures propagate; use [`BeaconsModule::is_available`] to treat
    /// them as "not available".
    pub async fn check_availability(&self) -> Result<bool> {
        self.manager.check_availability().await
    }

    pub async fn is_available(&self) -> bool {
        match self.manager.check_availability().await {
            Ok(available) => available,
            Err(e) => {
                tracing::warn!(error = %e, "Availability check failed, treating as unavailable");
                false
            }
        }
    }

    /// Throttle the scanner down while the app is in the background.
    ///
    /// The module cannot tell when the app is backgrounded; callers must.
    pub async fn set_background_mode(&self, background: bool) -> Result<()> {
        tracing::debug!(background, "set_background_mode");

        if !self.is_available().await {
            tracing::debug!("Bluetooth LE not available or no permissions on this device");
            return Ok(());
        }
        self.manager.set_background_mode(background).await
    }

    pub fn enable_auto_ranging(&self) {
        self.set_auto_range(true);
    }

    pub fn disable_auto_ranging(&self) {
        self.set_auto_range(false);
    }

    pub fn set_auto_range(&self, auto_range: bool) {
        tracing::debug!(auto_range, "set_auto_range");
        self.auto_range.store(auto_range, Ordering::SeqCst);
    }

    pub fn auto_range(&self) -> bool {
        self.auto_range.load(Ordering::SeqCst)
    }

    pub async fn set_scan_periods(&self, periods: ScanPeriods) -> Result<()> {
        tracing::debug!(?periods, "set_scan_periods");
        self.manager.set_scan_periods(periods).await
    }

    /// Start monitoring a region for enter/exit transitions.
    ///
    /// Does nothing when Bluetooth LE is unavailable. A malformed region is an
    /// error; a backend refusal is only logged.
    pub async fn start_monitoring_for_region(&self, request: RegionRequest) -> Result<()> {
        tracing::debug!(identifier = %request.identifier, "start_monitoring_for_region");

        if !self.is_available().await {
            tracing::debug!("Bluetooth LE not available or no permissions on this device");
            return Ok(());
        }
        let region = Region::try_from(request)?;

        tracing::debug!(%region, "Beginning to monitor region");
        if let Err(e) = self.manager.start_monitoring(&region).await {
            tracing::error!(identifier = %region.identifier, error = %e, "Cannot start monitoring region");
        }
        Ok(())
    }

    /// Start ranging a region. Only regions that have been entered produce results.
    pub async fn start_ranging_for_region(&self, request: RegionRequest) -> Result<()> {
        tracing::debug!(identifier = %request.identifier, "start_ranging_for_region");

        if !self.is_available().await {
            tracing::debug!("Bluetooth LE not available or no permissions on this device");
            return Ok(());
        }
        let region = Region::try_from(request)?;

        tracing::debug!(%region, "Beginning to range region");
        if let Err(e) = self.manager.start_ranging(&region).await {
            tracing::error!(identifier = %region.identifier, error = %e, "Cannot start ranging region");
        }
        Ok(())
    }

    /// Stop monitoring everything. Returns how many regions were stopped.
    pub async fn stop_monitoring_all_regions(&self) -> usize {
        tracing::debug!("stop_monitoring_all_regions");

        let mut stopped = 0;
        for region in self.manager.monitored_regions().await {
            match self.manager.stop_monitoring(&region).await {
                Ok(()) => {
                    tracing::debug!(%region, "Stopped monitoring region");
                    stopped += 1;
                }
                Err(e) => {
                    tracing::error!(identifier = %region.identifier, error = %e, "Cannot stop monitoring region");
                }
            }
        }
        stopped
    }

    /// Stop ranging everything. Returns how many regions were stopped.
    pub async fn stop_ranging_for_all_beacons(&self) -> usize {
        tracing::debug!("stop_ranging_for_all_beacons");

        let mut stopped = 0;
        for region in self.manager.ranged_regions().await {
            match self.manager.stop_ranging(&region).await {
                Ok(()) => {
                    tracing::debug!(%region, "Stopped ranging region");
                    stopped += 1;
                }
                Err(e) => {
                    tracing::error!(identifier = %region.identifier, error = %e, "Cannot stop ranging region");
                }
            }
        }
        stopped
    }

    // Notifier callbacks, invoked by the backend.

    pub async fn did_enter_region(&self, region: &Region) {
        tracing::debug!(%region, "Entered region");

        if !self.auto_range_into(region).await {
            return;
        }
        self.emit(BeaconEvent::EnteredRegion {
            identifier: region.identifier.clone(),
        });
    }

    pub async fn did_exit_region(&self, region: &Region) {
        tracing::debug!(%region, "Exited region");

        if let Err(e) = self.manager.stop_ranging(region).await {
            tracing::error!(identifier = %region.identifier, error = %e, "Cannot turn off ranging for region");
            return;
        }
        self.emit(BeaconEvent::ExitedRegion {
            identifier: region.identifier.clone(),
        });
    }

    pub async fn did_determine_state_for_region(&self, state: RegionState, region: &Region) {
        let region_state = match state {
            RegionState::Inside => {
                if !self.auto_range_into(region).await {
                    return;
                }
                "inside"
            }
            RegionState::Outside => {
                if let Err(e) = self.manager.stop_ranging(region).await {
                    tracing::error!(identifier = %region.identifier, error = %e, "Cannot turn off ranging for region during state determination");
                    return;
                }
                "outside"
            }
            RegionState::Unknown => {
                tracing::debug!(%region, "Unknown region state");
                return;
            }
        };

        self.emit(BeaconEvent::DeterminedRegionState {
            identifier: region.identifier.clone(),
            region_state: region_state.to_string(),
        });
    }

    pub fn did_range_beacons_in_region(&self, beacons: &[Beacon], region: &Region) {
        for beacon in beacons {
            self.emit(BeaconEvent::proximity(region, beacon));
        }
    }

    /// Start ranging `region` if auto-range is on. False if the backend refused.
    async fn auto_range_into(&self, region: &Region) -> bool {
        if !self.auto_range() {
            return true;
        }
        tracing::debug!(%region, "Beginning to auto-range region");
        match self.manager.start_ranging(region).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(identifier = %region.identifier, error = %e, "Cannot turn on ranging for region");
                false
            }
        }
    }

    fn emit(&self, event: BeaconEvent) {
        let name = event.name();
        if self.events.send(event).is_err() {
            tracing::debug!(event = name, "No subscribers for beacon event");
        }
    }
}

#[async_trait]
impl PlatformModule for BeaconsModule {
    fn module_id(&self) -> &str {
        MODULE_ID
    }

    fn descriptor(&self) -> ModuleDescriptor {
        ModuleDescriptor::new(MODULE_ID, MODULE_NAME, env!("CARGO_PKG_VERSION"))
    }

    async fn check_availability(&self) -> Result<bool> {
        BeaconsModule::check_availability(self).await
    }
}
