//! Beacon Probe Common Types
//!
//! Shared types used by the capability prober, the beacons module and the host binary.

pub mod beacon;
pub mod event;
pub mod platform;
pub mod probe;

pub use beacon::{Beacon, Proximity, Region, RegionState, ScanPeriods};
pub use event::BeaconEvent;
pub use platform::Platform;
pub use probe::{ModuleDescriptor, ProbeResult};
