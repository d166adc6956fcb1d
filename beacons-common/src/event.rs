//! Events emitted by the beacons module.
//!
//! Event names follow the ones the module has always published to scripts:
//! `enteredRegion`, `exitedRegion`, `determinedRegionState` and `beaconProximity`.

use serde::{Deserialize, Serialize};

use crate::{Beacon, Proximity, Region};

/// Notification published to subscribers of the beacons module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BeaconEvent {
    EnteredRegion {
        identifier: String,
    },
    ExitedRegion {
        identifier: String,
    },
    DeterminedRegionState {
        identifier: String,
        /// "inside" or "outside"
        #[serde(rename = "regionState")]
        region_state: String,
    },
    BeaconProximity {
        identifier: String,
        uuid: String,
        major: u16,
        minor: u16,
        proximity: Proximity,
        accuracy: f64,
        rssi: i32,
        power: i32,
    },
}

impl BeaconEvent {
    /// Event name as published to scripts.
    pub fn name(&self) -> &'static str {
        match self {
            BeaconEvent::EnteredRegion { .. } => "enteredRegion",
            BeaconEvent::ExitedRegion { .. } => "exitedRegion",
            BeaconEvent::DeterminedRegionState { .. } => "determinedRegionState",
            BeaconEvent::BeaconProximity { .. } => "beaconProximity",
        }
    }

    pub fn proximity(region: &Region, beacon: &Beacon) -> Self {
        BeaconEvent::BeaconProximity {
            identifier: region.identifier.clone(),
            uuid: beacon.uuid.clone(),
            major: beacon.major,
            minor: beacon.minor,
            proximity: beacon.proximity,
            accuracy: beacon.accuracy,
            rssi: beacon.rssi,
            power: beacon.tx_power,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tag_uses_script_names() {
        let event = BeaconEvent::DeterminedRegionState {
            identifier: "lobby".to_string(),
            region_state: "inside".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.name());
        assert_eq!(json["regionState"], "inside");
        assert_eq!(json["identifier"], "lobby");
    }

    #[test]
    fn test_proximity_event_from_beacon() {
        let region = Region {
            identifier: "lobby".to_string(),
            uuid: "abc".to_string(),
            major: None,
            minor: None,
        };
        let beacon = Beacon {
            uuid: "abc".to_string(),
            major: 3,
            minor: 4,
            proximity: Proximity::Immediate,
            accuracy: 0.2,
            rssi: -50,
            tx_power: -59,
        };

        let event = BeaconEvent::proximity(&region, &beacon);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "beaconProximity");
        assert_eq!(json["proximity"], "immediate");
        assert_eq!(json["power"], -59);
        assert_eq!(json["identifier"], "lobby");
    }
}
