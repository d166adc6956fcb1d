//! Beacon domain types: regions, ranged beacons and scanner timing.

use serde::{Deserialize, Serialize};

/// A beacon region to monitor or range.
///
/// `major` and `minor` narrow the region when set; `None` matches any value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Caller-chosen unique identifier of the region
    pub identifier: String,
    /// Proximity UUID, always lower-case
    pub uuid: String,
    #[serde(default)]
    pub major: Option<u16>,
    #[serde(default)]
    pub minor: Option<u16>,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [uuid={}", self.identifier, self.uuid)?;
        if let Some(major) = self.major {
            write!(f, " major={major}")?;
        }
        if let Some(minor) = self.minor {
            write!(f, " minor={minor}")?;
        }
        f.write_str("]")
    }
}

/// Coarse distance bucket reported for a ranged beacon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proximity {
    Immediate,
    Near,
    Far,
    Unknown,
}

impl Proximity {
    pub fn name(self) -> &'static str {
        match self {
            Proximity::Immediate => "immediate",
            Proximity::Near => "near",
            Proximity::Far => "far",
            Proximity::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Proximity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single beacon observed while ranging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beacon {
    pub uuid: String,
    pub major: u16,
    pub minor: u16,
    pub proximity: Proximity,
    /// Estimated distance in meters
    pub accuracy: f64,
    pub rssi: i32,
    /// Calibrated transmit power at one meter
    pub tx_power: i32,
}

/// Result of a monitoring state determination for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionState {
    Inside,
    Outside,
    Unknown,
}

/// Bluetooth scanner timing, all values in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanPeriods {
    pub foreground_scan_period: u64,
    pub foreground_between_scan_period: u64,
    pub background_scan_period: u64,
    pub background_between_scan_period: u64,
}

impl Default for ScanPeriods {
    /// Less battery-intensive than the scanner library's own defaults.
    fn default() -> Self {
        Self {
            foreground_scan_period: 1200,
            foreground_between_scan_period: 2300,
            background_scan_period: 10_000,
            background_between_scan_period: 60 * 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_display() {
        let region = Region {
            identifier: "lobby".to_string(),
            uuid: "abc".to_string(),
            major: Some(1),
            minor: Some(2),
        };
        assert_eq!(region.to_string(), "lobby [uuid=abc major=1 minor=2]");
    }

    #[test]
    fn test_proximity_names() {
        let json = serde_json::to_string(&Proximity::Immediate).unwrap();
        assert_eq!(json, r#""immediate""#);
        assert_eq!(Proximity::Far.to_string(), "far");
        assert_eq!(Proximity::Unknown.name(), "unknown");
    }

    #[test]
    fn test_default_scan_periods() {
        let periods = ScanPeriods::default();
        assert_eq!(periods.foreground_scan_period, 1200);
        assert_eq!(periods.foreground_between_scan_period, 2300);
        assert_eq!(periods.background_scan_period, 10_000);
        assert_eq!(periods.background_between_scan_period, 60_000);
    }
}
