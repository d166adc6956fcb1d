//! Probe outcome types.

use serde::{Deserialize, Serialize};

use crate::Platform;

/// Describes a loaded platform module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Module identifier used for lookup (e.g. "com.liferay.beacons")
    pub id: String,
    /// Human-readable module name
    pub name: String,
    /// Module version
    pub version: String,
}

impl ModuleDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl std::fmt::Display for ModuleDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) v{}", self.name, self.id, self.version)
    }
}

/// Result of probing a platform for an optional module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ProbeResult {
    /// The platform is not one the module ships for; nothing was loaded.
    Unsupported { platform: Platform },
    /// The module loaded and answered its availability check.
    Available {
        module_descriptor: ModuleDescriptor,
        is_available: bool,
    },
}

impl ProbeResult {
    pub fn is_supported(&self) -> bool {
        matches!(self, ProbeResult::Available { .. })
    }

    /// True only when the module loaded and reported the capability usable.
    pub fn is_usable(&self) -> bool {
        matches!(
            self,
            ProbeResult::Available {
                is_available: true,
                ..
            }
        )
    }
}
