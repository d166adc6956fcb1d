//! Error types for the capability prober and the beacons module.

use beacons_common::ModuleDescriptor;

/// Error types for module and beacon backend operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Beacon service error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Ways a probe can fail after deciding the platform should have the module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Capability check failed for {descriptor}: {reason}")]
    CapabilityCheckFailed {
        descriptor: ModuleDescriptor,
        reason: String,
    },
}

impl ProbeError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::ModuleNotFound(_) => "module_not_found",
            ProbeError::CapabilityCheckFailed { .. } => "capability_check_failed",
        }
    }
}
