//! Optional platform module abstraction.
//!
//! Modules are looked up by identifier through a [`ModuleLoader`] rather than
//! linked in directly, so callers can probe for them and tests can swap them out.

mod registry;

pub use registry::ModuleRegistry;

use std::sync::Arc;

use async_trait::async_trait;
use beacons_common::ModuleDescriptor;

use crate::error::{ProbeError, Result};

/// An optional, platform-specific unit exposing a capability check.
#[async_trait]
pub trait PlatformModule: Send + Sync {
    /// Identifier the module is registered and loaded under (e.g. "com.liferay.beacons").
    fn module_id(&self) -> &str;

    /// Descriptor shown to callers once the module has loaded.
    fn descriptor(&self) -> ModuleDescriptor;

    /// Ask the module whether its capability can be used on this device.
    async fn check_availability(&self) -> Result<bool>;
}

/// Resolves module identifiers to loaded modules.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load_module(
        &self,
        id: &str,
    ) -> std::result::Result<Arc<dyn PlatformModule>, ProbeError>;
}
