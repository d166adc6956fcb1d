//! Registry of loadable platform modules.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ModuleLoader, PlatformModule};
use crate::error::ProbeError;

/// Registry of all modules the host can load by identifier.
///
/// Every `load_module` call is counted, found or not, so callers can observe
/// whether a probe touched the loader at all.
pub struct ModuleRegistry {
    modules: RwLock<HashMap<String, Arc<dyn PlatformModule>>>,
    load_attempts: AtomicUsize,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            modules: RwLock::new(HashMap::new()),
            load_attempts: AtomicUsize::new(0),
        }
    }

    /// Register a module under its own identifier, replacing any previous one.
    pub async fn register(&self, module: Arc<dyn PlatformModule>) {
        let id = module.module_id().to_string();
        tracing::debug!(module_id = %id, "Registering module");
        let mut modules = self.modules.write().await;
        modules.insert(id, module);
    }

    pub async fn unregister(&self, id: &str) -> Option<Arc<dyn PlatformModule>> {
        let mut modules = self.modules.write().await;
        modules.remove(id)
    }

    /// Identifiers of all registered modules, sorted.
    pub async fn ids(&self) -> Vec<String> {
        let modules = self.modules.read().await;
        let mut ids: Vec<String> = modules.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn load_attempts(&self) -> usize {
        self.load_attempts.load(Ordering::SeqCst)
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModuleLoader for ModuleRegistry {
    async fn load_module(&self, id: &str) -> Result<Arc<dyn PlatformModule>, ProbeError> {
        self.load_attempts.fetch_add(1, Ordering::SeqCst);

        let modules = self.modules.read().await;
        match modules.get(id) {
            Some(module) => {
                tracing::debug!(module_id = %id, "Loaded module");
                Ok(module.clone())
            }
            None => {
                tracing::debug!(module_id = %id, "Module not registered");
                Err(ProbeError::ModuleNotFound(id.to_string()))
            }
        }
    }
}
