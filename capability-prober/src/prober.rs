//! Platform-gated capability probe.
//!
//! The prober only reaches for the module on the platform it ships for. On any
//! other platform it answers `Unsupported` without touching the loader.

use std::sync::Arc;

use beacons_common::{Platform, ProbeResult};
use serde_json::{json, Value};

use crate::config::ProberConfig;
use crate::error::ProbeError;
use crate::module::ModuleLoader;

pub const DEFAULT_MODULE_ID: &str = "com.liferay.beacons";
pub const DEFAULT_GATED_PLATFORM: &str = Platform::ANDROID;

/// Decides whether a named optional module should exist and, if so, asks it
/// whether its capability is available.
pub struct CapabilityProber {
    loader: Arc<dyn ModuleLoader>,
    module_id: String,
    gated_platform: String,
}

impl CapabilityProber {
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self {
            loader,
            module_id: DEFAULT_MODULE_ID.to_string(),
            gated_platform: DEFAULT_GATED_PLATFORM.to_string(),
        }
    }

    pub fn from_config(loader: Arc<dyn ModuleLoader>, config: &ProberConfig) -> Self {
        Self {
            loader,
            module_id: config.module_id.clone(),
            gated_platform: config.gated_platform.clone(),
        }
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    /// Probe the module on `platform`.
    ///
    /// Load and check run strictly one after the other; a check failure is
    /// reported once and never retried.
    pub async fn probe(&self, platform: &Platform) -> Result<ProbeResult, ProbeError> {
        if !platform.is(&self.gated_platform) {
            tracing::debug!(
                platform = %platform,
                module_id = %self.module_id,
                "Platform not gated for module, skipping load"
            );
            return Ok(ProbeResult::Unsupported {
                platform: platform.clone(),
            });
        }

        let module = self.loader.load_module(&self.module_id).await?;
        let descriptor = module.descriptor();

        match module.check_availability().await {
            Ok(is_available) => {
                tracing::debug!(module = %descriptor, is_available, "Capability check finished");
                Ok(ProbeResult::Available {
                    module_descriptor: descriptor,
                    is_available,
                })
            }
            Err(e) => {
                tracing::warn!(module = %descriptor, error = %e, "Capability check failed");
                Err(ProbeError::CapabilityCheckFailed {
                    descriptor,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Probe and render the outcome as a single human-readable line.
    pub async fn status_message(&self, platform: &Platform) -> String {
        let outcome = self.probe(platform).await;
        render_status(&self.module_id, platform, &outcome)
    }
}

/// Render a probe outcome. Both error kinds fold into a message; neither is fatal.
pub fn render_status(
    module_id: &str,
    platform: &Platform,
    outcome: &Result<ProbeResult, ProbeError>,
) -> String {
    match outcome {
        Ok(ProbeResult::Unsupported { platform }) => {
            format!("{module_id} not supported on {platform}")
        }
        Ok(ProbeResult::Available {
            module_descriptor,
            is_available,
        }) => format!(
            "module is available: {module_descriptor}, checkAvailability: {is_available}"
        ),
        Err(ProbeError::ModuleNotFound(_)) => {
            format!("{module_id} not supported on {platform}: module not found")
        }
        Err(ProbeError::CapabilityCheckFailed { descriptor, reason }) => format!(
            "module is available: {descriptor}, checkAvailability failed: {reason}"
        ),
    }
}

/// JSON form of a probe outcome.
///
/// Results use their serde form; errors become
/// `{"status":"error","kind":<kind>,"message":<text>}`.
pub fn render_json(outcome: &Result<ProbeResult, ProbeError>) -> serde_json::Result<Value> {
    match outcome {
        Ok(result) => serde_json::to_value(result),
        Err(e) => Ok(json!({
            "status": "error",
            "kind": e.kind(),
            "message": e.to_string(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::module::{ModuleRegistry, PlatformModule};
    use async_trait::async_trait;
    use beacons_common::ModuleDescriptor;

    struct FixedModule {
        answer: std::result::Result<bool, String>,
    }

    #[async_trait]
    impl PlatformModule for FixedModule {
        fn module_id(&self) -> &str {
            DEFAULT_MODULE_ID
        }

        fn descriptor(&self) -> ModuleDescriptor {
            ModuleDescriptor::new(DEFAULT_MODULE_ID, "LiferayBeacons", "0.2.0")
        }

        async fn check_availability(&self) -> Result<bool> {
            self.answer.clone().map_err(Error::Backend)
        }
    }

    async fn prober_with(
        answer: Option<std::result::Result<bool, String>>,
    ) -> (CapabilityProber, Arc<ModuleRegistry>) {
        let registry = Arc::new(ModuleRegistry::new());
        if let Some(answer) = answer {
            registry.register(Arc::new(FixedModule { answer })).await;
        }
        (CapabilityProber::new(registry.clone()), registry)
    }

    #[tokio::test]
    async fn test_android_with_available_module() {
        let (prober, _) = prober_with(Some(Ok(true))).await;

        let result = prober.probe(&Platform::from("android")).await.unwrap();
        match result {
            ProbeResult::Available {
                module_descriptor,
                is_available,
            } => {
                assert!(is_available);
                assert!(!module_descriptor.to_string().is_empty());
            }
            other => panic!("expected Available, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_android_without_module() {
        let (prober, registry) = prober_with(None).await;

        let err = prober.probe(&Platform::from("android")).await.unwrap_err();
        assert_eq!(err, ProbeError::ModuleNotFound(DEFAULT_MODULE_ID.to_string()));
        assert_eq!(registry.load_attempts(), 1);
    }

    #[tokio::test]
    async fn test_check_failure_is_surfaced() {
        let (prober, _) = prober_with(Some(Err("no permission".to_string()))).await;

        let err = prober.probe(&Platform::from("android")).await.unwrap_err();
        assert_eq!(err.kind(), "capability_check_failed");
        assert!(err.to_string().contains("no permission"));
    }

    #[tokio::test]
    async fn test_other_platforms_never_load() {
        let (prober, registry) = prober_with(Some(Ok(true))).await;

        for id in ["ios", "", "Android", "mobileweb"] {
            let result = prober.probe(&Platform::from(id)).await.unwrap();
            assert_eq!(
                result,
                ProbeResult::Unsupported {
                    platform: Platform::from(id)
                }
            );
        }
        assert_eq!(registry.load_attempts(), 0);
    }

    #[tokio::test]
    async fn test_probe_is_idempotent() {
        let (prober, _) = prober_with(Some(Ok(false))).await;
        let android = Platform::from("android");

        let first = prober.probe(&android).await;
        let second = prober.probe(&android).await;
        assert_eq!(first, second);

        let ios = Platform::from("ios");
        assert_eq!(prober.probe(&ios).await, prober.probe(&ios).await);
    }

    #[tokio::test]
    async fn test_status_messages() {
        let (prober, _) = prober_with(Some(Ok(true))).await;
        assert_eq!(
            prober.status_message(&Platform::from("ios")).await,
            "com.liferay.beacons not supported on ios"
        );
        assert_eq!(
            prober.status_message(&Platform::from("android")).await,
            "module is available: LiferayBeacons (com.liferay.beacons) v0.2.0, checkAvailability: true"
        );

        let (prober, _) = prober_with(None).await;
        assert_eq!(
            prober.status_message(&Platform::from("android")).await,
            "com.liferay.beacons not supported on android: module not found"
        );
    }

    #[tokio::test]
    async fn test_json_outcomes() {
        let (prober, _) = prober_with(None).await;
        let outcome = prober.probe(&Platform::from("android")).await;
        let body = render_json(&outcome).unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["kind"], "module_not_found");
        assert_eq!(body["message"], "Module not found: com.liferay.beacons");

        let (prober, _) = prober_with(Some(Err("adapter off".to_string()))).await;
        let outcome = prober.probe(&Platform::from("android")).await;
        let body = render_json(&outcome).unwrap();
        assert_eq!(body["kind"], "capability_check_failed");
        assert!(body["message"].as_str().unwrap().contains("adapter off"));

        let outcome = prober.probe(&Platform::from("ios")).await;
        let body = render_json(&outcome).unwrap();
        assert_eq!(body, json!({"status": "unsupported", "platform": "ios"}));
    }

    #[tokio::test]
    async fn test_gated_platform_from_config() {
        let registry = Arc::new(ModuleRegistry::new());
        let config = ProberConfig {
            module_id: "com.example.nfc".to_string(),
            gated_platform: "ios".to_string(),
        };
        let prober = CapabilityProber::from_config(registry.clone(), &config);

        let err = prober.probe(&Platform::from("ios")).await.unwrap_err();
        assert_eq!(err, ProbeError::ModuleNotFound("com.example.nfc".to_string()));

        let result = prober.probe(&Platform::from("android")).await.unwrap();
        assert!(!result.is_supported());
    }
}
