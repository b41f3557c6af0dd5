//! The discovery cycle and its shared cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use rand::Rng;

use crate::context::BridgeContext;

use super::document::EndpointDocument;
use super::generator::EndpointGenerator;

/// The JSON-serializable discovery document the host polls:
/// `{ <entity_id>: EndpointDocument, ... }`.
pub type DiscoveryDocument = HashMap<String, EndpointDocument>;

/// Shared cache of the latest discovery document.
///
/// Read-mostly, single writer per cycle: each cycle builds a complete
/// document and swaps it in wholesale behind an `Arc`, so readers observe
/// either the previous document or the new one, never a partial write.
#[derive(Default)]
pub struct DiscoveryCache {
    inner: RwLock<Arc<DiscoveryDocument>>,
}

impl DiscoveryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest complete document (cheap clone of the `Arc`).
    pub fn snapshot(&self) -> Arc<DiscoveryDocument> {
        self.inner.read().clone()
    }

    /// Replace the cached document wholesale.
    pub fn replace(&self, document: DiscoveryDocument) {
        *self.inner.write() = Arc::new(document);
    }
}

/// Run one discovery cycle: regenerate every allow-listed endpoint and
/// swap the result into the context's cache.
///
/// Per-item failure isolation: a device or scene that fails generation is
/// logged and excluded from this cycle's document; the cycle always
/// completes.
pub fn run_discovery_cycle(ctx: &BridgeContext) -> Arc<DiscoveryDocument> {
    let generator = EndpointGenerator::new(&ctx.config, ctx.auth_keys.auth_key());
    let mut document = DiscoveryDocument::new();

    for device in ctx.devices.devices() {
        let device_id = device.device_id();
        if !ctx.allow_list.device_allowed(device_id) {
            continue;
        }
        match generator.generate_device_endpoint(device.as_ref()) {
            Ok(endpoint) => {
                document.insert(device_id.to_string(), endpoint);
            }
            Err(e) => {
                log::warn!("[discovery] skipping device {device_id}: {e}");
            }
        }
    }

    for scene in ctx.scenes.scenes() {
        let scene_id = scene.scene_id();
        if !ctx.allow_list.scene_allowed(scene_id) {
            continue;
        }
        match generator.generate_scene_endpoint(scene.as_ref()) {
            Ok(endpoint) => {
                document.insert(scene_id.to_string(), endpoint);
            }
            Err(e) => {
                log::warn!("[discovery] skipping scene {scene_id}: {e}");
            }
        }
    }

    log::info!("[discovery] cycle complete: {} endpoints", document.len());
    ctx.discovery.replace(document);
    ctx.discovery.snapshot()
}

/// Drive discovery on a fixed interval, sleeping a uniform random jitter
/// before each cycle to avoid thundering-herd against the upstream polling
/// service. Runs until the task is dropped.
pub async fn run_discovery_loop(ctx: Arc<BridgeContext>) {
    let mut interval = tokio::time::interval(ctx.config.discovery_interval);
    loop {
        interval.tick().await;
        let jitter_bound = ctx.config.discovery_jitter.as_millis() as u64;
        if jitter_bound > 0 {
            let jitter = rand::thread_rng().gen_range(0..jitter_bound);
            tokio::time::sleep(Duration::from_millis(jitter)).await;
        }
        run_discovery_cycle(&ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::interfaces;
    use crate::test_support::{failing_device, scene, switch_device, TestContext};

    #[test]
    fn test_cycle_isolates_item_failures_and_allow_list() {
        let _ = env_logger::builder().is_test(true).try_init();
        // Three devices: #2 not allow-listed, #3 warns during generation.
        let ctx = TestContext::new()
            .with_device(switch_device("dev-1"))
            .with_device(switch_device("dev-2"))
            .with_device(failing_device("dev-3"))
            .allow_devices(["dev-1", "dev-3"])
            .build();

        let document = run_discovery_cycle(&ctx);
        assert_eq!(document.len(), 1);
        assert!(document.contains_key("dev-1"));
    }

    #[test]
    fn test_cycle_includes_allowed_scenes() {
        let ctx = TestContext::new()
            .with_scene(scene("scene-1"))
            .with_scene(scene("scene-2"))
            .allow_scenes(["scene-1"])
            .build();

        let document = run_discovery_cycle(&ctx);
        assert_eq!(document.len(), 1);
        let endpoint = &document["scene-1"];

        // Exactly the fixed scene capability set.
        let names: Vec<&str> = endpoint
            .capabilities
            .iter()
            .map(|c| c.interface.as_str())
            .collect();
        assert_eq!(names, vec![interfaces::ALEXA, interfaces::SCENE, interfaces::ENDPOINT_HEALTH]);

        let scene_cap = &endpoint.capabilities[1];
        assert_eq!(scene_cap.supports_deactivation, Some(true));
        assert_eq!(scene_cap.proactively_reported, Some(false));

        let health = endpoint.capabilities[2]
            .properties
            .as_ref()
            .expect("health capability carries a properties section");
        assert!(health.proactively_reported);
        assert_eq!(health.supported.len(), 1);
        assert_eq!(health.supported[0].name, "connectivity");
    }

    #[test]
    fn test_cache_swap_is_wholesale() {
        let ctx = TestContext::new()
            .with_device(switch_device("dev-1"))
            .allow_devices(["dev-1"])
            .build();

        let before = ctx.discovery.snapshot();
        run_discovery_cycle(&ctx);
        let after = ctx.discovery.snapshot();

        // The pre-cycle snapshot is untouched by the swap.
        assert!(before.is_empty());
        assert_eq!(after.len(), 1);
    }
}
