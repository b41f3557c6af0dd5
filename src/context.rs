//! The bridge context.
//!
//! One explicit context object constructed at startup and passed by
//! reference to every operation — there are no ambient mutable singletons.
//! It owns the configuration, the collaborator handles, and the shared
//! discovery cache.

use std::sync::Arc;

use crate::config::BridgeConfig;
use crate::endpoint::DiscoveryCache;
use crate::gateway::{AllowListStore, AuthKeyProvider, DeviceRegistry, SceneRegistry};

/// Everything a discovery cycle or directive dispatch needs.
pub struct BridgeContext {
    /// Bridge configuration.
    pub config: BridgeConfig,
    /// Host device registry.
    pub devices: Arc<dyn DeviceRegistry>,
    /// Host scene registry.
    pub scenes: Arc<dyn SceneRegistry>,
    /// Host allow-list store.
    pub allow_list: Arc<dyn AllowListStore>,
    /// Host auth-key provider.
    pub auth_keys: Arc<dyn AuthKeyProvider>,
    /// Latest discovery document, swapped wholesale each cycle.
    pub discovery: DiscoveryCache,
}

impl BridgeContext {
    /// Assemble a context from the host's collaborators.
    pub fn new(
        config: BridgeConfig,
        devices: Arc<dyn DeviceRegistry>,
        scenes: Arc<dyn SceneRegistry>,
        allow_list: Arc<dyn AllowListStore>,
        auth_keys: Arc<dyn AuthKeyProvider>,
    ) -> Self {
        Self {
            config,
            devices,
            scenes,
            allow_list,
            auth_keys,
            discovery: DiscoveryCache::new(),
        }
    }
}
