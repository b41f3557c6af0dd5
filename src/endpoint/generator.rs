//! Per-entity endpoint generation.

use crate::capability::{capabilities_for, display_category_for, CapabilityDescriptor, DisplayCategory};
use crate::config::BridgeConfig;
use crate::error::AlexaError;
use crate::gateway::{Device, Scene};

use super::document::{EndpointCookie, EndpointDocument, EndpointType};

/// Builds endpoint documents for devices and scenes.
///
/// Bound to the bridge configuration and the current auth-key reference
/// for the duration of one discovery cycle.
pub struct EndpointGenerator<'a> {
    config: &'a BridgeConfig,
    auth_key: String,
}

impl<'a> EndpointGenerator<'a> {
    pub fn new(config: &'a BridgeConfig, auth_key: String) -> Self {
        Self { config, auth_key }
    }

    fn cookie(&self, endpoint_type: EndpointType, gateway_id: &str) -> EndpointCookie {
        EndpointCookie {
            endpoint_type,
            gateway_id: gateway_id.to_string(),
            auth_key: self.auth_key.clone(),
            callback_uri: self.config.callback_uri(),
        }
    }

    /// Build the discovery document for one device.
    ///
    /// Fails with [`AlexaError::DiscoveryItemFailure`] when the gateway
    /// raises a warning assembling the device's metadata; the caller skips
    /// the item and carries on.
    pub fn generate_device_endpoint(
        &self,
        device: &dyn Device,
    ) -> Result<EndpointDocument, AlexaError> {
        let info = device
            .describe()
            .map_err(|e| AlexaError::DiscoveryItemFailure {
                entity_id: device.device_id().to_string(),
                message: e.to_string(),
            })?;

        Ok(EndpointDocument {
            endpoint_id: device.device_id().to_string(),
            manufacturer_name: info.manufacturer,
            friendly_name: info.label,
            description: info.description,
            display_categories: vec![display_category_for(device.platform())],
            cookie: self.cookie(EndpointType::Device, device.gateway_id()),
            capabilities: capabilities_for(device.platform(), device.features()),
        })
    }

    /// Build the discovery document for one scene: fixed SCENE_TRIGGER
    /// category and fixed capability set (base Alexa, deactivatable
    /// SceneController, proactively-reported EndpointHealth).
    pub fn generate_scene_endpoint(&self, scene: &dyn Scene) -> Result<EndpointDocument, AlexaError> {
        Ok(EndpointDocument {
            endpoint_id: scene.scene_id().to_string(),
            manufacturer_name: "Smart Home Gateway".to_string(),
            friendly_name: scene.label().to_string(),
            description: format!("Scene: {}", scene.label()),
            display_categories: vec![DisplayCategory::SceneTrigger],
            cookie: self.cookie(EndpointType::Scene, scene.gateway_id()),
            capabilities: vec![
                CapabilityDescriptor::alexa_base(),
                CapabilityDescriptor::scene_controller(true, false),
                CapabilityDescriptor::endpoint_health(true),
            ],
        })
    }
}
