//! The Alexa endpoint discovery document.

use serde::{Deserialize, Serialize};

use crate::capability::{CapabilityDescriptor, DisplayCategory};

/// Kind of entity behind an endpoint. Issued in the discovery cookie and
/// echoed back by Alexa in every directive; dispatch routes on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointType {
    Device,
    Scene,
    /// Any endpoint type this bridge never issued. Deserialization maps
    /// unexpected cookie values here; dispatch treats it as a hard
    /// failure.
    #[serde(other)]
    Unknown,
}

/// Opaque cookie attached to every endpoint.
///
/// Alexa stores it verbatim at discovery time and returns it with each
/// directive; it is the only channel through which the bridge learns the
/// endpoint type, owning gateway, and auth reference of an inbound call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointCookie {
    pub endpoint_type: EndpointType,
    pub gateway_id: String,
    /// Opaque auth-key reference from the host's key provider.
    pub auth_key: String,
    /// `https://e.<fqdn>:<port>`, where the host accepts callbacks.
    pub callback_uri: String,
}

/// One device or scene rendered as an Alexa-discoverable endpoint.
///
/// Ephemeral: regenerated from live state on every discovery cycle.
/// Invariant: `capabilities` contains exactly one base `Alexa` capability
/// and exactly one EndpointHealth capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDocument {
    pub endpoint_id: String,
    pub manufacturer_name: String,
    pub friendly_name: String,
    pub description: String,
    pub display_categories: Vec<DisplayCategory>,
    pub cookie: EndpointCookie,
    pub capabilities: Vec<CapabilityDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_wire_shape() {
        let document = EndpointDocument {
            endpoint_id: "dev-1".to_string(),
            manufacturer_name: "Acme".to_string(),
            friendly_name: "Porch Light".to_string(),
            description: "Porch Light via gateway".to_string(),
            display_categories: vec![DisplayCategory::Light],
            cookie: EndpointCookie {
                endpoint_type: EndpointType::Device,
                gateway_id: "gw-1".to_string(),
                auth_key: "key-ref".to_string(),
                callback_uri: "https://e.localhost:8443".to_string(),
            },
            capabilities: vec![CapabilityDescriptor::alexa_base()],
        };
        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["endpointId"], json!("dev-1"));
        assert_eq!(value["displayCategories"], json!(["LIGHT"]));
        assert_eq!(value["cookie"]["endpoint_type"], json!("device"));
        assert_eq!(value["cookie"]["callback_uri"], json!("https://e.localhost:8443"));
    }
}
