//! Inbound directive parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::endpoint::EndpointCookie;
use crate::error::AlexaError;

/// Header of an inbound directive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveHeader {
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub payload_version: Option<String>,
    /// Opaque token echoed back verbatim in the response when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_token: Option<String>,
}

/// The endpoint reference an inbound directive targets, carrying back the
/// cookie issued during discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveEndpoint {
    pub endpoint_id: String,
    pub cookie: EndpointCookie,
    /// Bearer scope; opaque to the bridge, echoed untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Value>,
}

/// A decoded Alexa directive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Directive {
    pub header: DirectiveHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<DirectiveEndpoint>,
    #[serde(default)]
    pub payload: Value,
}

impl Directive {
    /// Parse the outer Alexa envelope `{"directive": {...}}`.
    pub fn parse(envelope: &Value) -> Result<Self, AlexaError> {
        let inner = envelope
            .get("directive")
            .ok_or_else(|| AlexaError::MalformedDirective("missing directive object".to_string()))?;
        serde_json::from_value(inner.clone())
            .map_err(|e| AlexaError::MalformedDirective(e.to_string()))
    }

    /// The endpoint reference, or a malformed-directive error for
    /// directives that require one.
    pub fn require_endpoint(&self) -> Result<&DirectiveEndpoint, AlexaError> {
        self.endpoint
            .as_ref()
            .ok_or_else(|| AlexaError::MalformedDirective("missing endpoint".to_string()))
    }
}
