//! Response envelope assembly.
//!
//! Every envelope gets a fresh uuid-v4 `messageId` and `payloadVersion`
//! `"3"`, and echoes the request's correlation token and endpoint object
//! exactly when present — and only then.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::capability::interfaces;
use crate::capability::descriptor::PAYLOAD_VERSION;
use crate::controller::Controller;
use crate::error::AlexaError;

use super::request::{Directive, DirectiveEndpoint};

/// Uncertainty window reported with every property snapshot.
pub const UNCERTAINTY_MS: u64 = 500;

/// UTC sample timestamp in the Alexa wire format
/// `YYYY-MM-DDTHH:MM:SS.00Z`.
pub fn sample_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S.00Z").to_string()
}

/// One property value in a response context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySnapshot {
    pub namespace: String,
    pub name: String,
    pub value: Value,
    pub time_of_sample: String,
    pub uncertainty_in_milliseconds: u64,
}

impl PropertySnapshot {
    /// A snapshot stamped with the current time and the default
    /// uncertainty window.
    pub fn now(namespace: &str, name: &str, value: Value) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            value,
            time_of_sample: sample_timestamp(),
            uncertainty_in_milliseconds: UNCERTAINTY_MS,
        }
    }
}

/// The `context` object of a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseContext {
    pub properties: Vec<PropertySnapshot>,
}

impl ResponseContext {
    /// Build a context from the resolved controllers, plus the
    /// EndpointHealth connectivity snapshot every context carries.
    ///
    /// `overridden` replaces the read value for one (namespace, name)
    /// pair — used to report the just-commanded value instead of racing a
    /// re-read against the command still in flight. A controller failing
    /// with `UnsupportedProperty` has that property omitted, never
    /// propagated.
    pub fn from_controllers(
        controllers: &[Controller],
        overridden: Option<(&str, &str, Value)>,
    ) -> Self {
        let mut properties = Vec::new();
        for controller in controllers {
            let namespace = controller.interface_name();
            for &name in controller.supported_properties() {
                let value = match &overridden {
                    Some((over_ns, over_name, over_value))
                        if *over_ns == namespace && *over_name == name =>
                    {
                        over_value.clone()
                    }
                    _ => match controller.read_property(name) {
                        Ok(value) => value,
                        Err(AlexaError::UnsupportedProperty { property, interface }) => {
                            log::debug!(
                                "[dispatcher] omitting unsupported property {property} of {interface}"
                            );
                            continue;
                        }
                        Err(e) => {
                            log::debug!("[dispatcher] omitting property {name}: {e}");
                            continue;
                        }
                    },
                };
                properties.push(PropertySnapshot::now(namespace, name, value));
            }
        }

        properties.push(PropertySnapshot::now(
            interfaces::ENDPOINT_HEALTH,
            "connectivity",
            json!({"value": "OK"}),
        ));

        Self { properties }
    }
}

/// Event header of a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHeader {
    pub namespace: String,
    pub name: String,
    pub message_id: String,
    pub payload_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_token: Option<String>,
}

impl EventHeader {
    /// Fresh header with a new uuid-v4 message id.
    pub fn new(namespace: &str, name: &str, correlation_token: Option<String>) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            message_id: Uuid::new_v4().to_string(),
            payload_version: PAYLOAD_VERSION.to_string(),
            correlation_token,
        }
    }
}

/// The `event` object of a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEvent {
    pub header: EventHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<DirectiveEndpoint>,
    pub payload: Value,
}

/// A complete Alexa response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub event: ResponseEvent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ResponseContext>,
}

impl ResponseEnvelope {
    fn build(
        directive: &Directive,
        namespace: &str,
        name: &str,
        payload: Value,
        context: Option<ResponseContext>,
    ) -> Self {
        Self {
            event: ResponseEvent {
                header: EventHeader::new(
                    namespace,
                    name,
                    directive.header.correlation_token.clone(),
                ),
                endpoint: directive.endpoint.clone(),
                payload,
            },
            context,
        }
    }

    /// The standard `Alexa.Response` for a completed directive.
    pub fn response(directive: &Directive, context: ResponseContext) -> Self {
        Self::build(directive, interfaces::ALEXA, "Response", json!({}), Some(context))
    }

    /// An `Alexa.StateReport` answering `ReportState`.
    pub fn state_report(directive: &Directive, context: ResponseContext) -> Self {
        Self::build(
            directive,
            interfaces::ALEXA,
            "StateReport",
            json!({}),
            Some(context),
        )
    }

    /// A scene `ActivationStarted` / `DeactivationStarted` event.
    pub fn scene_event(directive: &Directive, name: &str) -> Self {
        let payload = json!({
            "cause": {"type": "VOICE_INTERACTION"},
            "timestamp": sample_timestamp(),
        });
        Self::build(directive, interfaces::SCENE, name, payload, None)
    }

    /// A structured minimal `ErrorResponse`. No internals cross the
    /// boundary: only the error type and a short message.
    pub fn error_response(directive: &Directive, error_type: &str, message: &str) -> Self {
        Self::build(
            directive,
            interfaces::ALEXA,
            "ErrorResponse",
            json!({"type": error_type, "message": message}),
            None,
        )
    }

    /// The generic failure sentinel for unregistered (namespace, name)
    /// pairs.
    pub fn failure_sentinel(directive: &Directive) -> Self {
        Self::error_response(directive, "INVALID_DIRECTIVE", "failed...")
    }
}
