//! The directive dispatch table.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::capability::interfaces;
use crate::context::BridgeContext;
use crate::error::AlexaError;
use crate::gateway::{Device, Scene};

use super::handlers::{self, HandlerFn};
use super::request::Directive;
use super::response::ResponseEnvelope;
use crate::endpoint::EndpointType;

/// The entity a directive targets, resolved from the cookie's endpoint
/// type.
pub enum TargetEntity {
    Device(Arc<dyn Device>),
    Scene(Arc<dyn Scene>),
}

/// Namespaces a handler may legally be registered under.
const KNOWN_NAMESPACES: &[&str] = &[
    interfaces::ALEXA,
    interfaces::BRIGHTNESS,
    interfaces::CHANNEL,
    interfaces::COLOR,
    interfaces::COLOR_TEMPERATURE,
    interfaces::INPUT,
    interfaces::LOCK,
    interfaces::PERCENTAGE,
    interfaces::POWER,
    interfaces::POWER_LEVEL,
    interfaces::SCENE,
    interfaces::SPEAKER,
];

/// Static (namespace, name) → handler table.
///
/// Built once at startup; registrations are validated eagerly (unknown
/// namespaces and duplicates are rejected and logged) instead of being
/// resolved by name at dispatch time.
pub struct Dispatcher {
    table: HashMap<(String, String), HandlerFn>,
}

impl Dispatcher {
    /// Empty table.
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// The full built-in handler set.
    pub fn with_defaults() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(interfaces::POWER, "TurnOn", handlers::turn_on);
        dispatcher.register(interfaces::POWER, "TurnOff", handlers::turn_off);
        dispatcher.register(interfaces::BRIGHTNESS, "SetBrightness", handlers::set_brightness);
        dispatcher.register(interfaces::POWER_LEVEL, "SetPowerLevel", handlers::set_power_level);
        dispatcher.register(interfaces::PERCENTAGE, "SetPercentage", handlers::set_percentage);
        dispatcher.register(interfaces::COLOR, "SetColor", handlers::set_color);
        dispatcher.register(interfaces::CHANNEL, "ChangeChannel", handlers::change_channel);
        dispatcher.register(interfaces::LOCK, "Lock", handlers::lock);
        dispatcher.register(interfaces::LOCK, "Unlock", handlers::unlock);
        dispatcher.register(interfaces::SCENE, "Activate", handlers::scene_activate);
        dispatcher.register(interfaces::SCENE, "Deactivate", handlers::scene_deactivate);
        dispatcher.register(interfaces::ALEXA, "ReportState", handlers::report_state);
        dispatcher
    }

    /// Register a handler. Returns `false` (and logs) for an unknown
    /// namespace or a duplicate (namespace, name) pair.
    pub fn register(&mut self, namespace: &str, name: &str, handler: HandlerFn) -> bool {
        if !KNOWN_NAMESPACES.contains(&namespace) {
            log::warn!("[dispatcher] rejecting handler for unknown namespace {namespace}");
            return false;
        }
        let key = (namespace.to_string(), name.to_string());
        if self.table.contains_key(&key) {
            log::warn!("[dispatcher] rejecting duplicate handler for {namespace}::{name}");
            return false;
        }
        self.table.insert(key, handler);
        true
    }

    /// Whether a handler is registered for the pair.
    pub fn has_handler(&self, namespace: &str, name: &str) -> bool {
        self.table
            .contains_key(&(namespace.to_string(), name.to_string()))
    }

    /// Dispatch one raw Alexa envelope.
    ///
    /// `Err` is reserved for hard failures (malformed envelope, unknown
    /// endpoint type, endpoint no longer known). Everything else — an
    /// unregistered (namespace, name) pair, a timed-out lock wait, a
    /// gateway refusal — comes back as `Ok` with a structured failure
    /// envelope, so one bad directive never tears down the host's request
    /// surface.
    pub async fn dispatch(
        &self,
        ctx: &BridgeContext,
        envelope: &Value,
    ) -> Result<ResponseEnvelope, AlexaError> {
        let directive = Directive::parse(envelope)?;
        let target = self.resolve_target(ctx, &directive)?;

        let key = (
            directive.header.namespace.clone(),
            directive.header.name.clone(),
        );
        let Some(handler) = self.table.get(&key) else {
            let err = AlexaError::UnknownDirective {
                namespace: key.0,
                name: key.1,
            };
            log::warn!("[dispatcher] {err}");
            return Ok(ResponseEnvelope::failure_sentinel(&directive));
        };

        match handler(ctx, &directive, &target).await {
            Ok(response) => Ok(response),
            Err(AlexaError::CommandTimeout { timeout }) => {
                log::warn!(
                    "[dispatcher] {}::{} timed out after {timeout:?}",
                    key.0,
                    key.1
                );
                Ok(ResponseEnvelope::error_response(
                    &directive,
                    "ENDPOINT_UNREACHABLE",
                    "command did not complete in time",
                ))
            }
            Err(AlexaError::Gateway(e)) => {
                log::warn!("[dispatcher] {}::{} gateway failure: {e}", key.0, key.1);
                Ok(ResponseEnvelope::error_response(
                    &directive,
                    "ENDPOINT_UNREACHABLE",
                    "the endpoint did not accept the command",
                ))
            }
            Err(AlexaError::UnsupportedInterface { .. } | AlexaError::MalformedDirective(_)) => {
                Ok(ResponseEnvelope::error_response(
                    &directive,
                    "INVALID_DIRECTIVE",
                    "the directive is not valid for this endpoint",
                ))
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve the target entity from the endpoint cookie. Unknown endpoint
    /// type is a hard failure.
    fn resolve_target(
        &self,
        ctx: &BridgeContext,
        directive: &Directive,
    ) -> Result<TargetEntity, AlexaError> {
        let endpoint = directive.require_endpoint()?;
        match endpoint.cookie.endpoint_type {
            EndpointType::Device => ctx
                .devices
                .device(&endpoint.endpoint_id)
                .map(TargetEntity::Device)
                .ok_or_else(|| AlexaError::EndpointNotFound(endpoint.endpoint_id.clone())),
            EndpointType::Scene => ctx
                .scenes
                .scene(&endpoint.endpoint_id)
                .map(TargetEntity::Scene)
                .ok_or_else(|| AlexaError::EndpointNotFound(endpoint.endpoint_id.clone())),
            EndpointType::Unknown => Err(AlexaError::UnknownEndpointType(
                "unrecognized endpoint type in cookie".to_string(),
            )),
        }
    }
}
