//! Crate-wide error taxonomy.
//!
//! Entity-local failures (one device, one capability, one property) never
//! abort a batch operation: discovery skips the failing item and directive
//! dispatch answers with a structured `ErrorResponse`. Nothing in here is
//! serialized across the Alexa boundary directly.

use std::time::Duration;

use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors raised by the capability catalog, endpoint generation, and
/// directive dispatch.
#[derive(Debug, Error)]
pub enum AlexaError {
    /// The entity cannot satisfy the requested capability. Surfaced by
    /// skipping that capability, never by aborting endpoint generation.
    #[error("interface {interface} not supported by endpoint {endpoint_id}")]
    UnsupportedInterface {
        interface: String,
        endpoint_id: String,
    },

    /// A controller was asked for a property it does not produce. The
    /// context builder catches this and omits the property.
    #[error("property {property} not produced by {interface}")]
    UnsupportedProperty {
        property: String,
        interface: &'static str,
    },

    /// No handler registered for this (namespace, name) pair.
    #[error("no handler registered for {namespace}::{name}")]
    UnknownDirective { namespace: String, name: String },

    /// A bounded wait for command completion expired without the command
    /// reaching a terminal state.
    #[error("command did not reach a terminal state within {timeout:?}")]
    CommandTimeout { timeout: Duration },

    /// One device or scene failed during endpoint generation. The item is
    /// excluded from that cycle's document; the cycle continues.
    #[error("endpoint generation failed for {entity_id}: {message}")]
    DiscoveryItemFailure { entity_id: String, message: String },

    /// The directive's cookie carried an endpoint type we never issue.
    #[error("unknown endpoint type in directive cookie: {0}")]
    UnknownEndpointType(String),

    /// The directive targeted an entity the registries no longer know.
    #[error("endpoint not found: {0}")]
    EndpointNotFound(String),

    /// The inbound directive envelope is missing required fields.
    #[error("malformed directive: {0}")]
    MalformedDirective(String),

    /// A host-collaborator call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
