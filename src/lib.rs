//! # alexa-bridge
//!
//! Amazon Alexa Smart Home adapter for a home-automation gateway.
//!
//! The bridge translates gateway devices and scenes into Alexa endpoint
//! discovery documents and inbound Alexa directives into gateway device
//! commands:
//!
//! ```text
//! discovery cycle ──► EndpointGenerator (capability catalog)
//!                       └─► DiscoveryCache, polled by the host
//!
//! inbound directive ──► Dispatcher (static (namespace, name) table)
//!                       └─► device/scene action
//!                             └─► resolver + controllers ─► ResponseEnvelope
//! ```
//!
//! The host owns device/scene lifecycles, authentication, and request
//! routing; it hands the bridge a [`BridgeContext`] wired with its
//! registry, allow-list, and auth-key collaborators.

pub mod capability;
pub mod config;
pub mod context;
pub mod controller;
pub mod directive;
pub mod endpoint;
pub mod error;
pub mod gateway;

#[cfg(test)]
pub(crate) mod test_support;

pub use capability::{capabilities_for, CapabilityDescriptor};
pub use config::BridgeConfig;
pub use context::BridgeContext;
pub use directive::{Dispatcher, ResponseEnvelope};
pub use endpoint::{run_discovery_cycle, run_discovery_loop, EndpointDocument};
pub use error::AlexaError;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
