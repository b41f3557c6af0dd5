//! Host-gateway collaborators.
//!
//! The bridge never owns devices, scenes, allow-lists, or credentials; it
//! consumes them through the narrow traits in this module. The host wires
//! concrete implementations into a [`BridgeContext`](crate::BridgeContext)
//! at startup.

pub mod allow_list;
pub mod auth;
pub mod device;
pub mod registry;
pub mod scene;

use thiserror::Error;

pub use allow_list::AllowListStore;
pub use auth::AuthKeyProvider;
pub use device::{ChannelTarget, Device, DeviceInfo, DeviceState, FeatureFlag, FeatureSet, Platform};
pub use registry::{CommandRef, CommandStatus, DeviceRegistry, SceneRegistry};
pub use scene::Scene;

/// Errors raised by host-collaborator calls.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The device rejected or could not execute a command.
    #[error("command failed on {device_id}: {message}")]
    CommandFailed { device_id: String, message: String },

    /// The entity is known but currently unreachable.
    #[error("entity unavailable: {0}")]
    Unavailable(String),

    /// The gateway raised a domain warning while assembling entity data.
    #[error("gateway warning: {0}")]
    Warning(String),
}
