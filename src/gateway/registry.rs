//! Registry traits and command tracking.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::device::Device;
use super::scene::Scene;
use super::GatewayError;

/// Opaque reference to an in-flight gateway command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandRef(pub String);

impl CommandRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Terminal (or not) state of a tracked command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    /// The command completed successfully.
    Done,
    /// The command reached a terminal failure.
    Failed,
    /// The command had not finished when the wait bound expired.
    Pending,
}

impl CommandStatus {
    /// Whether the command reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Read/command access to the gateway's devices.
#[async_trait]
pub trait DeviceRegistry: Send + Sync {
    /// All devices currently known to the gateway.
    fn devices(&self) -> Vec<Arc<dyn Device>>;

    /// Fetch one device by id.
    fn device(&self, device_id: &str) -> Option<Arc<dyn Device>>;

    /// Wait up to `timeout` for the command to reach a terminal state.
    /// Returns [`CommandStatus::Pending`] when the bound expires first;
    /// the caller decides how to surface that.
    async fn wait_for_command(
        &self,
        command: &CommandRef,
        timeout: Duration,
    ) -> Result<CommandStatus, GatewayError>;
}

/// Read access to the gateway's scenes.
pub trait SceneRegistry: Send + Sync {
    /// All scenes currently known to the gateway.
    fn scenes(&self) -> Vec<Arc<dyn Scene>>;

    /// Fetch one scene by id.
    fn scene(&self, scene_id: &str) -> Option<Arc<dyn Scene>>;
}
