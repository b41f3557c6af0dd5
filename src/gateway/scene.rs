//! The `Scene` collaborator trait.

use async_trait::async_trait;

use super::GatewayError;

/// A gateway scene (a named group action that can be started or stopped).
#[async_trait]
pub trait Scene: Send + Sync {
    /// Stable scene identifier.
    fn scene_id(&self) -> &str;

    /// Identifier of the gateway that owns this scene.
    fn gateway_id(&self) -> &str;

    /// Human label shown as the Alexa friendly name.
    fn label(&self) -> &str;

    /// Activate the scene. Does not wait for member devices to settle.
    async fn start(&self) -> Result<(), GatewayError>;

    /// Deactivate the scene.
    async fn stop(&self) -> Result<(), GatewayError>;
}
