//! Allow-list reads.
//!
//! The allow-list itself is persisted and edited by a configuration UI
//! outside this crate; discovery only reads it.

/// Persisted set of entity ids permitted to be exposed to Alexa.
pub trait AllowListStore: Send + Sync {
    /// Whether the device may appear in discovery documents.
    fn device_allowed(&self, device_id: &str) -> bool;

    /// Whether the scene may appear in discovery documents.
    fn scene_allowed(&self, scene_id: &str) -> bool;
}
