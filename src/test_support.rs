//! Mock collaborators shared across the crate's test modules.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::config::BridgeConfig;
use crate::context::BridgeContext;
use crate::gateway::{
    AllowListStore, AuthKeyProvider, ChannelTarget, CommandRef, CommandStatus, Device,
    DeviceInfo, DeviceRegistry, DeviceState, FeatureFlag, FeatureSet, GatewayError, Platform,
    Scene, SceneRegistry,
};

// ---------------------------------------------------------------------------
// Mock device
// ---------------------------------------------------------------------------

pub struct MockDevice {
    pub id: String,
    pub platform: Platform,
    pub features: FeatureSet,
    state: Mutex<DeviceState>,
    describe_fails: bool,
    calls: Mutex<Vec<String>>,
}

impl MockDevice {
    pub fn new(id: &str, platform: Platform, features: FeatureSet) -> Self {
        Self {
            id: id.to_string(),
            platform,
            features,
            state: Mutex::new(DeviceState::default()),
            describe_fails: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Action names invoked on this device, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn set_on(&self, on: bool) {
        self.state.lock().is_on = Some(on);
    }

    pub fn set_locked(&self, locked: Option<bool>) {
        self.state.lock().locked = locked;
    }

    fn record(&self, call: &str) -> Result<CommandRef, GatewayError> {
        self.calls.lock().push(call.to_string());
        Ok(CommandRef::new(format!("cmd-{call}")))
    }
}

#[async_trait]
impl Device for MockDevice {
    fn device_id(&self) -> &str {
        &self.id
    }

    fn gateway_id(&self) -> &str {
        "gw-test"
    }

    fn platform(&self) -> Platform {
        self.platform
    }

    fn features(&self) -> &FeatureSet {
        &self.features
    }

    fn describe(&self) -> Result<DeviceInfo, GatewayError> {
        if self.describe_fails {
            return Err(GatewayError::Warning("metadata assembly failed".to_string()));
        }
        Ok(DeviceInfo {
            label: format!("Device {}", self.id),
            description: format!("Test device {}", self.id),
            manufacturer: "Acme".to_string(),
        })
    }

    fn status(&self) -> Result<DeviceState, GatewayError> {
        Ok(self.state.lock().clone())
    }

    async fn turn_on(&self) -> Result<CommandRef, GatewayError> {
        self.record("turn_on")
    }

    async fn turn_off(&self) -> Result<CommandRef, GatewayError> {
        self.record("turn_off")
    }

    async fn set_percent(&self, _percent: f64) -> Result<CommandRef, GatewayError> {
        self.record("set_percent")
    }

    async fn set_color(
        &self,
        _hue: f64,
        _saturation: f64,
        _brightness: f64,
    ) -> Result<CommandRef, GatewayError> {
        self.record("set_color")
    }

    async fn lock(&self) -> Result<CommandRef, GatewayError> {
        self.record("lock")
    }

    async fn unlock(&self) -> Result<CommandRef, GatewayError> {
        self.record("unlock")
    }

    async fn set_channel(&self, _channel: &ChannelTarget) -> Result<CommandRef, GatewayError> {
        self.record("set_channel")
    }
}

/// A switch with power control, initially off.
pub fn switch_device(id: &str) -> Arc<MockDevice> {
    Arc::new(MockDevice::new(
        id,
        Platform::Switch,
        FeatureSet::from_flags([FeatureFlag::PowerControl]),
    ))
}

/// A lock, initially unlocked.
pub fn lock_device(id: &str) -> Arc<MockDevice> {
    let device = MockDevice::new(id, Platform::Lock, FeatureSet::new());
    device.set_locked(Some(false));
    Arc::new(device)
}

/// A device whose metadata assembly raises a gateway warning.
pub fn failing_device(id: &str) -> Arc<MockDevice> {
    let mut device = MockDevice::new(id, Platform::Switch, FeatureSet::new());
    device.describe_fails = true;
    Arc::new(device)
}

// ---------------------------------------------------------------------------
// Mock scene
// ---------------------------------------------------------------------------

pub struct MockScene {
    pub id: String,
    calls: Mutex<Vec<String>>,
}

impl MockScene {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Scene for MockScene {
    fn scene_id(&self) -> &str {
        &self.id
    }

    fn gateway_id(&self) -> &str {
        "gw-test"
    }

    fn label(&self) -> &str {
        "Movie Night"
    }

    async fn start(&self) -> Result<(), GatewayError> {
        self.calls.lock().push("start".to_string());
        Ok(())
    }

    async fn stop(&self) -> Result<(), GatewayError> {
        self.calls.lock().push("stop".to_string());
        Ok(())
    }
}

pub fn scene(id: &str) -> Arc<MockScene> {
    Arc::new(MockScene {
        id: id.to_string(),
        calls: Mutex::new(Vec::new()),
    })
}

// ---------------------------------------------------------------------------
// Mock registries / stores
// ---------------------------------------------------------------------------

pub struct MockDeviceRegistry {
    devices: Vec<Arc<dyn Device>>,
    wait_status: CommandStatus,
}

#[async_trait]
impl DeviceRegistry for MockDeviceRegistry {
    fn devices(&self) -> Vec<Arc<dyn Device>> {
        self.devices.clone()
    }

    fn device(&self, device_id: &str) -> Option<Arc<dyn Device>> {
        self.devices
            .iter()
            .find(|d| d.device_id() == device_id)
            .cloned()
    }

    async fn wait_for_command(
        &self,
        _command: &CommandRef,
        _timeout: Duration,
    ) -> Result<CommandStatus, GatewayError> {
        Ok(self.wait_status)
    }
}

pub struct MockSceneRegistry {
    scenes: Vec<Arc<dyn Scene>>,
}

impl SceneRegistry for MockSceneRegistry {
    fn scenes(&self) -> Vec<Arc<dyn Scene>> {
        self.scenes.clone()
    }

    fn scene(&self, scene_id: &str) -> Option<Arc<dyn Scene>> {
        self.scenes
            .iter()
            .find(|s| s.scene_id() == scene_id)
            .cloned()
    }
}

pub struct MockAllowList {
    devices: HashSet<String>,
    scenes: HashSet<String>,
    allow_all: bool,
}

impl AllowListStore for MockAllowList {
    fn device_allowed(&self, device_id: &str) -> bool {
        self.allow_all || self.devices.contains(device_id)
    }

    fn scene_allowed(&self, scene_id: &str) -> bool {
        self.allow_all || self.scenes.contains(scene_id)
    }
}

pub struct MockAuthKeys;

impl AuthKeyProvider for MockAuthKeys {
    fn auth_key(&self) -> String {
        "auth-key-ref".to_string()
    }
}

// ---------------------------------------------------------------------------
// Context builder
// ---------------------------------------------------------------------------

/// Builder assembling a `BridgeContext` over mock collaborators.
///
/// Unless an allow-list is given explicitly, everything is allowed.
pub struct TestContext {
    devices: Vec<Arc<dyn Device>>,
    scenes: Vec<Arc<dyn Scene>>,
    allowed_devices: Option<HashSet<String>>,
    allowed_scenes: Option<HashSet<String>>,
    wait_status: CommandStatus,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            scenes: Vec::new(),
            allowed_devices: None,
            allowed_scenes: None,
            wait_status: CommandStatus::Done,
        }
    }

    pub fn with_device(mut self, device: Arc<MockDevice>) -> Self {
        self.devices.push(device);
        self
    }

    pub fn with_scene(mut self, scene: Arc<MockScene>) -> Self {
        self.scenes.push(scene);
        self
    }

    pub fn allow_devices<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.allowed_devices = Some(ids.into_iter().map(String::from).collect());
        self
    }

    pub fn allow_scenes<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.allowed_scenes = Some(ids.into_iter().map(String::from).collect());
        self
    }

    pub fn wait_status(mut self, status: CommandStatus) -> Self {
        self.wait_status = status;
        self
    }

    pub fn build(self) -> BridgeContext {
        let allow_all = self.allowed_devices.is_none() && self.allowed_scenes.is_none();
        BridgeContext::new(
            BridgeConfig::default(),
            Arc::new(MockDeviceRegistry {
                devices: self.devices,
                wait_status: self.wait_status,
            }),
            Arc::new(MockSceneRegistry {
                scenes: self.scenes,
            }),
            Arc::new(MockAllowList {
                devices: self.allowed_devices.unwrap_or_default(),
                scenes: self.allowed_scenes.unwrap_or_default(),
                allow_all,
            }),
            Arc::new(MockAuthKeys),
        )
    }
}

// ---------------------------------------------------------------------------
// Envelope builder
// ---------------------------------------------------------------------------

/// Build a raw Alexa directive envelope targeting one endpoint.
pub fn directive_envelope(
    namespace: &str,
    name: &str,
    endpoint_id: &str,
    endpoint_type: &str,
    correlation_token: Option<&str>,
    payload: Value,
) -> Value {
    let mut header = json!({
        "namespace": namespace,
        "name": name,
        "messageId": "msg-test",
        "payloadVersion": "3"
    });
    if let Some(token) = correlation_token {
        header["correlationToken"] = json!(token);
    }
    json!({
        "directive": {
            "header": header,
            "endpoint": {
                "endpointId": endpoint_id,
                "cookie": {
                    "endpoint_type": endpoint_type,
                    "gateway_id": "gw-test",
                    "auth_key": "auth-key-ref",
                    "callback_uri": "https://e.localhost:8443"
                }
            },
            "payload": payload
        }
    })
}
