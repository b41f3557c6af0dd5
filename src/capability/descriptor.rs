//! Alexa capability wire shapes.
//!
//! Every capability object serializes as
//! `{"type": "AlexaInterface", "interface": ..., "version": "3", ...}` with
//! the optional sections (`properties`, `supportsDeactivation`,
//! `cameraStreamConfigurations`) present only where the interface uses
//! them. Shapes are bit-exact where Alexa compatibility matters.

use serde::{Deserialize, Serialize};

/// Alexa interface names advertised by this bridge.
pub mod interfaces {
    pub const ALEXA: &str = "Alexa";
    pub const BRIGHTNESS: &str = "Alexa.BrightnessController";
    pub const CAMERA_STREAM: &str = "Alexa.CameraStreamController";
    pub const CHANNEL: &str = "Alexa.ChannelController";
    pub const COLOR: &str = "Alexa.ColorController";
    pub const COLOR_TEMPERATURE: &str = "Alexa.ColorTemperatureController";
    pub const ENDPOINT_HEALTH: &str = "Alexa.EndpointHealth";
    pub const INPUT: &str = "Alexa.InputController";
    pub const LOCK: &str = "Alexa.LockController";
    pub const PERCENTAGE: &str = "Alexa.PercentageController";
    pub const POWER: &str = "Alexa.PowerController";
    pub const POWER_LEVEL: &str = "Alexa.PowerLevelController";
    pub const SCENE: &str = "Alexa.SceneController";
    pub const SPEAKER: &str = "Alexa.Speaker";
    pub const THERMOSTAT: &str = "Alexa.ThermostatController";
}

/// Payload version carried by every capability and event header.
pub const PAYLOAD_VERSION: &str = "3";

/// One `{"name": ...}` entry in a capability's supported-property list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedProperty {
    pub name: String,
}

impl SupportedProperty {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The `properties` section of a capability object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityProperties {
    pub supported: Vec<SupportedProperty>,
    pub proactively_reported: bool,
    pub retrievable: bool,
}

/// One resolution entry of a camera stream configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraResolution {
    pub width: u32,
    pub height: u32,
}

/// One entry of `cameraStreamConfigurations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraStreamConfiguration {
    pub protocols: Vec<String>,
    pub resolutions: Vec<CameraResolution>,
    pub authorization_types: Vec<String>,
    pub video_codecs: Vec<String>,
    pub audio_codecs: Vec<String>,
}

impl CameraStreamConfiguration {
    /// The fixed stream configuration this bridge advertises: RTSP,
    /// 1280×720, H264/AAC, no auth.
    pub fn fixed() -> Self {
        Self {
            protocols: vec!["RTSP".to_string()],
            resolutions: vec![CameraResolution {
                width: 1280,
                height: 720,
            }],
            authorization_types: vec!["NONE".to_string()],
            video_codecs: vec!["H264".to_string()],
            audio_codecs: vec!["AAC".to_string()],
        }
    }
}

/// An immutable Alexa capability descriptor.
///
/// Derived purely from device platform + feature flags; regenerated on
/// every discovery cycle, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityDescriptor {
    /// Always `"AlexaInterface"`.
    #[serde(rename = "type")]
    pub capability_type: String,

    /// Interface name, e.g. `"Alexa.PowerController"`.
    pub interface: String,

    /// Always `"3"`.
    pub version: String,

    /// Supported-property section, absent for the base interface and for
    /// interfaces that use a configuration section instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<CapabilityProperties>,

    /// Scene-controller deactivation support.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_deactivation: Option<bool>,

    /// Scene-controller top-level proactive-report flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proactively_reported: Option<bool>,

    /// Camera stream configuration section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_stream_configurations: Option<Vec<CameraStreamConfiguration>>,
}

impl CapabilityDescriptor {
    fn base(interface: &str) -> Self {
        Self {
            capability_type: "AlexaInterface".to_string(),
            interface: interface.to_string(),
            version: PAYLOAD_VERSION.to_string(),
            properties: None,
            supports_deactivation: None,
            proactively_reported: None,
            camera_stream_configurations: None,
        }
    }

    /// The base `Alexa` interface capability (no properties).
    pub fn alexa_base() -> Self {
        Self::base(interfaces::ALEXA)
    }

    /// A capability with a supported-property section.
    pub fn with_properties(
        interface: &str,
        names: &[&str],
        proactively_reported: bool,
        retrievable: bool,
    ) -> Self {
        let mut descriptor = Self::base(interface);
        descriptor.properties = Some(CapabilityProperties {
            supported: names.iter().map(|n| SupportedProperty::new(*n)).collect(),
            proactively_reported,
            retrievable,
        });
        descriptor
    }

    /// The EndpointHealth capability every endpoint carries.
    pub fn endpoint_health(proactively_reported: bool) -> Self {
        Self::with_properties(
            interfaces::ENDPOINT_HEALTH,
            &["connectivity"],
            proactively_reported,
            false,
        )
    }

    /// A SceneController capability.
    pub fn scene_controller(supports_deactivation: bool, proactively_reported: bool) -> Self {
        let mut descriptor = Self::base(interfaces::SCENE);
        descriptor.supports_deactivation = Some(supports_deactivation);
        descriptor.proactively_reported = Some(proactively_reported);
        descriptor
    }

    /// The CameraStreamController capability with the fixed configuration.
    pub fn camera_streams() -> Self {
        let mut descriptor = Self::base(interfaces::CAMERA_STREAM);
        descriptor.camera_stream_configurations = Some(vec![CameraStreamConfiguration::fixed()]);
        descriptor
    }

    /// Names in the supported-property section, empty when absent.
    pub fn property_names(&self) -> Vec<&str> {
        self.properties
            .as_ref()
            .map(|p| p.supported.iter().map(|s| s.name.as_str()).collect())
            .unwrap_or_default()
    }
}
