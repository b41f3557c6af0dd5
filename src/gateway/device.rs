//! Device-side value types and the `Device` collaborator trait.
//!
//! Platforms and feature flags are closed enums: the capability catalog and
//! the interface resolver match on them exhaustively, and unknown tags or
//! keys coming from the gateway degrade to `Platform::Unknown` / an absent
//! flag instead of an error.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::registry::CommandRef;
use super::GatewayError;

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// The gateway platform a device belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Switch,
    Appliance,
    Light,
    ColorLight,
    Fan,
    Climate,
    Scene,
    Camera,
    Tv,
    Lock,
    /// Any platform tag the bridge does not recognize. Such devices get
    /// only the base and health capabilities and the OTHER display
    /// category.
    Unknown,
}

impl Platform {
    /// Map a gateway platform tag to a `Platform`. Unrecognized tags map
    /// to [`Platform::Unknown`]; no error is raised.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "switch" => Self::Switch,
            "appliance" => Self::Appliance,
            "light" => Self::Light,
            "color_light" => Self::ColorLight,
            "fan" => Self::Fan,
            "climate" => Self::Climate,
            "scene" => Self::Scene,
            "camera" => Self::Camera,
            "tv" => Self::Tv,
            "lock" => Self::Lock,
            other => {
                log::debug!("[gateway] unrecognized platform tag: {other}");
                Self::Unknown
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Feature flags
// ---------------------------------------------------------------------------

/// A device feature the gateway can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureFlag {
    PowerControl,
    Brightness,
    ColorTemperature,
    RgbColor,
    XyColor,
    DualSetpoints,
    ChannelControl,
    InputControl,
}

impl FeatureFlag {
    /// Parse a gateway feature key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "power_control" => Some(Self::PowerControl),
            "brightness" => Some(Self::Brightness),
            "color_temperature" => Some(Self::ColorTemperature),
            "color_rgb" => Some(Self::RgbColor),
            "color_xy" => Some(Self::XyColor),
            "dual_setpoints" => Some(Self::DualSetpoints),
            "channel_control" => Some(Self::ChannelControl),
            "input_control" => Some(Self::InputControl),
            _ => None,
        }
    }
}

/// The set of features a device supports.
///
/// Built from the gateway's loosely-typed flag map: only known keys with
/// truthy values are kept, everything else reads as "flag absent".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    flags: BTreeSet<FeatureFlag>,
}

impl FeatureSet {
    /// Empty feature set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a gateway flag map. Unknown keys are logged at debug
    /// level and ignored; non-boolean or false values read as absent.
    pub fn from_map(raw: &HashMap<String, Value>) -> Self {
        let mut flags = BTreeSet::new();
        for (key, value) in raw {
            let Some(flag) = FeatureFlag::from_key(key) else {
                log::debug!("[gateway] ignoring unknown feature key: {key}");
                continue;
            };
            if value.as_bool().unwrap_or(false) {
                flags.insert(flag);
            }
        }
        Self { flags }
    }

    /// Build from an explicit list of flags.
    pub fn from_flags(flags: impl IntoIterator<Item = FeatureFlag>) -> Self {
        Self {
            flags: flags.into_iter().collect(),
        }
    }

    /// Whether the device supports the given feature.
    pub fn has(&self, flag: FeatureFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Whether any color feature (RGB or XY) is supported.
    pub fn has_color(&self) -> bool {
        self.has(FeatureFlag::RgbColor) || self.has(FeatureFlag::XyColor)
    }
}

// ---------------------------------------------------------------------------
// Device snapshots
// ---------------------------------------------------------------------------

/// Display metadata for a device, assembled by the gateway on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Human label shown as the Alexa friendly name.
    pub label: String,
    /// Longer description.
    pub description: String,
    /// Manufacturer name.
    pub manufacturer: String,
}

/// A snapshot of a device's current property values.
///
/// Fields are optional because not every platform reports every value;
/// controllers interpret `None` per their own rules (e.g. an undeterminable
/// lock state reads as JAMMED).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    /// Boolean on-state (power).
    pub is_on: Option<bool>,
    /// Brightness / power level, 0–100.
    pub percent: Option<f64>,
    /// Hue (0–360), saturation (0–1), brightness (0–1).
    pub hsb: Option<(f64, f64, f64)>,
    /// `Some(true)` locked, `Some(false)` unlocked, `None` undeterminable.
    pub locked: Option<bool>,
}

/// Target of a channel-change command. Plain strings per the Alexa
/// `ChangeChannel` payload schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_sign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_call_sign: Option<String>,
}

// ---------------------------------------------------------------------------
// Device trait
// ---------------------------------------------------------------------------

/// A controllable gateway device.
///
/// Read accessors are synchronous snapshots; actions are asynchronous and
/// return a [`CommandRef`] that can be awaited through
/// [`DeviceRegistry::wait_for_command`](super::registry::DeviceRegistry::wait_for_command).
/// `describe` and `status` are fallible: the gateway may raise a domain
/// warning while assembling them, and discovery must be able to skip the
/// failing device.
#[async_trait]
pub trait Device: Send + Sync {
    /// Stable device identifier.
    fn device_id(&self) -> &str;

    /// Identifier of the gateway that owns this device.
    fn gateway_id(&self) -> &str;

    /// Platform tag, already mapped to the closed enum.
    fn platform(&self) -> Platform;

    /// Supported feature flags.
    fn features(&self) -> &FeatureSet;

    /// Display metadata. Fallible: gateway-side assembly may warn.
    fn describe(&self) -> Result<DeviceInfo, GatewayError>;

    /// Snapshot of current property values. Fallible: the device may be
    /// unreachable.
    fn status(&self) -> Result<DeviceState, GatewayError>;

    async fn turn_on(&self) -> Result<CommandRef, GatewayError>;

    async fn turn_off(&self) -> Result<CommandRef, GatewayError>;

    /// Set brightness / power level / percentage, 0–100.
    async fn set_percent(&self, percent: f64) -> Result<CommandRef, GatewayError>;

    /// Set color from hue (0–360), saturation (0–1), brightness (0–1).
    async fn set_color(
        &self,
        hue: f64,
        saturation: f64,
        brightness: f64,
    ) -> Result<CommandRef, GatewayError>;

    async fn lock(&self) -> Result<CommandRef, GatewayError>;

    async fn unlock(&self) -> Result<CommandRef, GatewayError>;

    async fn set_channel(&self, channel: &ChannelTarget) -> Result<CommandRef, GatewayError>;
}
