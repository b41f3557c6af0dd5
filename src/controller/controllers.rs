//! Per-capability controllers.

use serde_json::{json, Value};

use crate::capability::interfaces;
use crate::error::AlexaError;
use crate::gateway::DeviceState;

/// A per-capability property reader bound to one device-state snapshot.
///
/// Closed enum: the resolver produces a fixed controller set per platform
/// and the dispatcher matches exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Controller {
    Power(DeviceState),
    Brightness(DeviceState),
    Color(DeviceState),
    Lock(DeviceState),
    Channel(DeviceState),
}

impl Controller {
    /// The Alexa interface this controller serves.
    pub fn interface_name(&self) -> &'static str {
        match self {
            Self::Power(_) => interfaces::POWER,
            Self::Brightness(_) => interfaces::BRIGHTNESS,
            Self::Color(_) => interfaces::COLOR,
            Self::Lock(_) => interfaces::LOCK,
            Self::Channel(_) => interfaces::CHANNEL,
        }
    }

    /// Property names this controller can produce.
    pub fn supported_properties(&self) -> &'static [&'static str] {
        match self {
            Self::Power(_) => &["powerState"],
            Self::Brightness(_) => &["brightness"],
            Self::Color(_) => &["color"],
            Self::Lock(_) => &["lockState"],
            Self::Channel(_) => &["channel"],
        }
    }

    /// Whether Alexa may query this interface's state on demand.
    pub fn is_retrievable(&self) -> bool {
        // All five controller-backed interfaces are retrievable; the
        // non-retrievable capabilities (scene, camera, health) have no
        // controller.
        true
    }

    /// Read one property from the bound snapshot.
    ///
    /// Fails with [`AlexaError::UnsupportedProperty`] for names outside
    /// [`supported_properties`](Self::supported_properties); the context
    /// builder catches that and omits the property, it never reaches the
    /// Alexa-facing response.
    pub fn read_property(&self, name: &str) -> Result<Value, AlexaError> {
        match (self, name) {
            (Self::Power(state), "powerState") | (Self::Channel(state), "channel") => {
                Ok(on_off(state))
            }
            (Self::Brightness(state), "brightness") => {
                Ok(json!(state.percent.unwrap_or(0.0)))
            }
            (Self::Color(state), "color") => {
                let (hue, saturation, brightness) = state.hsb.unwrap_or((0.0, 0.0, 0.0));
                Ok(json!({
                    "hue": hue,
                    "saturation": saturation,
                    "brightness": brightness,
                }))
            }
            (Self::Lock(state), "lockState") => Ok(json!(lock_state(state))),
            _ => Err(AlexaError::UnsupportedProperty {
                property: name.to_string(),
                interface: self.interface_name(),
            }),
        }
    }
}

fn on_off(state: &DeviceState) -> Value {
    json!(if state.is_on.unwrap_or(false) { "ON" } else { "OFF" })
}

/// JAMMED is the fallback when neither locked-true nor locked-false is
/// determinable.
fn lock_state(state: &DeviceState) -> &'static str {
    match state.locked {
        Some(true) => "LOCKED",
        Some(false) => "UNLOCKED",
        None => "JAMMED",
    }
}
