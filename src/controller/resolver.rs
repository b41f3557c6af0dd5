//! Platform → controller set resolution.

use crate::gateway::{DeviceState, FeatureFlag, FeatureSet, Platform};

use super::controllers::Controller;

/// Resolve the controllers that apply to a device.
///
/// Pure mapping over the closed platform enum; each controller is bound to
/// a clone of the given snapshot. Unmapped platforms resolve to an empty
/// list — the dispatcher then serializes a context containing only the
/// EndpointHealth snapshot.
pub fn resolve(platform: Platform, features: &FeatureSet, state: &DeviceState) -> Vec<Controller> {
    match platform {
        Platform::Switch | Platform::Appliance => vec![Controller::Power(state.clone())],
        Platform::Light | Platform::ColorLight | Platform::Fan => {
            let mut controllers = Vec::new();
            if features.has(FeatureFlag::Brightness) {
                controllers.push(Controller::Brightness(state.clone()));
            }
            if features.has_color() {
                controllers.push(Controller::Color(state.clone()));
            }
            controllers
        }
        Platform::Lock => vec![Controller::Lock(state.clone())],
        Platform::Tv => vec![Controller::Channel(state.clone())],
        Platform::Climate | Platform::Scene | Platform::Camera | Platform::Unknown => Vec::new(),
    }
}
