//! The capability catalog: platform + feature flags → capability list.
//!
//! Rules are evaluated platform-first; a platform-specific rule wins and
//! skips the feature scan, the generic platforms fall through to an
//! independent per-flag scan, and unrecognized platforms advertise nothing.
//! Every result additionally carries the base `Alexa` capability and one
//! EndpointHealth capability.

use serde::{Deserialize, Serialize};

use crate::gateway::{FeatureFlag, FeatureSet, Platform};

use super::descriptor::{interfaces, CapabilityDescriptor};

/// Alexa display category for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayCategory {
    #[serde(rename = "SWITCH")]
    Switch,
    #[serde(rename = "SMARTPLUG")]
    SmartPlug,
    #[serde(rename = "LIGHT")]
    Light,
    #[serde(rename = "FAN")]
    Fan,
    #[serde(rename = "THERMOSTAT")]
    Thermostat,
    #[serde(rename = "CAMERA")]
    Camera,
    #[serde(rename = "TV")]
    Tv,
    #[serde(rename = "SMARTLOCK")]
    SmartLock,
    #[serde(rename = "SCENE_TRIGGER")]
    SceneTrigger,
    #[serde(rename = "OTHER")]
    Other,
}

/// Static platform → display category table. Unrecognized platforms fall
/// back to OTHER.
pub fn display_category_for(platform: Platform) -> DisplayCategory {
    match platform {
        Platform::Switch => DisplayCategory::Switch,
        Platform::Appliance => DisplayCategory::SmartPlug,
        Platform::Light | Platform::ColorLight => DisplayCategory::Light,
        Platform::Fan => DisplayCategory::Fan,
        Platform::Climate => DisplayCategory::Thermostat,
        Platform::Camera => DisplayCategory::Camera,
        Platform::Tv => DisplayCategory::Tv,
        Platform::Lock => DisplayCategory::SmartLock,
        Platform::Scene => DisplayCategory::SceneTrigger,
        Platform::Unknown => DisplayCategory::Other,
    }
}

/// Derive the Alexa capabilities a device advertises.
///
/// Pure: the same platform + feature set always yields the same list.
/// Unknown platforms add nothing beyond the base and health capabilities.
pub fn capabilities_for(platform: Platform, features: &FeatureSet) -> Vec<CapabilityDescriptor> {
    let mut capabilities = match platform {
        Platform::Climate => climate_capabilities(features),
        Platform::Scene => vec![CapabilityDescriptor::scene_controller(false, false)],
        Platform::Camera => vec![CapabilityDescriptor::camera_streams()],
        Platform::Tv => tv_capabilities(features),
        Platform::Lock => vec![CapabilityDescriptor::with_properties(
            interfaces::LOCK,
            &["lockState"],
            false,
            true,
        )],
        Platform::Switch
        | Platform::Appliance
        | Platform::Light
        | Platform::ColorLight
        | Platform::Fan => feature_scan(features),
        // Unrecognized platforms advertise nothing actionable, whatever
        // flags the gateway reports for them.
        Platform::Unknown => Vec::new(),
    };

    capabilities.push(CapabilityDescriptor::alexa_base());
    capabilities.push(CapabilityDescriptor::endpoint_health(false));
    capabilities
}

fn climate_capabilities(features: &FeatureSet) -> Vec<CapabilityDescriptor> {
    let names: &[&str] = if features.has(FeatureFlag::DualSetpoints) {
        &["upperSetpoint", "lowerSetpoint", "thermostatMode"]
    } else {
        &["targetSetpoint", "thermostatMode"]
    };
    vec![CapabilityDescriptor::with_properties(
        interfaces::THERMOSTAT,
        names,
        false,
        true,
    )]
}

/// TV capabilities. `channel_control` and `input_control` gate their
/// capabilities independently; neither is nested behind the other.
fn tv_capabilities(features: &FeatureSet) -> Vec<CapabilityDescriptor> {
    let mut capabilities = vec![CapabilityDescriptor::with_properties(
        interfaces::CHANNEL,
        &["channel"],
        false,
        true,
    )];
    if features.has(FeatureFlag::ChannelControl) {
        capabilities.push(CapabilityDescriptor::with_properties(
            interfaces::INPUT,
            &["input"],
            false,
            true,
        ));
    }
    if features.has(FeatureFlag::InputControl) {
        capabilities.push(CapabilityDescriptor::with_properties(
            interfaces::SPEAKER,
            &["volume", "muted"],
            false,
            true,
        ));
    }
    capabilities
}

/// Fallback feature scan for platforms with no specific rule. Each flag is
/// checked independently and may add zero or more capabilities.
fn feature_scan(features: &FeatureSet) -> Vec<CapabilityDescriptor> {
    let mut capabilities = Vec::new();

    if features.has(FeatureFlag::PowerControl) {
        capabilities.push(CapabilityDescriptor::with_properties(
            interfaces::POWER,
            &["powerState"],
            false,
            true,
        ));
    }

    // One brightness flag advertises three interfaces, per Alexa API
    // convention.
    if features.has(FeatureFlag::Brightness) {
        capabilities.push(CapabilityDescriptor::with_properties(
            interfaces::BRIGHTNESS,
            &["brightness"],
            false,
            true,
        ));
        capabilities.push(CapabilityDescriptor::with_properties(
            interfaces::POWER_LEVEL,
            &["powerLevel"],
            false,
            true,
        ));
        capabilities.push(CapabilityDescriptor::with_properties(
            interfaces::PERCENTAGE,
            &["percentage"],
            false,
            true,
        ));
    }

    if features.has(FeatureFlag::ColorTemperature) {
        capabilities.push(CapabilityDescriptor::with_properties(
            interfaces::COLOR_TEMPERATURE,
            &["colorTemperatureInKelvin"],
            false,
            true,
        ));
    }

    // RGB and XY collapse to a single ColorController.
    if features.has_color() {
        capabilities.push(CapabilityDescriptor::with_properties(
            interfaces::COLOR,
            &["color"],
            false,
            true,
        ));
    }

    capabilities
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn interfaces_of(capabilities: &[CapabilityDescriptor]) -> Vec<&str> {
        capabilities.iter().map(|c| c.interface.as_str()).collect()
    }

    fn count_of(capabilities: &[CapabilityDescriptor], interface: &str) -> usize {
        capabilities
            .iter()
            .filter(|c| c.interface == interface)
            .count()
    }

    #[test]
    fn test_power_control_yields_exactly_one_power_controller() {
        let features = FeatureSet::from_flags([FeatureFlag::PowerControl]);
        let capabilities = capabilities_for(Platform::Switch, &features);
        assert_eq!(count_of(&capabilities, interfaces::POWER), 1);
        let power = capabilities
            .iter()
            .find(|c| c.interface == interfaces::POWER)
            .unwrap();
        assert_eq!(power.property_names(), vec!["powerState"]);
    }

    #[test]
    fn test_brightness_yields_three_interfaces() {
        let features = FeatureSet::from_flags([FeatureFlag::Brightness]);
        let capabilities = capabilities_for(Platform::Light, &features);
        for interface in [
            interfaces::BRIGHTNESS,
            interfaces::POWER_LEVEL,
            interfaces::PERCENTAGE,
        ] {
            assert_eq!(count_of(&capabilities, interface), 1, "{interface}");
        }
    }

    #[test]
    fn test_both_color_flags_yield_one_color_controller() {
        let features = FeatureSet::from_flags([FeatureFlag::RgbColor, FeatureFlag::XyColor]);
        let capabilities = capabilities_for(Platform::ColorLight, &features);
        assert_eq!(count_of(&capabilities, interfaces::COLOR), 1);
    }

    #[test]
    fn test_every_device_gets_base_and_health_exactly_once() {
        for platform in [
            Platform::Switch,
            Platform::Climate,
            Platform::Camera,
            Platform::Tv,
            Platform::Lock,
            Platform::Scene,
            Platform::Unknown,
        ] {
            let capabilities = capabilities_for(platform, &FeatureSet::new());
            assert_eq!(count_of(&capabilities, interfaces::ALEXA), 1);
            assert_eq!(count_of(&capabilities, interfaces::ENDPOINT_HEALTH), 1);
        }
    }

    #[test]
    fn test_unknown_platform_gets_only_base_and_health() {
        let capabilities = capabilities_for(Platform::Unknown, &FeatureSet::new());
        assert_eq!(capabilities.len(), 2);

        // Flags on an unrecognized platform must not leak through the
        // feature scan either.
        let features = FeatureSet::from_flags([FeatureFlag::PowerControl, FeatureFlag::Brightness]);
        let capabilities = capabilities_for(Platform::Unknown, &features);
        assert_eq!(capabilities.len(), 2);
        assert_eq!(count_of(&capabilities, interfaces::POWER), 0);
        assert_eq!(count_of(&capabilities, interfaces::BRIGHTNESS), 0);
    }

    #[test]
    fn test_climate_dual_setpoints_property_set() {
        let features = FeatureSet::from_flags([FeatureFlag::DualSetpoints]);
        let capabilities = capabilities_for(Platform::Climate, &features);
        let thermostat = capabilities
            .iter()
            .find(|c| c.interface == interfaces::THERMOSTAT)
            .unwrap();
        let names: HashSet<&str> = thermostat.property_names().into_iter().collect();
        let expected: HashSet<&str> = ["upperSetpoint", "lowerSetpoint", "thermostatMode"]
            .into_iter()
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_climate_single_setpoint_property_set() {
        let capabilities = capabilities_for(Platform::Climate, &FeatureSet::new());
        let thermostat = capabilities
            .iter()
            .find(|c| c.interface == interfaces::THERMOSTAT)
            .unwrap();
        let names: HashSet<&str> = thermostat.property_names().into_iter().collect();
        let expected: HashSet<&str> = ["targetSetpoint", "thermostatMode"].into_iter().collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_tv_flags_gate_independently() {
        // input_control alone must still yield the Speaker capability.
        let features = FeatureSet::from_flags([FeatureFlag::InputControl]);
        let capabilities = capabilities_for(Platform::Tv, &features);
        let names = interfaces_of(&capabilities);
        assert!(names.contains(&interfaces::CHANNEL));
        assert!(names.contains(&interfaces::SPEAKER));
        assert!(!names.contains(&interfaces::INPUT));
    }

    #[test]
    fn test_platform_rule_wins_over_feature_scan() {
        // A lock with a stray power_control flag still advertises only the
        // lock capability set.
        let features = FeatureSet::from_flags([FeatureFlag::PowerControl]);
        let capabilities = capabilities_for(Platform::Lock, &features);
        assert_eq!(count_of(&capabilities, interfaces::POWER), 0);
        assert_eq!(count_of(&capabilities, interfaces::LOCK), 1);
    }

    #[test]
    fn test_display_category_fallback() {
        assert_eq!(display_category_for(Platform::Unknown), DisplayCategory::Other);
        assert_eq!(display_category_for(Platform::Lock), DisplayCategory::SmartLock);
    }
}
