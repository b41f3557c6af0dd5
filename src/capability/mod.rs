//! Capability Catalog — platform/feature combinations to Alexa interface
//! descriptors.
//!
//! The catalog is a pure function: the same platform + feature set always
//! yields the same descriptor list, with no hidden state. Wrong output
//! here means Alexa sends directives the gateway cannot satisfy, so the
//! rules are covered property-by-property in the catalog tests.

pub mod catalog;
pub mod descriptor;

pub use catalog::{capabilities_for, display_category_for, DisplayCategory};
pub use descriptor::{
    interfaces, CameraResolution, CameraStreamConfiguration, CapabilityDescriptor,
    CapabilityProperties, SupportedProperty,
};
