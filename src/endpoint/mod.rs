//! Endpoint Generator and the discovery cycle.
//!
//! Discovery rebuilds every endpoint document from current device/scene
//! state — documents are never mutated in place — and swaps the result
//! wholesale into the shared cache for the host's polling surface.

pub mod discovery;
pub mod document;
pub mod generator;

pub use discovery::{run_discovery_cycle, run_discovery_loop, DiscoveryCache, DiscoveryDocument};
pub use document::{EndpointCookie, EndpointDocument, EndpointType};
pub use generator::EndpointGenerator;
