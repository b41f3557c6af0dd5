//! Controller Set and Interface Resolver.
//!
//! A controller is a transient binding between one Alexa interface and one
//! device-state snapshot, alive for a single request or discovery pass. It
//! owns no persisted state: the snapshot is taken once per pass and the
//! controller only reads from it.

pub mod controllers;
pub mod resolver;

pub use controllers::Controller;
pub use resolver::resolve;
