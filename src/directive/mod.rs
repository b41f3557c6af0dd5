//! Directive Dispatcher.
//!
//! A state-free request/response pipeline:
//!
//! ```text
//! Alexa JSON envelope
//!   ↓  Directive::parse()
//! (namespace, name) + target cookie
//!   ↓  Dispatcher::dispatch()
//! handler → device/scene action → Interface Resolver → Controller Set
//!   ↓
//! ResponseEnvelope (event header + payload + context)
//! ```

pub mod dispatcher;
pub mod handlers;
pub mod request;
pub mod response;

pub use dispatcher::{Dispatcher, TargetEntity};
pub use request::{Directive, DirectiveEndpoint, DirectiveHeader};
pub use response::{
    sample_timestamp, EventHeader, PropertySnapshot, ResponseContext, ResponseEnvelope,
};
