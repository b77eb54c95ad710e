//! Shared types for the OISP end-to-end tester
//!
//! Contains the wire types exchanged with the platform: REST payloads and
//! control channel messages, plus the shared error type and tracing setup.

pub mod types;
pub mod errors;
pub mod messages;
pub mod logging;

pub use types::*;
pub use errors::*;

pub use messages::{ActuationContent, ActuationParam, ControlMessage, DeviceRegistration};
