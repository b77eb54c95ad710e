//! Control channel messages
//!
//! The control channel is the persistent WebSocket the platform uses to push
//! actuations to a device. The tester registers as the device and reads
//! pushes; it never sends commands over this channel.

pub mod control;

pub use control::{ActuationContent, ActuationParam, ControlMessage, DeviceRegistration};
