//! Pollers
//!
//! The waits that make the suite deterministic against an eventually
//! consistent backend: service readiness on the heartbeat topic, rule
//! synchronization, activation mail delivery and the ordered actuation
//! exchange on the control channel.

pub mod activation;
pub mod actuation;
pub mod readiness;
pub mod rule_sync;

pub use activation::{activation_token, extract_token, EmailMode};
pub use actuation::{run_observation_sequence, ObservationRun};
pub use readiness::wait_for_readiness;
pub use rule_sync::wait_for_rule_sync;
