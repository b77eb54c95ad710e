//! Configuration Management
//!
//! Suite configuration (endpoints, credentials, timeouts), its builder, and
//! the fixture data the scenarios create on the platform.

pub mod builder;
pub mod fixtures;
pub mod suite;

// Re-export main types
pub use builder::SuiteConfigBuilder;
pub use fixtures::{RuleDefinition, TemperatureStep};
pub use suite::{Credentials, MailboxConfig, StepTimeouts, SuiteConfig};
