//! OISP E2E Testing Framework
//!
//! End-to-end tests for an OISP deployment. The suites walk the platform's
//! public surface in order: wait for the services' heartbeats, log in,
//! create an account and a device, register components and rules, send
//! observations and check the actuations pushed back over the control
//! channel, then exercise alerts, rule management and the user lifecycle
//! before tearing everything down again.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tester::*;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> TesterResult<()> {
//! let config = SuiteConfig::builder()
//!     .api_url("http://localhost/v1/api")
//!     .credentials("user@example.com", "secret")
//!     .build();
//!
//! let scenarios = TestScenarios::new(Suite::new(config, CancellationToken::new())?);
//! let mut ctx = SuiteContext::new();
//! scenarios.run_scenario("all", &mut ctx).await?;
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod helpers;
pub mod pollers;
pub mod runtime;
pub mod scenarios;
pub mod testing;
pub mod traits;

// Main interfaces - re-exported at crate root for convenience
pub use config::{SuiteConfig, SuiteConfigBuilder};
pub use error::{TesterError, TesterResult};
pub use scenarios::{Suite, TestScenarios};
pub use testing::SuiteContext;

// Supporting types
pub use pollers::{ObservationRun, EmailMode};
pub use runtime::{ApiClient, PollOutcome, RetryPolicy};
pub use traits::{ControlChannel, HeartbeatSource, Mailbox, ObservationSink, RuleStatusSource};
