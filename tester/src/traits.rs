//! Trait definitions with mockall annotations for testing
//!
//! The pollers and the actuation listener talk to the outside world only
//! through these traits. Production implementations live in `runtime` and
//! `helpers`; unit tests drive the pollers with the generated mocks.

use async_trait::async_trait;
use shared::{ActuationContent, Rule};

use crate::error::TesterResult;

/// One message read from the heartbeat topic
#[derive(Debug, Clone, PartialEq)]
pub struct HeartbeatRecord {
    pub offset: i64,
    pub value: String,
}

/// Read access to the service heartbeat topic
#[mockall::automock]
#[async_trait]
pub trait HeartbeatSource: Send + Sync {
    /// Latest offset of the heartbeat partition
    async fn latest_offset(&self) -> TesterResult<i64>;

    /// Records starting at `offset`, possibly empty when nothing new arrived
    async fn fetch(&self, offset: i64) -> TesterResult<Vec<HeartbeatRecord>>;
}

/// Rule lookup used by the synchronization poller
#[mockall::automock]
#[async_trait]
pub trait RuleStatusSource: Send + Sync {
    async fn rule_details(&self, rule_id: &str) -> TesterResult<Rule>;
}

/// Mailbox holding activation and password reset mails
#[mockall::automock]
#[async_trait]
pub trait Mailbox: Send + Sync {
    /// Open a session, fetch every unseen message (marking it seen) and
    /// close the session again, whatever the outcome.
    ///
    /// Returns the raw RFC 822 bytes of each message.
    async fn fetch_unseen(&self) -> TesterResult<Vec<Vec<u8>>>;
}

/// Device side of the control channel
#[mockall::automock]
#[async_trait]
pub trait ControlChannel: Send {
    /// Next actuation pushed to the device, in arrival order
    async fn next_actuation(&mut self) -> TesterResult<ActuationContent>;

    /// Close the connection; further reads fail
    async fn close(&mut self) -> TesterResult<()>;
}

/// Submits observations for the sensor under test
#[mockall::automock]
#[async_trait]
pub trait ObservationSink: Send + Sync {
    /// Submit one value and return the timestamp it was recorded under
    async fn submit(&self, value: i64) -> TesterResult<i64>;
}
