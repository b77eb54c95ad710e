//! Runtime Adapters
//!
//! Connections to the platform and its infrastructure: the REST API client,
//! the device control channel, the Kafka heartbeat topic and the IMAP
//! mailbox, plus the retry policy every poller runs under.

pub mod api_client;
pub mod control_channel;
pub mod heartbeat;
pub mod mailbox;
pub mod retry;

// Re-export main types
pub use api_client::ApiClient;
pub use control_channel::WsControlChannel;
pub use heartbeat::KafkaHeartbeatSource;
pub use mailbox::ImapMailbox;
pub use retry::{PollOutcome, RetryPolicy};
