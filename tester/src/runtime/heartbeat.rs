//! Kafka heartbeat topic reader
//!
//! Platform services publish their name to the heartbeat topic on a timer.
//! The reader only ever touches partition 0 and never commits offsets.

use async_trait::async_trait;
use rskafka::client::error::{Error as KafkaError, ProtocolError};
use rskafka::client::partition::{OffsetAt, PartitionClient, UnknownTopicHandling};
use rskafka::client::ClientBuilder;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::error::{TesterError, TesterResult};
use crate::traits::{HeartbeatRecord, HeartbeatSource};

const HEARTBEAT_PARTITION: i32 = 0;
const MAX_FETCH_BYTES: i32 = 1_000_000;
const MAX_WAIT_MS: i32 = 1_000;

pub struct KafkaHeartbeatSource {
    broker: String,
    topic: String,
    partition: OnceCell<PartitionClient>,
}

impl KafkaHeartbeatSource {
    /// The broker connection is opened on first use, so connection failures
    /// surface through the poller and get retried like any other offset error.
    pub fn new(broker: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            broker: broker.into(),
            topic: topic.into(),
            partition: OnceCell::new(),
        }
    }

    async fn partition(&self) -> TesterResult<&PartitionClient> {
        self.partition
            .get_or_try_init(|| async {
                info!(broker = %self.broker, topic = %self.topic, "Connecting to heartbeat topic");
                let client = ClientBuilder::new(vec![self.broker.clone()]).build().await?;
                let partition = client
                    .partition_client(self.topic.clone(), HEARTBEAT_PARTITION, UnknownTopicHandling::Retry)
                    .await?;
                Ok::<_, TesterError>(partition)
            })
            .await
    }
}

#[async_trait]
impl HeartbeatSource for KafkaHeartbeatSource {
    async fn latest_offset(&self) -> TesterResult<i64> {
        let offset = self.partition().await?.get_offset(OffsetAt::Latest).await?;
        debug!(topic = %self.topic, offset, "Fetched latest heartbeat offset");
        Ok(offset)
    }

    async fn fetch(&self, offset: i64) -> TesterResult<Vec<HeartbeatRecord>> {
        let fetched = self
            .partition()
            .await?
            .fetch_records(offset, 1..MAX_FETCH_BYTES, MAX_WAIT_MS)
            .await;

        let records = match fetched {
            Ok((records, _high_watermark)) => records,
            // Reading past the high watermark until the next heartbeat lands
            Err(KafkaError::ServerError {
                protocol_error: ProtocolError::OffsetOutOfRange,
                ..
            }) => {
                debug!(topic = %self.topic, offset, "No heartbeat at offset yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(records
            .into_iter()
            .map(|r| HeartbeatRecord {
                offset: r.offset,
                value: r
                    .record
                    .value
                    .map(|v| String::from_utf8_lossy(&v).into_owned())
                    .unwrap_or_default(),
            })
            .collect())
    }
}
