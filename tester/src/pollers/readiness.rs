//! Service readiness gate on the heartbeat topic

use std::collections::HashSet;
use std::sync::Mutex;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{TesterError, TesterResult};
use crate::runtime::{PollOutcome, RetryPolicy};
use crate::traits::HeartbeatSource;

struct Progress {
    cursor: i64,
    pending: HashSet<String>,
}

/// Block until every service in `services` has published a heartbeat.
///
/// Only heartbeats newer than the latest offset at call time count. Offset
/// lookup errors are retried under `policy`; a negative offset is fatal.
/// Fetch errors while consuming are retried as well. Both phases share the
/// policy's `max_duration`.
pub async fn wait_for_readiness<S>(
    source: &S,
    services: &[String],
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> TesterResult<()>
where
    S: HeartbeatSource + ?Sized,
{
    let pending: HashSet<String> = services.iter().map(|s| s.trim().to_string()).collect();
    if pending.is_empty() {
        return Ok(());
    }

    let started = Instant::now();
    let offset = policy
        .poll("heartbeat offset", cancel, || async {
            match source.latest_offset().await {
                Ok(offset) if offset < 0 => Err(TesterError::Kafka {
                    message: format!("cannot get Kafka offset (got {offset})"),
                }),
                Ok(offset) => Ok(PollOutcome::Ready(offset)),
                Err(e) => {
                    warn!(error = %e, "Heartbeat offset unavailable, retrying");
                    Ok(PollOutcome::Pending)
                }
            }
        })
        .await?;

    shared::logging::log_waiting(
        "service heartbeats",
        &format!("{:?} after offset {}", pending, offset),
    );

    let progress = Mutex::new(Progress {
        cursor: offset + 1,
        pending,
    });

    let consume_policy = RetryPolicy {
        max_duration: policy.max_duration.map(|max| max.saturating_sub(started.elapsed())),
        ..policy.clone()
    };

    consume_policy
        .poll("service heartbeats", cancel, || async {
            let cursor = lock(&progress)?.cursor;
            let records = match source.fetch(cursor).await {
                Ok(records) => records,
                Err(e) => {
                    warn!(error = %e, cursor, "Heartbeat fetch failed, retrying");
                    return Ok(PollOutcome::Pending);
                }
            };

            let mut progress = lock(&progress)?;
            for record in records {
                progress.cursor = progress.cursor.max(record.offset + 1);
                let service = record.value.trim();
                if progress.pending.remove(service) {
                    info!("✅ Service {} is alive", service);
                } else {
                    debug!(service = %service, "Ignoring heartbeat");
                }
            }

            Ok(if progress.pending.is_empty() {
                PollOutcome::Ready(())
            } else {
                PollOutcome::Pending
            })
        })
        .await
}

fn lock(progress: &Mutex<Progress>) -> TesterResult<std::sync::MutexGuard<'_, Progress>> {
    progress.lock().map_err(|_| TesterError::Kafka {
        message: "heartbeat progress lock poisoned".to_string(),
    })
}
