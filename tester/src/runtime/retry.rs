//! Fixed-interval polling with an explicit ceiling.
//!
//! Every wait on the backend (heartbeat offset, rule sync, activation mail)
//! runs under a [`RetryPolicy`]: a fixed interval between attempts, an
//! optional attempt cap and an optional wall-clock cap, plus a
//! [`CancellationToken`] so the caller can stop a poll early.
//!
//! The polled operation decides what is transient: it returns
//! `Ok(PollOutcome::Pending)` to be called again and `Err(_)` to stop
//! immediately.
//!
//! ```ignore
//! let policy = RetryPolicy::fixed(Duration::from_millis(500)).with_max_duration(timeout);
//! let id = policy
//!     .poll("rule sync", &cancel, || async {
//!         let rule = source.rule_details(&id).await?;
//!         Ok(if rule.is_synced() { PollOutcome::Ready(rule.id) } else { PollOutcome::Pending })
//!     })
//!     .await?;
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{TesterError, TesterResult};

/// Result of one poll attempt
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome<T> {
    Ready(T),
    Pending,
}

/// Fixed-interval retry configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Delay between the end of one attempt and the start of the next
    pub interval: Duration,
    /// Maximum number of attempts (None = unbounded)
    pub max_attempts: Option<u32>,
    /// Maximum wall-clock time across all attempts (None = unbounded)
    pub max_duration: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: None,
            max_duration: Some(Duration::from_secs(60)),
        }
    }
}

impl RetryPolicy {
    /// Unbounded policy with the given interval; add a ceiling before use
    pub fn fixed(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            max_duration: None,
        }
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn with_max_duration(mut self, duration: Duration) -> Self {
        self.max_duration = Some(duration);
        self
    }

    /// Run `operation` until it is ready, fails, or the policy is exhausted.
    ///
    /// The deadline is checked between attempts only; an attempt already in
    /// flight is never interrupted by the deadline, only by cancellation.
    pub async fn poll<F, Fut, T>(
        &self,
        operation_name: &str,
        cancel: &CancellationToken,
        mut operation: F,
    ) -> TesterResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = TesterResult<PollOutcome<T>>>,
    {
        let started = Instant::now();
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(TesterError::Cancelled { operation: operation_name.to_string() });
                }
                outcome = operation() => outcome?,
            };

            if let PollOutcome::Ready(value) = outcome {
                debug!(operation = %operation_name, attempt, "Poll ready");
                return Ok(value);
            }

            let exhausted_attempts = self.max_attempts.is_some_and(|max| attempt >= max);
            let exhausted_time = self
                .max_duration
                .is_some_and(|max| started.elapsed() + self.interval > max);

            if exhausted_attempts || exhausted_time {
                warn!(
                    operation = %operation_name,
                    attempt,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Poll gave up"
                );
                return Err(TesterError::Timeout {
                    operation: operation_name.to_string(),
                    elapsed: started.elapsed(),
                    attempts: attempt,
                });
            }

            debug!(
                operation = %operation_name,
                attempt,
                delay_ms = self.interval.as_millis() as u64,
                "Poll pending, retrying"
            );

            tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(TesterError::Cancelled { operation: operation_name.to_string() });
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_ready_immediately() {
        let policy = RetryPolicy::fixed(Duration::from_millis(10)).with_max_attempts(3);
        let result = policy
            .poll("op", &CancellationToken::new(), || async { Ok(PollOutcome::Ready(42)) })
            .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_after_pending() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();
        let policy = RetryPolicy::fixed(Duration::from_millis(500)).with_max_attempts(10);

        let result = policy
            .poll("op", &CancellationToken::new(), || {
                let c = c.clone();
                async move {
                    let n = c.fetch_add(1, Ordering::SeqCst);
                    Ok(if n < 2 { PollOutcome::Pending } else { PollOutcome::Ready("done") })
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_cap() {
        let policy = RetryPolicy::fixed(Duration::from_millis(100)).with_max_attempts(4);
        let result: TesterResult<()> = policy
            .poll("never", &CancellationToken::new(), || async { Ok(PollOutcome::Pending) })
            .await;

        assert_matches!(result, Err(TesterError::Timeout { attempts: 4, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_duration_cap() {
        let policy = RetryPolicy::fixed(Duration::from_secs(1)).with_max_duration(Duration::from_secs(5));
        let result: TesterResult<()> = policy
            .poll("never", &CancellationToken::new(), || async { Ok(PollOutcome::Pending) })
            .await;

        match result {
            Err(TesterError::Timeout { elapsed, attempts, .. }) => {
                assert!(elapsed <= Duration::from_secs(5));
                assert_eq!(attempts, 6);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_stops_polling() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();
        let policy = RetryPolicy::fixed(Duration::from_millis(1)).with_max_attempts(10);

        let result: TesterResult<()> = policy
            .poll("fails", &CancellationToken::new(), || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(TesterError::assertion("hard failure"))
                }
            })
            .await;

        assert_matches!(result, Err(TesterError::Assertion { .. }));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_during_wait() {
        let cancel = CancellationToken::new();
        let policy = RetryPolicy::fixed(Duration::from_secs(60));

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let result: TesterResult<()> = policy
            .poll("cancelled", &cancel, || async { Ok(PollOutcome::Pending) })
            .await;

        assert_matches!(result, Err(TesterError::Cancelled { .. }));
    }
}
