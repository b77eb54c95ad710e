//! Wait for a rule to reach the rule engine

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{TesterError, TesterResult};
use crate::runtime::{PollOutcome, RetryPolicy};
use crate::traits::RuleStatusSource;

/// Poll rule details until the backend reports it synchronized.
///
/// Returns the rule id. A response for a different id fails with
/// `NotFound` straight away, as does any backend error.
pub async fn wait_for_rule_sync<S>(
    source: &S,
    rule_id: &str,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> TesterResult<String>
where
    S: RuleStatusSource + ?Sized,
{
    policy
        .poll("rule synchronization", cancel, || async {
            let rule = source.rule_details(rule_id).await?;
            if rule.id != rule_id {
                return Err(TesterError::NotFound {
                    resource: "rule".to_string(),
                    id: rule_id.to_string(),
                });
            }
            debug!(rule_id = %rule_id, status = ?rule.synchronization_status, "Rule sync status");
            Ok(if rule.is_synced() {
                PollOutcome::Ready(rule.id)
            } else {
                PollOutcome::Pending
            })
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockRuleStatusSource;
    use assert_matches::assert_matches;
    use mockall::Sequence;
    use shared::Rule;
    use std::time::Duration;

    fn rule(id: &str, sync: Option<&str>) -> Rule {
        Rule {
            id: id.to_string(),
            name: "oisp-tests-rule-low-temp".to_string(),
            status: Some("Active".to_string()),
            synchronization_status: sync.map(str::to_string),
        }
    }

    fn policy() -> RetryPolicy {
        RetryPolicy::fixed(Duration::from_millis(500)).with_max_duration(Duration::from_secs(10))
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_id_after_status_turns_sync() {
        let mut source = MockRuleStatusSource::new();
        let mut seq = Sequence::new();
        source
            .expect_rule_details()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|id| Ok(rule(id, Some("NotSync"))));
        source
            .expect_rule_details()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id| Ok(rule(id, Some("Sync"))));

        let id = wait_for_rule_sync(&source, "r-1", &policy(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(id, "r-1");
    }

    #[tokio::test]
    async fn test_id_mismatch_fails_without_retry() {
        let mut source = MockRuleStatusSource::new();
        source
            .expect_rule_details()
            .times(1)
            .returning(|_| Ok(rule("someone-else", Some("Sync"))));

        let result = wait_for_rule_sync(&source, "r-1", &policy(), &CancellationToken::new()).await;
        assert_matches!(result, Err(TesterError::NotFound { id, .. }) if id == "r-1");
    }

    #[tokio::test]
    async fn test_backend_error_fails_immediately() {
        let mut source = MockRuleStatusSource::new();
        source.expect_rule_details().times(1).returning(|_| {
            Err(TesterError::Api {
                operation: "get rule".to_string(),
                status: 500,
                body: String::new(),
            })
        });

        let result = wait_for_rule_sync(&source, "r-1", &policy(), &CancellationToken::new()).await;
        assert_matches!(result, Err(TesterError::Api { status: 500, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_synced_times_out() {
        let mut source = MockRuleStatusSource::new();
        source.expect_rule_details().returning(|id| Ok(rule(id, None)));

        let result = wait_for_rule_sync(
            &source,
            "r-1",
            &RetryPolicy::fixed(Duration::from_millis(500)).with_max_attempts(4),
            &CancellationToken::new(),
        )
        .await;
        assert_matches!(result, Err(TesterError::Timeout { attempts: 4, .. }));
    }
}
