//! Test Scenarios
//!
//! One scenario per suite of the platform walkthrough. Each can run on its
//! own, but most read ids produced by the suites before them, so `all` runs
//! them in order against one shared [`SuiteContext`].

pub mod account;
pub mod alerts;
pub mod components;
pub mod observations;
pub mod rules;
pub mod setup;
pub mod teardown;
pub mod users;

use tokio_util::sync::CancellationToken;

use crate::config::SuiteConfig;
use crate::error::{TesterError, TesterResult};
use crate::runtime::{ApiClient, RetryPolicy};
use crate::testing::SuiteContext;

/// Connections and settings every scenario runs with
pub struct Suite {
    pub api: ApiClient,
    pub config: SuiteConfig,
    pub cancel: CancellationToken,
}

impl Suite {
    pub fn new(config: SuiteConfig, cancel: CancellationToken) -> TesterResult<Self> {
        let api = ApiClient::new(&config.api_url, config.timeouts.http)?;
        Ok(Self { api, config, cancel })
    }

    pub fn readiness_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(self.config.offset_retry_interval).with_max_duration(self.config.timeouts.readiness)
    }

    pub fn rule_sync_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(self.config.rule_sync_interval).with_max_duration(self.config.timeouts.rule_sync)
    }

    pub fn email_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(self.config.email_retry_interval).with_max_duration(self.config.timeouts.email)
    }
}

pub struct TestScenarios {
    suite: Suite,
}

impl TestScenarios {
    pub fn new(suite: Suite) -> Self {
        Self { suite }
    }

    /// Run a specific scenario by name
    pub async fn run_scenario(&self, name: &str, ctx: &mut SuiteContext) -> TesterResult<()> {
        if name != "all" {
            return self.run_suite(name, ctx).await;
        }

        tracing::info!("🧪 Running FULL OISP E2E Test Suite");
        for suite in Self::suite_order() {
            self.run_suite(suite, ctx).await?;
        }
        tracing::info!("🏆 ALL E2E Tests COMPLETED Successfully!");
        Ok(())
    }

    async fn run_suite(&self, name: &str, ctx: &mut SuiteContext) -> TesterResult<()> {
        let suite = &self.suite;

        match name {
            "readiness" => setup::readiness(suite).await,
            "auth" => setup::auth(suite, ctx).await,
            "account" => account::account_and_device(suite, ctx).await,
            "components" => components::components_and_control(suite, ctx).await,
            "catalog" => components::catalog(suite, ctx).await,
            "rules" => rules::create_rules(suite, ctx).await,
            "observations" => observations::observations(suite, ctx).await,
            "alerts" => alerts::alerts(suite, ctx).await,
            "rule_management" => rules::rule_management(suite, ctx).await,
            "users" => users::user_lifecycle(suite, ctx).await,
            "invite" => users::invite(suite, ctx).await,
            "teardown" => teardown::teardown(suite, ctx).await,
            _ => Err(TesterError::Config {
                message: format!(
                    "Unknown test scenario: '{}'. Available: {}",
                    name,
                    Self::available_scenarios().join(", ")
                ),
            }),
        }
    }

    /// Order the suites run in under `all`
    pub fn suite_order() -> Vec<&'static str> {
        vec![
            "readiness",
            "auth",
            "account",
            "components",
            "catalog",
            "rules",
            "observations",
            "alerts",
            "rule_management",
            "users",
            "invite",
            "teardown",
        ]
    }

    /// Get list of available scenarios
    pub fn available_scenarios() -> Vec<&'static str> {
        let mut scenarios = Self::suite_order();
        scenarios.push("all");
        scenarios
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn scenarios() -> TestScenarios {
        let suite = Suite::new(SuiteConfig::default(), CancellationToken::new()).unwrap();
        TestScenarios::new(suite)
    }

    #[test]
    fn test_all_is_last_and_every_suite_is_listed() {
        let available = TestScenarios::available_scenarios();
        assert_eq!(available.last(), Some(&"all"));
        assert_eq!(available.len(), TestScenarios::suite_order().len() + 1);
        assert_eq!(TestScenarios::suite_order().first(), Some(&"readiness"));
        assert_eq!(TestScenarios::suite_order().last(), Some(&"teardown"));
    }

    #[tokio::test]
    async fn test_unknown_scenario() {
        let mut ctx = SuiteContext::new();
        let result = scenarios().run_scenario("nope", &mut ctx).await;
        assert_matches!(result, Err(TesterError::Config { message }) if message.contains("readiness"));
    }

    #[tokio::test]
    async fn test_scenario_without_context_fails_fast() {
        let mut ctx = SuiteContext::new();
        let result = scenarios().run_scenario("alerts", &mut ctx).await;
        assert_matches!(
            result.unwrap_err().root(),
            TesterError::MissingContext { field: "user token" }
        );
    }
}
