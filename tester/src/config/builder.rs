//! Suite Configuration Builder
//!
//! Provides a flexible builder pattern for constructing suite configurations

use super::suite::{Credentials, MailboxConfig, StepTimeouts, SuiteConfig};
use std::time::Duration;

pub struct SuiteConfigBuilder {
    config: SuiteConfig,
}

impl SuiteConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SuiteConfig::default(),
        }
    }

    /// Start from an existing configuration (e.g. one loaded from the environment)
    pub fn from_config(config: SuiteConfig) -> Self {
        Self { config }
    }

    /// Set REST API root
    pub fn api_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set control channel endpoint
    pub fn ws_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.ws_url = url.into();
        self
    }

    /// Set Kafka bootstrap broker
    pub fn kafka_broker<S: Into<String>>(mut self, broker: S) -> Self {
        self.config.kafka_broker = broker.into();
        self
    }

    /// Set heartbeat topic name
    pub fn heartbeat_topic<S: Into<String>>(mut self, topic: S) -> Self {
        self.config.heartbeat_topic = topic.into();
        self
    }

    /// Replace the set of services to wait for
    pub fn services_to_monitor(mut self, services: Vec<String>) -> Self {
        self.config.services_to_monitor = services;
        self
    }

    /// Set main user credentials
    pub fn credentials<U: Into<String>, P: Into<String>>(mut self, username: U, password: P) -> Self {
        self.config.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Set the secondary (receiver) user
    pub fn receiver<U: Into<String>, P: Into<String>>(mut self, email: U, password: P) -> Self {
        self.config.receiver = Credentials {
            username: email.into(),
            password: password.into(),
        };
        self
    }

    /// Set mailbox access
    pub fn mailbox(mut self, mailbox: MailboxConfig) -> Self {
        self.config.mailbox = mailbox;
        self
    }

    /// Replace all step timeouts
    pub fn timeouts(mut self, timeouts: StepTimeouts) -> Self {
        self.config.timeouts = timeouts;
        self
    }

    /// Set per-push wait in the actuation listener
    pub fn actuation_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeouts.actuation = timeout;
        self
    }

    /// Set rule sync polling interval
    pub fn rule_sync_interval(mut self, interval: Duration) -> Self {
        self.config.rule_sync_interval = interval;
        self
    }

    /// Set activation mail retry delay
    pub fn email_retry_interval(mut self, interval: Duration) -> Self {
        self.config.email_retry_interval = interval;
        self
    }

    /// Set heartbeat offset retry delay
    pub fn offset_retry_interval(mut self, interval: Duration) -> Self {
        self.config.offset_retry_interval = interval;
        self
    }

    /// Build the configuration
    pub fn build(self) -> SuiteConfig {
        self.config
    }
}

impl Default for SuiteConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = SuiteConfig::builder()
            .api_url("http://127.0.0.1:4000/v1/api/")
            .credentials("user", "pass")
            .rule_sync_interval(Duration::from_millis(10))
            .actuation_timeout(Duration::from_secs(2))
            .build();

        assert_eq!(config.api_url, "http://127.0.0.1:4000/v1/api");
        assert_eq!(config.credentials.unwrap().password, "pass");
        assert_eq!(config.rule_sync_interval, Duration::from_millis(10));
        assert_eq!(config.timeouts.actuation, Duration::from_secs(2));
        // untouched fields keep defaults
        assert_eq!(config.heartbeat_topic, "heartbeat");
    }
}
