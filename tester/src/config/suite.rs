//! Suite Configuration
//!
//! Endpoints, credentials and timing for one run against a platform instance.
//! Values come from the process environment (optionally seeded from a `.env`
//! file) with defaults that match a local docker-compose deployment.

use crate::error::{TesterError, TesterResult};
use chrono::NaiveDate;
use std::time::Duration;

/// Login credentials for a platform user
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// IMAP mailbox that receives activation and password reset mails
#[derive(Debug, Clone)]
pub struct MailboxConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Only unseen mails received on or after this date are considered
    pub since: NaiveDate,
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            host: "imap.1and1.co.uk".to_string(),
            port: 993,
            user: "test.receiver@streammyiot.com".to_string(),
            password: String::new(),
            since: NaiveDate::from_ymd_opt(2017, 5, 20).unwrap_or_default(),
        }
    }
}

/// Upper bounds for the steps that wait on the backend
#[derive(Debug, Clone)]
pub struct StepTimeouts {
    pub readiness: Duration,
    pub rule_sync: Duration,
    pub observations: Duration,
    pub actuation: Duration,
    pub email: Duration,
    pub http: Duration,
}

impl Default for StepTimeouts {
    fn default() -> Self {
        Self {
            readiness: Duration::from_secs(30),
            rule_sync: Duration::from_secs(20),
            observations: Duration::from_secs(120),
            actuation: Duration::from_secs(30),
            email: Duration::from_secs(120),
            http: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// REST API root, e.g. `http://localhost/v1/api`
    pub api_url: String,
    /// Control channel (WebSocket) endpoint
    pub ws_url: String,
    pub kafka_broker: String,
    pub heartbeat_topic: String,
    /// Services whose heartbeat must be seen before the suite starts
    pub services_to_monitor: Vec<String>,
    /// Main test user, read from `USERNAME` / `PASSWORD`
    pub credentials: Option<Credentials>,
    /// Secondary user created and activated through the mailbox
    pub receiver: Credentials,
    pub receiver_new_password: String,
    pub user_new_password: String,
    pub mailbox: MailboxConfig,
    pub timeouts: StepTimeouts,
    pub rule_sync_interval: Duration,
    pub offset_retry_interval: Duration,
    pub email_retry_interval: Duration,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost/v1/api".to_string(),
            ws_url: "ws://localhost:5000".to_string(),
            kafka_broker: "localhost:9092".to_string(),
            heartbeat_topic: "heartbeat".to_string(),
            services_to_monitor: vec!["rules-engine".to_string()],
            credentials: None,
            receiver: Credentials {
                username: "test.receiver@streammyiot.com".to_string(),
                password: "Liuchuan123".to_string(),
            },
            receiver_new_password: "Liuchuan12345".to_string(),
            user_new_password: "oispnewpasswd2".to_string(),
            mailbox: MailboxConfig::default(),
            timeouts: StepTimeouts::default(),
            rule_sync_interval: Duration::from_millis(500),
            offset_retry_interval: Duration::from_secs(1),
            email_retry_interval: Duration::from_secs(3),
        }
    }
}

impl SuiteConfig {
    /// Create a new builder
    pub fn builder() -> crate::config::builder::SuiteConfigBuilder {
        crate::config::builder::SuiteConfigBuilder::new()
    }

    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> TesterResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> TesterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("OISP_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup("OISP_WS_URL") {
            config.ws_url = url;
        }
        if let Some(broker) = lookup("OISP_KAFKA_BROKER") {
            config.kafka_broker = broker;
        }
        if let Some(topic) = lookup("OISP_HEARTBEAT_TOPIC") {
            config.heartbeat_topic = topic;
        }
        if let Some(services) = lookup("OISP_SERVICES_TO_MONITOR") {
            config.services_to_monitor = services
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        let username = lookup("USERNAME").filter(|v| !v.is_empty());
        let password = lookup("PASSWORD").filter(|v| !v.is_empty());
        if let (Some(username), Some(password)) = (username, password) {
            config.credentials = Some(Credentials { username, password });
        }

        if let Some(email) = lookup("OISP_RECEIVER_EMAIL") {
            config.receiver.username = email;
        }
        if let Some(password) = lookup("OISP_RECEIVER_PASSWORD") {
            config.receiver.password = password;
        }

        if let Some(host) = lookup("OISP_IMAP_HOST") {
            config.mailbox.host = host;
        }
        if let Some(port) = lookup("OISP_IMAP_PORT") {
            config.mailbox.port = port.parse().map_err(|_| TesterError::Config {
                message: format!("OISP_IMAP_PORT is not a port number: {port}"),
            })?;
        }
        if let Some(user) = lookup("OISP_IMAP_USER") {
            config.mailbox.user = user;
        }
        if let Some(password) = lookup("OISP_IMAP_PASSWORD") {
            config.mailbox.password = password;
        }

        Ok(config)
    }

    /// Main user credentials; the auth step fails fast without them
    pub fn require_credentials(&self) -> TesterResult<&Credentials> {
        self.credentials.as_ref().ok_or_else(|| TesterError::MissingCredential {
            name: "username/password (set USERNAME and PASSWORD)".to_string(),
        })
    }
}
