//! Shared fixtures for tester integration tests

#![allow(dead_code)]

use std::time::Duration;

use tester::{ApiClient, Suite, SuiteConfig};
use tokio_util::sync::CancellationToken;
use wiremock::MockServer;

pub const TOKEN: &str = "user-token";
pub const ACCOUNT_ID: &str = "acc-1";
pub const DEVICE_ID: &str = "00-11-22-33-44-55";

pub fn api_url(server: &MockServer) -> String {
    format!("{}/v1/api", server.uri())
}

pub fn api_client(server: &MockServer) -> ApiClient {
    ApiClient::new(&api_url(server), Duration::from_secs(5)).unwrap()
}

/// Suite pointed at the mock server with fast polling
pub fn suite(server: &MockServer) -> Suite {
    let config = SuiteConfig::builder()
        .api_url(api_url(server))
        .credentials("user@example.com", "secret")
        .rule_sync_interval(Duration::from_millis(10))
        .build();
    Suite::new(config, CancellationToken::new()).unwrap()
}

pub fn account_path(rest: &str) -> String {
    format!("/v1/api/accounts/{ACCOUNT_ID}{rest}")
}
