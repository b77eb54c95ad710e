//! REST helper tests against a mock platform API

mod common;

use assert_matches::assert_matches;
use serde_json::json;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{account_path, api_client, ACCOUNT_ID, DEVICE_ID, TOKEN};
use tester::config::fixtures::switch_on_rule;
use tester::helpers::{accounts, auth, control, data, rules};
use tester::pollers::actuation::SubmittedObservation;
use tester::{RetryPolicy, TesterError};

#[tokio::test]
async fn test_create_account_checks_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/api/accounts"))
        .and(header("authorization", "Bearer user-token"))
        .and(body_partial_json(json!({ "name": "oisp-tests" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": ACCOUNT_ID, "name": "oisp-tests" })))
        .expect(1)
        .mount(&server)
        .await;

    let account = accounts::create_account(&api_client(&server), TOKEN, "oisp-tests").await.unwrap();
    assert_eq!(account.id, ACCOUNT_ID);
}

#[tokio::test]
async fn test_create_account_name_mismatch_is_assertion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/api/accounts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": ACCOUNT_ID, "name": "other" })))
        .mount(&server)
        .await;

    let result = accounts::create_account(&api_client(&server), TOKEN, "oisp-tests").await;
    assert_matches!(result, Err(TesterError::Assertion { .. }));
}

#[tokio::test]
async fn test_api_error_propagates_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/auth/tokenInfo"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid token"))
        .mount(&server)
        .await;

    let result = auth::token_info(&api_client(&server), "bad-token").await;
    assert_matches!(
        result,
        Err(TesterError::Api { status: 401, body, .. }) if body == "Invalid token"
    );
}

#[tokio::test]
async fn test_token_info_returns_subject() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/auth/tokenInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "header": { "typ": "JWT", "alg": "RS256" },
            "payload": { "sub": "user-1", "iss": "http://enableiot.com", "accounts": [] }
        })))
        .mount(&server)
        .await;

    let (info, user_id) = auth::token_info(&api_client(&server), TOKEN).await.unwrap();
    assert_eq!(user_id, "user-1");
    assert_eq!(info.header.alg.as_deref(), Some("RS256"));
}

#[tokio::test]
async fn test_token_info_without_subject_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/auth/tokenInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "header": { "typ": "JWT" },
            "payload": { "sub": null }
        })))
        .mount(&server)
        .await;

    let result = auth::token_info(&api_client(&server), TOKEN).await;
    assert_matches!(result, Err(TesterError::Assertion { message }) if message.contains("subject"));
}

#[tokio::test]
async fn test_delete_rule_without_id_is_local_no_op() {
    let server = MockServer::start().await;

    let response = rules::delete_rule(&api_client(&server), TOKEN, ACCOUNT_ID, None).await.unwrap();

    assert!(response.is_ok());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_delete_rule_with_empty_body_is_ok() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(account_path("/rules/delete_rule_with_alerts/r-1")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = rules::delete_rule(&api_client(&server), TOKEN, ACCOUNT_ID, Some("r-1")).await.unwrap();
    assert!(response.is_ok());
}

#[tokio::test]
async fn test_create_rule_waits_for_sync() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(account_path("/rules")))
        .and(body_partial_json(json!({
            "name": "oisp-tests-rule-low-temp",
            "actions": [{ "type": "actuation", "target": ["switch-on"] }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "r-1", "name": "oisp-tests-rule-low-temp", "synchronizationStatus": "NotSync"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(account_path("/rules/r-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r-1", "name": "oisp-tests-rule-low-temp", "synchronizationStatus": "NotSync"
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(account_path("/rules/r-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r-1", "name": "oisp-tests-rule-low-temp", "synchronizationStatus": "Sync"
        })))
        .mount(&server)
        .await;

    let policy = RetryPolicy::fixed(Duration::from_millis(10)).with_max_duration(Duration::from_secs(5));
    let rule_id = rules::create_rule(
        &api_client(&server),
        TOKEN,
        ACCOUNT_ID,
        DEVICE_ID,
        "cid-temp",
        &switch_on_rule(),
        &policy,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(rule_id, "r-1");
    let polls = server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.to_string() == "GET")
        .count();
    assert_eq!(polls, 3);
}

#[tokio::test]
async fn test_clone_rule_checks_cloned_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(account_path("/rules/clone/r-1")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "r-2", "name": "oisp-tests-rule-low-temp - cloned"
        })))
        .mount(&server)
        .await;

    let source: shared::Rule = serde_json::from_value(json!({ "id": "r-1", "name": "oisp-tests-rule-low-temp" })).unwrap();
    let cloned = rules::clone_rule(&api_client(&server), TOKEN, ACCOUNT_ID, &source).await.unwrap();
    assert_eq!(cloned.id, "r-2");
}

#[tokio::test]
async fn test_submit_observation_uses_device_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/api/data/{DEVICE_ID}")))
        .and(header("authorization", "Bearer device-token"))
        .and(body_partial_json(json!({
            "accountId": ACCOUNT_ID,
            "data": [{ "componentId": "cid-temp", "value": "-15" }]
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let ts = data::submit_observation(&api_client(&server), "device-token", ACCOUNT_ID, DEVICE_ID, "cid-temp", -15)
        .await
        .unwrap();
    assert!(ts > 0);
}

#[tokio::test]
async fn test_search_and_verify_observations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(account_path("/data/search")))
        .and(body_partial_json(json!({
            "from": 1000,
            "targetFilter": { "deviceList": [DEVICE_ID] },
            "metrics": [{ "id": "cid-temp", "op": "none" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "from": 1000,
            "series": [{
                "deviceId": DEVICE_ID,
                "componentId": "cid-temp",
                "points": [{ "ts": 1000, "value": "-15" }, { "ts": 1010, "value": "-5" }]
            }]
        })))
        .mount(&server)
        .await;

    let response = data::search_data(&api_client(&server), TOKEN, ACCOUNT_ID, DEVICE_ID, "cid-temp", 1000)
        .await
        .unwrap();

    let submitted = [
        SubmittedObservation { ts: 1000, value: -15 },
        SubmittedObservation { ts: 1010, value: -5 },
    ];
    assert_ok!(data::verify_observations(&response, "cid-temp", &submitted));

    let wrong = [SubmittedObservation { ts: 1000, value: 5 }];
    assert_err!(data::verify_observations(&response, "cid-temp", &wrong));
}

#[tokio::test]
async fn test_pull_actuations_filters_and_caps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(account_path(&format!("/control/devices/{DEVICE_ID}"))))
        .and(query_param("from", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "componentId": "act-1", "parameters": [{ "name": "LED", "value": "1" }] },
            { "componentId": "other", "parameters": [{ "name": "LED", "value": "9" }] },
            { "componentId": "act-1", "parameters": [{ "name": "LED", "value": 0 }] },
            { "componentId": "act-1", "parameters": [{ "name": "LED", "value": "1" }] }
        ])))
        .mount(&server)
        .await;

    let values = control::pull_actuations(&api_client(&server), TOKEN, ACCOUNT_ID, DEVICE_ID, "act-1", 500, 2)
        .await
        .unwrap();
    assert_eq!(values, vec!["1", "0"]);
}
