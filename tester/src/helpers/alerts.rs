//! Alert helpers

use shared::{Alert, AlertComment, StatusResponse};

use crate::error::TesterResult;
use crate::runtime::ApiClient;
use crate::testing::ensure_eq;

pub async fn get_alerts(api: &ApiClient, token: &str, account_id: &str) -> TesterResult<Vec<Alert>> {
    api.list_alerts(token, account_id).await
}

pub async fn add_comments(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    alert_id: &str,
    comments: &[AlertComment],
) -> TesterResult<StatusResponse> {
    api.add_alert_comments(token, account_id, alert_id, comments).await
}

pub async fn get_alert_details(api: &ApiClient, token: &str, account_id: &str, alert_id: &str) -> TesterResult<Alert> {
    let alert = api.get_alert(token, account_id, alert_id).await?;
    ensure_eq(alert.alert_id.as_str(), alert_id, "alert id")?;
    Ok(alert)
}

pub async fn update_alert_status(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    alert_id: &str,
    status: &str,
) -> TesterResult<Alert> {
    let alert = api.update_alert_status(token, account_id, alert_id, status).await?;
    ensure_eq(alert.status.as_deref(), Some(status), "alert status")?;
    Ok(alert)
}

/// Reset (close) an alert
pub async fn close_alert(api: &ApiClient, token: &str, account_id: &str, alert_id: &str) -> TesterResult<Alert> {
    api.close_alert(token, account_id, alert_id).await
}
