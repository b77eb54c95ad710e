//! Actuation command helpers

use shared::{ActuationCommand, ActuationRequest, ComplexCommandRequest, StatusResponse};

use crate::error::TesterResult;
use crate::runtime::ApiClient;
use crate::testing::ensure;

/// Store a named command that sets `param_name` to `value` on the actuator
pub async fn save_complex_command(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    name: &str,
    actuator_id: &str,
    param_name: &str,
    value: i64,
) -> TesterResult<StatusResponse> {
    let command = ComplexCommandRequest {
        commands: vec![ActuationCommand::single(actuator_id, param_name, value)],
    };
    api.save_complex_command(token, account_id, name, &command).await
}

/// Send an actuation straight to the actuator
pub async fn send_actuation_command(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    actuator_id: &str,
    param_name: &str,
    value: i64,
) -> TesterResult<StatusResponse> {
    let request = ActuationRequest {
        commands: vec![ActuationCommand::single(actuator_id, param_name, value)],
        complex_commands: Vec::new(),
    };
    let response = api.send_actuation(token, account_id, &request).await?;
    ensure(response.is_ok(), format!("cannot send an actuation: status {}", response.status))?;
    Ok(response)
}

/// Values of the first parameter of up to `max_items` actuations for `component_id`
pub async fn pull_actuations(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    device_id: &str,
    component_id: &str,
    from: i64,
    max_items: usize,
) -> TesterResult<Vec<String>> {
    let actuations = api.pull_actuations(token, account_id, device_id, from).await?;
    Ok(actuations
        .iter()
        .filter(|a| a.component_id == component_id)
        .filter_map(|a| a.first_value().map(str::to_string))
        .take(max_items)
        .collect())
}
