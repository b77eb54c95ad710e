//! Observation helpers

use async_trait::async_trait;
use chrono::Utc;
use shared::{
    AdvancedSearchRequest, DataPoint, MetricQuery, Observation, SearchDataRequest, SearchDataResponse,
    SubmitDataRequest, TargetFilter,
};

use crate::error::{TesterError, TesterResult};
use crate::pollers::actuation::SubmittedObservation;
use crate::runtime::ApiClient;
use crate::testing::ensure;
use crate::traits::ObservationSink;

const ADVANCED_SEARCH_ROW_LIMIT: u32 = 100;

/// Submit one observation with the device token.
///
/// The observation is stamped with the current time in milliseconds, which
/// is returned so the value can be looked up later.
pub async fn submit_observation(
    api: &ApiClient,
    device_token: &str,
    account_id: &str,
    device_id: &str,
    component_id: &str,
    value: i64,
) -> TesterResult<i64> {
    let on = Utc::now().timestamp_millis();
    let request = SubmitDataRequest {
        on,
        account_id: account_id.to_string(),
        data: vec![Observation {
            component_id: component_id.to_string(),
            on,
            value: value.to_string(),
        }],
    };
    api.submit_data(device_token, device_id, &request).await?;
    Ok(on)
}

pub async fn search_data(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    device_id: &str,
    component_id: &str,
    from: i64,
) -> TesterResult<SearchDataResponse> {
    let request = SearchDataRequest {
        from,
        to: None,
        target_filter: TargetFilter {
            device_list: vec![device_id.to_string()],
        },
        metrics: vec![MetricQuery {
            id: component_id.to_string(),
            op: "none".to_string(),
        }],
    };
    api.search_data(token, account_id, &request).await
}

pub async fn search_data_advanced(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    device_id: &str,
    component_id: &str,
    from: i64,
) -> TesterResult<serde_json::Value> {
    let request = AdvancedSearchRequest {
        device_ids: vec![device_id.to_string()],
        component_ids: vec![component_id.to_string()],
        from,
        show_measure_location: true,
        component_row_limit: ADVANCED_SEARCH_ROW_LIMIT,
    };
    api.search_data_advanced(token, account_id, &request).await
}

fn same_value(point: &DataPoint, value: i64) -> bool {
    match point.value.trim().parse::<f64>() {
        Ok(stored) => stored == value as f64,
        Err(_) => point.value == value.to_string(),
    }
}

/// Every submitted (timestamp, value) pair must be among the points stored
/// for `component_id`.
pub fn verify_observations(
    response: &SearchDataResponse,
    component_id: &str,
    submitted: &[SubmittedObservation],
) -> TesterResult<()> {
    let points = response.points_for(component_id);
    ensure(
        points.len() >= submitted.len(),
        format!("Cannot get data: {} points stored, {} submitted", points.len(), submitted.len()),
    )?;

    let missing: Vec<String> = submitted
        .iter()
        .enumerate()
        .filter(|(_, o)| !points.iter().any(|p| p.ts == o.ts && same_value(p, o.value)))
        .map(|(i, o)| format!("[{i}]={}", o.value))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(TesterError::assertion(format!("Got wrong data for {}", missing.join(" "))))
    }
}

/// Observation sink for the sensor component of one device
pub struct DeviceObservationSink<'a> {
    pub api: &'a ApiClient,
    pub device_token: &'a str,
    pub account_id: &'a str,
    pub device_id: &'a str,
    pub component_id: &'a str,
}

#[async_trait]
impl ObservationSink for DeviceObservationSink<'_> {
    async fn submit(&self, value: i64) -> TesterResult<i64> {
        submit_observation(
            self.api,
            self.device_token,
            self.account_id,
            self.device_id,
            self.component_id,
            value,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn response(points: &str) -> SearchDataResponse {
        serde_json::from_str(&format!(
            r#"{{"series":[{{"deviceId":"d1","componentId":"c1","points":{points}}}]}}"#
        ))
        .unwrap()
    }

    fn submitted(pairs: &[(i64, i64)]) -> Vec<SubmittedObservation> {
        pairs.iter().map(|&(ts, value)| SubmittedObservation { ts, value }).collect()
    }

    #[test]
    fn test_all_observations_found() {
        let response = response(r#"[{"ts":1,"value":"-15"},{"ts":2,"value":30.0},{"ts":3,"value":"20"}]"#);
        assert!(verify_observations(&response, "c1", &submitted(&[(1, -15), (2, 30)])).is_ok());
    }

    #[test]
    fn test_wrong_value_is_reported_by_index() {
        let response = response(r#"[{"ts":1,"value":"-15"},{"ts":2,"value":"31"}]"#);
        let err = verify_observations(&response, "c1", &submitted(&[(1, -15), (2, 30)])).unwrap_err();
        assert_eq!(err.to_string(), "Assertion failed: Got wrong data for [1]=30");
    }

    #[test]
    fn test_too_few_points() {
        let response = response(r#"[{"ts":1,"value":"-15"}]"#);
        let result = verify_observations(&response, "c1", &submitted(&[(1, -15), (2, 30)]));
        assert_matches!(result, Err(TesterError::Assertion { message }) if message.starts_with("Cannot get data"));
    }

    #[test]
    fn test_other_component_points_do_not_count() {
        let response = response(r#"[{"ts":1,"value":"-15"}]"#);
        assert!(verify_observations(&response, "c2", &submitted(&[(1, -15)])).is_err());
    }
}
