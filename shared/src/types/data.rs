//! Observation submission and data search payloads

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub component_id: String,
    pub on: i64,
    #[serde(deserialize_with = "super::string_or_number")]
    pub value: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDataRequest {
    pub on: i64,
    pub account_id: String,
    pub data: Vec<Observation>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchDataRequest {
    pub from: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
    pub target_filter: TargetFilter,
    pub metrics: Vec<MetricQuery>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TargetFilter {
    pub device_list: Vec<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct MetricQuery {
    pub id: String,
    pub op: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SearchDataResponse {
    #[serde(default)]
    pub series: Vec<Series>,
}

impl SearchDataResponse {
    /// All points of a component across the returned series
    pub fn points_for(&self, component_id: &str) -> Vec<&DataPoint> {
        self.series
            .iter()
            .filter(|s| s.component_id == component_id)
            .flat_map(|s| s.points.iter())
            .collect()
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    #[serde(default)]
    pub device_id: Option<String>,
    pub component_id: String,
    #[serde(default)]
    pub points: Vec<DataPoint>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub ts: i64,
    #[serde(deserialize_with = "super::string_or_number")]
    pub value: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSearchRequest {
    pub device_ids: Vec<String>,
    pub component_ids: Vec<String>,
    pub from: i64,
    pub show_measure_location: bool,
    pub component_row_limit: u32,
}
