//! Component catalog payloads

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub dimension: String,
    pub version: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub data_type: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub measureunit: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
}
