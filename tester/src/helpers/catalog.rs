//! Component catalog helpers

use shared::CatalogEntry;

use crate::error::TesterResult;
use crate::runtime::ApiClient;

/// Custom sensor type registered by the suite
pub fn speed_sensor_type() -> CatalogEntry {
    CatalogEntry {
        id: None,
        dimension: "speed".to_string(),
        version: "1.0".to_string(),
        component_type: "sensor".to_string(),
        data_type: "Number".to_string(),
        format: Some("float".to_string()),
        min: Some(0.0),
        max: Some(1000.0),
        measureunit: Some("Degress Celsius".to_string()),
        display: Some("timeSeries".to_string()),
    }
}

pub async fn create_catalog(api: &ApiClient, token: &str, account_id: &str) -> TesterResult<CatalogEntry> {
    api.create_catalog(token, account_id, &speed_sensor_type()).await
}

pub async fn get_catalog(api: &ApiClient, token: &str, account_id: &str) -> TesterResult<Vec<CatalogEntry>> {
    api.list_catalog(token, account_id).await
}
