//! Alert payloads

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub alert_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub rule_name: Option<String>,
    #[serde(default)]
    pub conditions: Vec<AlertCondition>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AlertCondition {
    #[serde(default)]
    pub condition: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct AlertComment {
    pub user: String,
    pub timestamp: i64,
    pub text: String,
}
