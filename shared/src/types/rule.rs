//! Rule payloads

use serde::{Deserialize, Serialize};

/// Synchronization status of a rule that reached the rule engine
pub const RULE_SYNCED: &str = "Sync";

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RuleRequest {
    pub name: String,
    pub description: String,
    pub priority: String,
    #[serde(rename = "type")]
    pub rule_type: String,
    pub status: String,
    pub reset_type: String,
    pub actions: Vec<RuleAction>,
    pub population: Population,
    pub conditions: Conditions,
}

#[derive(Serialize, Debug, Clone)]
pub struct RuleAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub target: Vec<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct Population {
    pub ids: Vec<String>,
    pub attributes: Option<serde_json::Value>,
    pub tags: Option<Vec<String>>,
}

#[derive(Serialize, Debug, Clone)]
pub struct Conditions {
    pub operator: String,
    pub values: Vec<Condition>,
}

#[derive(Serialize, Debug, Clone)]
pub struct Condition {
    pub component: ConditionComponent,
    #[serde(rename = "type")]
    pub condition_type: String,
    pub values: Vec<String>,
    pub operator: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConditionComponent {
    pub data_type: String,
    pub name: String,
    pub cid: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub synchronization_status: Option<String>,
}

impl Rule {
    pub fn is_synced(&self) -> bool {
        self.synchronization_status.as_deref() == Some(RULE_SYNCED)
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct RuleStatusUpdate {
    pub status: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct DraftRuleRequest {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_sync_detection() {
        let pending: Rule =
            serde_json::from_str(r#"{"id":"r1","name":"x","synchronizationStatus":"NotSync"}"#).unwrap();
        let synced: Rule =
            serde_json::from_str(r#"{"id":"r1","name":"x","synchronizationStatus":"Sync"}"#).unwrap();
        let unknown: Rule = serde_json::from_str(r#"{"id":"r1"}"#).unwrap();

        assert!(!pending.is_synced());
        assert!(synced.is_synced());
        assert!(!unknown.is_synced());
    }
}
