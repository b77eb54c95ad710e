//! Rule helpers

use async_trait::async_trait;
use shared::{
    Condition, ConditionComponent, Conditions, DraftRuleRequest, Population, Rule, RuleAction, RuleRequest,
    RuleStatusUpdate, StatusResponse,
};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::RuleDefinition;
use crate::error::TesterResult;
use crate::pollers::wait_for_rule_sync;
use crate::runtime::{ApiClient, RetryPolicy};
use crate::testing::{ensure_eq, ensure_not_empty};
use crate::traits::RuleStatusSource;

/// Request body for a rule that fires `definition.actuation_cmd` on `device_id`
pub fn rule_request(definition: &RuleDefinition, device_id: &str, component_id: &str) -> RuleRequest {
    RuleRequest {
        name: definition.name.clone(),
        description: "OISP testing rule".to_string(),
        priority: "Medium".to_string(),
        rule_type: "Regular".to_string(),
        status: "Active".to_string(),
        reset_type: "Automatic".to_string(),
        actions: vec![RuleAction {
            action_type: "actuation".to_string(),
            target: vec![definition.actuation_cmd.clone()],
        }],
        population: Population {
            ids: vec![device_id.to_string()],
            attributes: None,
            tags: None,
        },
        conditions: Conditions {
            operator: "OR".to_string(),
            values: vec![Condition {
                component: ConditionComponent {
                    data_type: "Number".to_string(),
                    name: definition.condition_component.clone(),
                    cid: component_id.to_string(),
                },
                condition_type: "basic".to_string(),
                values: vec![definition.value.clone()],
                operator: definition.operator.clone(),
            }],
        },
    }
}

/// Rule details through the REST API, for the sync poller
pub struct RuleStatusLookup<'a> {
    pub api: &'a ApiClient,
    pub token: &'a str,
    pub account_id: &'a str,
}

#[async_trait]
impl RuleStatusSource for RuleStatusLookup<'_> {
    async fn rule_details(&self, rule_id: &str) -> TesterResult<Rule> {
        self.api.get_rule(self.token, self.account_id, rule_id).await
    }
}

/// Create a rule and wait until the rule engine has it; returns the rule id
#[allow(clippy::too_many_arguments)]
pub async fn create_rule(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    device_id: &str,
    component_id: &str,
    definition: &RuleDefinition,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> TesterResult<String> {
    let rule = api
        .create_rule(token, account_id, &rule_request(definition, device_id, component_id))
        .await?;
    ensure_not_empty(&rule.id, "rule id")?;
    info!("⏳ Rule {} created as {}, waiting for sync", definition.name, rule.id);

    let lookup = RuleStatusLookup { api, token, account_id };
    wait_for_rule_sync(&lookup, &rule.id, policy, cancel).await
}

pub async fn get_rules(api: &ApiClient, token: &str, account_id: &str) -> TesterResult<Vec<Rule>> {
    api.list_rules(token, account_id).await
}

pub async fn clone_rule(api: &ApiClient, token: &str, account_id: &str, rule: &Rule) -> TesterResult<Rule> {
    let cloned = api.clone_rule(token, account_id, &rule.id).await?;
    ensure_eq(cloned.name.clone(), format!("{} - cloned", rule.name), "cloned rule name")?;
    Ok(cloned)
}

pub async fn update_rule(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    rule_id: &str,
    definition: &RuleDefinition,
    device_id: &str,
    component_id: &str,
) -> TesterResult<Rule> {
    api.update_rule(token, account_id, rule_id, &rule_request(definition, device_id, component_id))
        .await
}

pub async fn update_rule_status(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    rule_id: &str,
    status: &str,
) -> TesterResult<Rule> {
    let update = RuleStatusUpdate {
        status: status.to_string(),
    };
    let rule = api.update_rule_status(token, account_id, rule_id, &update).await?;
    ensure_eq(rule.status.as_deref(), Some(status), "rule status")?;
    Ok(rule)
}

pub async fn create_draft_rule(api: &ApiClient, token: &str, account_id: &str, name: &str) -> TesterResult<Rule> {
    let draft = DraftRuleRequest { name: name.to_string() };
    let rule = api.create_draft_rule(token, account_id, &draft).await?;
    ensure_eq(rule.name.as_str(), name, "draft rule name")?;
    Ok(rule)
}

/// Delete a rule together with its alerts. Without an id there is nothing
/// to delete and the call succeeds without touching the backend.
pub async fn delete_rule(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    rule_id: Option<&str>,
) -> TesterResult<StatusResponse> {
    match rule_id {
        Some(rule_id) => api.delete_rule(token, account_id, rule_id).await,
        None => Ok(StatusResponse::ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::switch_off_rule;

    #[test]
    fn test_rule_request_shape() {
        let request = rule_request(&switch_off_rule(), "00-11-22-33-44-55", "cid-1");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["type"], "Regular");
        assert_eq!(json["resetType"], "Automatic");
        assert_eq!(json["actions"][0]["type"], "actuation");
        assert_eq!(json["actions"][0]["target"][0], "switch-off");
        assert_eq!(json["population"]["ids"][0], "00-11-22-33-44-55");
        assert!(json["population"]["tags"].is_null());

        let condition = &json["conditions"]["values"][0];
        assert_eq!(condition["component"]["dataType"], "Number");
        assert_eq!(condition["component"]["cid"], "cid-1");
        assert_eq!(condition["type"], "basic");
        assert_eq!(condition["operator"], ">");
        assert_eq!(condition["values"][0], "25");
    }
}
