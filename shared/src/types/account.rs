//! Account payloads

use super::Attributes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub attributes: Attributes,
    /// Everything else the backend sent, written back untouched on update
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize, Debug, Clone)]
pub struct NewAccount {
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivationCode {
    pub activation_code: String,
    #[serde(default)]
    pub time_left: Option<i64>,
}

/// Role assignment of a user inside one or more accounts
#[derive(Serialize, Debug, Clone)]
pub struct AccountRoleUpdate {
    pub id: String,
    pub accounts: BTreeMap<String, String>,
}

impl AccountRoleUpdate {
    pub fn admin(user_id: &str, account_id: &str) -> Self {
        let mut accounts = BTreeMap::new();
        accounts.insert(account_id.to_string(), "admin".to_string());
        Self {
            id: user_id.to_string(),
            accounts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_keeps_unknown_fields() {
        let raw = r#"{"id":"a1","name":"oisp-tests","healthTimePeriod":86400,"attributes":{"phone":"1"}}"#;
        let account: Account = serde_json::from_str(raw).unwrap();

        assert_eq!(account.attributes.get("phone").map(String::as_str), Some("1"));
        assert_eq!(account.extra.get("healthTimePeriod"), Some(&serde_json::json!(86400)));

        let back = serde_json::to_value(&account).unwrap();
        assert_eq!(back["healthTimePeriod"], 86400);
    }

    #[test]
    fn test_admin_role_update_shape() {
        let update = AccountRoleUpdate::admin("u1", "a1");
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"id": "u1", "accounts": {"a1": "admin"}}));
    }
}
