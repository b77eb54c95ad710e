//! Core types exchanged with the platform REST API
//!
//! Field names follow the platform's camelCase JSON. Objects that the tester
//! reads and writes back (accounts) keep unknown fields so an update does not
//! drop server-side state.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

pub mod account;
pub mod alert;
pub mod auth;
pub mod catalog;
pub mod control;
pub mod data;
pub mod device;
pub mod rule;
pub mod user;

pub use account::*;
pub use alert::*;
pub use auth::*;
pub use catalog::*;
pub use control::*;
pub use data::*;
pub use device::*;
pub use rule::*;
pub use user::*;

/// Free-form string attributes attached to users, accounts and devices
pub type Attributes = BTreeMap<String, String>;

/// Generic `{"status": "OK"}` acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// Accept a JSON string, number or bool and keep its textual form.
///
/// Observation values and actuation parameters come back either quoted or
/// bare depending on the endpoint.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Like [`string_or_number`], with JSON `null` (or a missing field) as `None`
pub fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        serde_json::Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected string, number or null, got {other}"
        ))),
    }
}
