//! Device ↔ platform control channel messages

use crate::errors::{SharedError, SharedResult};
use serde::{Deserialize, Serialize};

/// First frame a device sends to bind the connection to its id
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRegistration {
    #[serde(rename = "type")]
    pub message_type: String,
    pub device_id: String,
    pub device_token: String,
}

impl DeviceRegistration {
    pub fn new(device_id: &str, device_token: &str) -> Self {
        Self {
            message_type: "device".to_string(),
            device_id: device_id.to_string(),
            device_token: device_token.to_string(),
        }
    }
}

/// Any frame pushed by the platform
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ControlMessage {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub content: Option<serde_json::Value>,
}

impl ControlMessage {
    pub fn parse(text: &str) -> SharedResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Actuation payload, if this frame carries one.
    ///
    /// Registration acknowledgements and status frames have no `params`
    /// list and yield `None`. A frame with `params` that cannot be decoded
    /// yields the decode error.
    pub fn actuation(&self) -> Option<SharedResult<ActuationContent>> {
        let content = self.content.as_ref()?;
        content.get("params")?;
        Some(serde_json::from_value(content.clone()).map_err(SharedError::from))
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActuationContent {
    #[serde(default)]
    pub component_id: Option<String>,
    #[serde(default)]
    pub params: Vec<ActuationParam>,
}

impl ActuationContent {
    /// The parameter called `name`, only if exactly one such parameter exists
    pub fn param(&self, name: &str) -> Option<&ActuationParam> {
        let mut matching = self.params.iter().filter(|p| p.name == name);
        match (matching.next(), matching.next()) {
            (Some(param), None) => Some(param),
            _ => None,
        }
    }
}

/// Parameters decode leniently; a nameless one never matches and a null
/// value is kept as `None`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ActuationParam {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "crate::types::optional_string_or_number")]
    pub value: Option<String>,
}
