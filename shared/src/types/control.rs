//! Actuation (control) payloads

use serde::{Deserialize, Serialize};

/// Transport used by the platform to deliver actuations to the tester
pub const WS_TRANSPORT: &str = "ws";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CommandParameter {
    pub name: String,
    #[serde(deserialize_with = "super::string_or_number")]
    pub value: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActuationCommand {
    pub component_id: String,
    pub transport: String,
    pub parameters: Vec<CommandParameter>,
}

impl ActuationCommand {
    pub fn single(component_id: &str, param_name: &str, value: impl ToString) -> Self {
        Self {
            component_id: component_id.to_string(),
            transport: WS_TRANSPORT.to_string(),
            parameters: vec![CommandParameter {
                name: param_name.to_string(),
                value: value.to_string(),
            }],
        }
    }
}

/// Named command stored on the account, referenced by rule actions
#[derive(Serialize, Debug, Clone)]
pub struct ComplexCommandRequest {
    pub commands: Vec<ActuationCommand>,
}

/// Direct actuation sent through the control endpoint
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActuationRequest {
    pub commands: Vec<ActuationCommand>,
    pub complex_commands: Vec<String>,
}

/// One actuation as reported by the pull endpoint
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Actuation {
    pub component_id: String,
    #[serde(default)]
    pub parameters: Vec<CommandParameter>,
    #[serde(default)]
    pub created: Option<i64>,
}

impl Actuation {
    /// Value of the first parameter, which is the switch state for our commands
    pub fn first_value(&self) -> Option<&str> {
        self.parameters.first().map(|p| p.value.as_str())
    }
}
