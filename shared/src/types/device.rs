//! Device and component payloads

use super::Attributes;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,
    #[serde(default)]
    pub gateway_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub loc: Option<Vec<f64>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub device_id: String,
    pub gateway_id: String,
    pub name: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeviceUpdate {
    pub gateway_id: String,
    pub name: String,
    pub loc: Vec<f64>,
    pub tags: Vec<String>,
    pub attributes: Attributes,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeviceActivationRequest {
    pub activation_code: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeviceActivation {
    pub device_token: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Component {
    pub cid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: String,
}

pub type NewComponent = Component;
