//! Device and component helpers

use serde_json::json;
use shared::{
    Component, Device, DeviceActivation, DeviceActivationRequest, DeviceUpdate, NewComponent, NewDevice,
    StatusResponse,
};

use crate::error::TesterResult;
use crate::runtime::ApiClient;
use crate::testing::{ensure_eq, ensure_not_empty, ensure_some};

pub async fn create_device(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    device_id: &str,
    name: &str,
) -> TesterResult<Device> {
    let device = api
        .create_device(
            token,
            account_id,
            &NewDevice {
                device_id: device_id.to_string(),
                gateway_id: device_id.to_string(),
                name: name.to_string(),
            },
        )
        .await?;
    ensure_eq(device.device_id.as_str(), device_id, "device id")?;
    ensure_eq(device.name.as_str(), name, "device name")?;
    Ok(device)
}

/// List devices; `device_id` must come first
pub async fn get_devices(api: &ApiClient, token: &str, account_id: &str, device_id: &str) -> TesterResult<Vec<Device>> {
    let devices = api.list_devices(token, account_id).await?;
    let first = ensure_some(devices.first(), "device list")?;
    ensure_eq(first.device_id.as_str(), device_id, "first device id")?;
    Ok(devices)
}

pub async fn update_device_details(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    device_id: &str,
    update: &DeviceUpdate,
) -> TesterResult<Device> {
    let device = api.update_device(token, account_id, device_id, update).await?;
    ensure_eq(&device.attributes, &update.attributes, "device attributes")?;
    Ok(device)
}

pub async fn get_device_details(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    device_id: &str,
) -> TesterResult<Device> {
    let device = api.get_device(token, account_id, device_id).await?;
    ensure_eq(device.device_id.as_str(), device_id, "device id")?;
    Ok(device)
}

pub async fn get_device_tags(api: &ApiClient, token: &str, account_id: &str) -> TesterResult<Vec<String>> {
    api.device_tags(token, account_id).await
}

pub async fn get_device_attributes(api: &ApiClient, token: &str, account_id: &str) -> TesterResult<serde_json::Value> {
    api.device_attributes(token, account_id).await
}

/// Count active devices
pub async fn count_devices(api: &ApiClient, token: &str, account_id: &str) -> TesterResult<serde_json::Value> {
    let filter = json!({ "status": { "operator": "OR", "value": ["active"] } });
    api.count_devices(token, account_id, &filter).await
}

/// Search devices by name
pub async fn search_devices(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    name: &str,
) -> TesterResult<Vec<Device>> {
    let filter = json!({ "name": { "operator": "like", "value": name } });
    api.search_devices(token, account_id, &filter).await
}

/// Activate the device with the account activation code; returns the device token
pub async fn activate_device(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    device_id: &str,
    activation_code: &str,
) -> TesterResult<DeviceActivation> {
    let activation = api
        .activate_device(
            token,
            account_id,
            device_id,
            &DeviceActivationRequest {
                activation_code: activation_code.to_string(),
            },
        )
        .await?;
    ensure_not_empty(&activation.device_token, "device token")?;
    Ok(activation)
}

/// Register a component on the device and return its cid
pub async fn add_device_component(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    device_id: &str,
    name: &str,
    component_type: &str,
    cid: &str,
) -> TesterResult<String> {
    let component: Component = api
        .add_component(
            token,
            account_id,
            device_id,
            &NewComponent {
                cid: cid.to_string(),
                name: name.to_string(),
                component_type: component_type.to_string(),
            },
        )
        .await?;
    ensure_eq(component.name.as_str(), name, "component name")?;
    ensure_not_empty(&component.cid, "component id")?;
    Ok(component.cid)
}

pub async fn delete_device_component(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    device_id: &str,
    component_id: &str,
) -> TesterResult<StatusResponse> {
    api.delete_component(token, account_id, device_id, component_id).await
}

pub async fn delete_device(api: &ApiClient, token: &str, account_id: &str, device_id: &str) -> TesterResult<StatusResponse> {
    api.delete_device(token, account_id, device_id).await
}
