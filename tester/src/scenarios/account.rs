//! Account and device suite

use shared::logging::log_suite_start;
use shared::{Attributes, DeviceUpdate};

use super::Suite;
use crate::config::fixtures::{ACCOUNT_NAME, DEVICE_ID, DEVICE_NAME};
use crate::error::TesterResult;
use crate::helpers::{accounts, devices};
use crate::testing::{ensure_eq, run_step, SuiteContext};

fn attributes(pairs: &[(&str, &str)]) -> Attributes {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn device_attributes() -> Attributes {
    attributes(&[("vendor", "intel"), ("platform", "x64"), ("os", "linux")])
}

pub async fn account_and_device(suite: &Suite, ctx: &mut SuiteContext) -> TesterResult<()> {
    log_suite_start("Creating account and device");
    let api = &suite.api;

    let account = run_step("Shall create account", async {
        accounts::create_account(api, ctx.user_token()?, ACCOUNT_NAME).await
    })
    .await?;
    tracing::info!("accountId is: {}", account.id);
    ctx.account_id = Some(account.id);

    let account = run_step("Shall get account info", async {
        accounts::get_account_info(api, ctx.user_token()?, ctx.account_id()?).await
    })
    .await?;

    run_step("Shall update an account", async {
        let attributes = attributes(&[
            ("phone", "123456789"),
            ("another_attribute", "another_value"),
            ("new", "next_string_value"),
        ]);
        accounts::update_account(api, ctx.user_token()?, account, attributes)
            .await
            .map(|_| ())
    })
    .await?;

    let code = run_step("Shall get account activation code", async {
        accounts::get_activation_code(api, ctx.user_token()?, ctx.account_id()?).await
    })
    .await?;
    ctx.activation_code = Some(code.activation_code);

    let code = run_step("Shall refresh account activation code", async {
        accounts::refresh_activation_code(api, ctx.user_token()?, ctx.account_id()?).await
    })
    .await?;
    ctx.activation_code = Some(code.activation_code);

    run_step("Shall list all users for account", async {
        accounts::get_account_users(api, ctx.user_token()?, ctx.account_id()?)
            .await
            .map(|_| ())
    })
    .await?;

    let device = run_step("Shall create device", async {
        devices::create_device(api, ctx.user_token()?, ctx.account_id()?, DEVICE_ID, DEVICE_NAME).await
    })
    .await?;
    ctx.device_id = Some(device.device_id);

    run_step("Shall get a list of all devices", async {
        devices::get_devices(api, ctx.user_token()?, ctx.account_id()?, ctx.device_id()?)
            .await
            .map(|_| ())
    })
    .await?;

    run_step("Shall update info of a device", async {
        let device_id = ctx.device_id()?;
        let update = DeviceUpdate {
            gateway_id: device_id.to_string(),
            name: DEVICE_NAME.to_string(),
            loc: vec![45.12345, -130.654321, 121.1],
            tags: vec!["tag001".to_string(), "tag002".to_string()],
            attributes: device_attributes(),
        };
        devices::update_device_details(api, ctx.user_token()?, ctx.account_id()?, device_id, &update)
            .await
            .map(|_| ())
    })
    .await?;

    run_step("Shall get detail of one device", async {
        let device = devices::get_device_details(api, ctx.user_token()?, ctx.account_id()?, ctx.device_id()?).await?;
        ensure_eq(&device.attributes, &device_attributes(), "device attributes")
    })
    .await?;

    run_step("Shall list all tags for device", async {
        let tags = devices::get_device_tags(api, ctx.user_token()?, ctx.account_id()?).await?;
        tracing::debug!(?tags, "Device tags");
        Ok(())
    })
    .await?;

    run_step("Shall list all attributes for device", async {
        let attributes = devices::get_device_attributes(api, ctx.user_token()?, ctx.account_id()?).await?;
        tracing::debug!(%attributes, "Device attributes");
        Ok(())
    })
    .await?;

    run_step("Shall count devices based on filter", async {
        let count = devices::count_devices(api, ctx.user_token()?, ctx.account_id()?).await?;
        tracing::debug!(%count, "Device count");
        Ok(())
    })
    .await?;

    run_step("Shall search devices based on filter", async {
        let found = devices::search_devices(api, ctx.user_token()?, ctx.account_id()?, DEVICE_NAME).await?;
        tracing::debug!(found = found.len(), "Device search");
        Ok(())
    })
    .await?;

    let activation = run_step("Shall activate device", async {
        devices::activate_device(
            api,
            ctx.user_token()?,
            ctx.account_id()?,
            ctx.device_id()?,
            ctx.activation_code()?,
        )
        .await
    })
    .await?;
    ctx.device_token = Some(activation.device_token);

    Ok(())
}
