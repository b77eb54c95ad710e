//! Component, control and catalog suites

use chrono::Utc;
use shared::logging::log_suite_start;
use uuid::Uuid;

use super::Suite;
use crate::config::fixtures::{
    ACTUATOR_NAME, ACTUATOR_TYPE, COMPONENT_NAME, COMPONENT_PARAM_NAME, COMPONENT_TYPE, SWITCH_OFF_CMD,
    SWITCH_ON_CMD,
};
use crate::error::TesterResult;
use crate::helpers::{catalog, control, devices};
use crate::testing::{ensure, run_step, SuiteContext};

const ACTUATION_HISTORY_MS: i64 = 86_400_000;
const MAX_PULLED_ACTUATIONS: usize = 10;

pub async fn components_and_control(suite: &Suite, ctx: &mut SuiteContext) -> TesterResult<()> {
    log_suite_start("Creating and getting components");
    let api = &suite.api;

    let component_id = run_step("Shall create component", async {
        ctx.device_token()?;
        let cid = Uuid::new_v4().to_string();
        devices::add_device_component(
            api,
            ctx.user_token()?,
            ctx.account_id()?,
            ctx.device_id()?,
            COMPONENT_NAME,
            COMPONENT_TYPE,
            &cid,
        )
        .await
    })
    .await?;
    ctx.component_id = Some(component_id);

    let actuator_id = run_step("Shall create actuator", async {
        let cid = Uuid::new_v4().to_string();
        devices::add_device_component(
            api,
            ctx.user_token()?,
            ctx.account_id()?,
            ctx.device_id()?,
            ACTUATOR_NAME,
            ACTUATOR_TYPE,
            &cid,
        )
        .await
    })
    .await?;
    ctx.actuator_id = Some(actuator_id);

    for (step, command, value) in [
        ("Shall create switch-on actuation command", SWITCH_ON_CMD, 1),
        ("Shall create switch-off actuation command", SWITCH_OFF_CMD, 0),
    ] {
        run_step(step, async {
            control::save_complex_command(
                api,
                ctx.user_token()?,
                ctx.account_id()?,
                command,
                ctx.actuator_id()?,
                COMPONENT_PARAM_NAME,
                value,
            )
            .await
            .map(|_| ())
        })
        .await?;
    }

    run_step("Shall send an actuation", async {
        control::send_actuation_command(
            api,
            ctx.user_token()?,
            ctx.account_id()?,
            ctx.actuator_id()?,
            COMPONENT_PARAM_NAME,
            1,
        )
        .await
        .map(|_| ())
    })
    .await?;

    run_step("Shall get list of actuations", async {
        let from = Utc::now().timestamp_millis() - ACTUATION_HISTORY_MS;
        let values = control::pull_actuations(
            api,
            ctx.user_token()?,
            ctx.account_id()?,
            ctx.device_id()?,
            ctx.actuator_id()?,
            from,
            MAX_PULLED_ACTUATIONS,
        )
        .await?;
        tracing::info!("Pulled actuations: {:?}", values);
        Ok(())
    })
    .await
}

pub async fn catalog(suite: &Suite, ctx: &mut SuiteContext) -> TesterResult<()> {
    log_suite_start("Getting components catalog");
    let api = &suite.api;

    let created = run_step("Shall create a new custom Component Type", async {
        catalog::create_catalog(api, ctx.user_token()?, ctx.account_id()?).await
    })
    .await?;

    run_step("Shall list all component types for account", async {
        let types = catalog::get_catalog(api, ctx.user_token()?, ctx.account_id()?).await?;
        ensure(
            types.iter().any(|t| t.dimension == created.dimension),
            format!("component type {} not listed", created.dimension),
        )
    })
    .await
}
