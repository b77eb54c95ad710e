//! Teardown suite: removes what the earlier suites created

use shared::logging::log_suite_start;

use super::Suite;
use crate::error::TesterResult;
use crate::helpers::{accounts, devices, rules, users};
use crate::testing::{run_step, SuiteContext};

pub async fn teardown(suite: &Suite, ctx: &mut SuiteContext) -> TesterResult<()> {
    log_suite_start("Delete users and other");
    let api = &suite.api;

    // Drafts are not addressable by id; deleting without one is a no-op.
    run_step("Shall delete draft rule", async {
        rules::delete_rule(api, ctx.user_token()?, ctx.account_id()?, None)
            .await
            .map(|_| ())
    })
    .await?;

    run_step("Shall delete a rule", async {
        let rule_id = ctx.listed_rule(0)?.id.as_str();
        rules::delete_rule(api, ctx.user_token()?, ctx.account_id()?, Some(rule_id))
            .await
            .map(|_| ())
    })
    .await?;

    run_step("Shall delete a component", async {
        devices::delete_device_component(
            api,
            ctx.user_token()?,
            ctx.account_id()?,
            ctx.device_id()?,
            ctx.component_id()?,
        )
        .await
        .map(|_| ())
    })
    .await?;

    run_step("Shall delete a device", async {
        devices::delete_device(api, ctx.user_token()?, ctx.account_id()?, ctx.device_id()?)
            .await
            .map(|_| ())
    })
    .await?;

    run_step("Shall delete an account", async {
        accounts::delete_account(api, ctx.user_token()?, ctx.account_id()?)
            .await
            .map(|_| ())
    })
    .await?;

    run_step("Shall delete a user", async {
        users::delete_user(api, ctx.user_token()?, ctx.user_id()?)
            .await
            .map(|_| ())
    })
    .await
}
