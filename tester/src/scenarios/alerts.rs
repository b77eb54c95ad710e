//! Alert suite

use shared::logging::log_suite_start;
use shared::AlertComment;

use super::Suite;
use crate::config::fixtures::{expected_alert_count, switch_off_rule, temperature_sequence};
use crate::error::TesterResult;
use crate::helpers::alerts;
use crate::testing::{ensure_eq, ensure_some, run_step, SuiteContext};

pub async fn alerts(suite: &Suite, ctx: &mut SuiteContext) -> TesterResult<()> {
    log_suite_start("Getting and managing alerts");
    let api = &suite.api;

    let listed = run_step("Shall get list of alerts", async {
        let listed = alerts::get_alerts(api, ctx.user_token()?, ctx.account_id()?).await?;
        ensure_eq(listed.len(), expected_alert_count(&temperature_sequence()), "number of alerts")?;
        Ok(listed)
    })
    .await?;
    ctx.alerts = listed;

    run_step("Shall add comments to the Alert", async {
        let comments = [AlertComment {
            user: "alertcomment@intel.com".to_string(),
            timestamp: 123_233_231_221,
            text: "comment".to_string(),
        }];
        alerts::add_comments(api, ctx.user_token()?, ctx.account_id()?, &ctx.alert(0)?.alert_id, &comments)
            .await
            .map(|_| ())
    })
    .await?;

    run_step("Shall get alert information", async {
        let alert =
            alerts::get_alert_details(api, ctx.user_token()?, ctx.account_id()?, &ctx.alert(0)?.alert_id).await?;
        let condition = ensure_some(alert.conditions.first(), "alert condition")?;
        ensure_eq(
            condition.condition.as_str(),
            switch_off_rule().condition_text().as_str(),
            "alert condition",
        )
    })
    .await?;

    run_step("Shall update alert status", async {
        alerts::update_alert_status(api, ctx.user_token()?, ctx.account_id()?, &ctx.alert(0)?.alert_id, "Open")
            .await
            .map(|_| ())
    })
    .await?;

    run_step("Shall clear alert information", async {
        let alert = alerts::close_alert(api, ctx.user_token()?, ctx.account_id()?, &ctx.alert(2)?.alert_id).await?;
        tracing::debug!(conditions = ?alert.conditions, "Alert closed");
        Ok(())
    })
    .await
}
