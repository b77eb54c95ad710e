//! Rule creation and rule management suites

use shared::logging::log_suite_start;

use super::Suite;
use crate::config::fixtures::{switch_off_rule, switch_on_rule, updated_high_temp_rule, DRAFT_RULE_NAME};
use crate::error::TesterResult;
use crate::helpers::rules;
use crate::testing::{ensure_eq, ensure_some, run_step, SuiteContext};

/// Create the switch-on and switch-off rules and wait for both to sync
pub async fn create_rules(suite: &Suite, ctx: &mut SuiteContext) -> TesterResult<()> {
    log_suite_start("Creating rules");
    let api = &suite.api;
    let policy = suite.rule_sync_policy();

    for (step, definition) in [
        ("Shall create switch-on rule", switch_on_rule()),
        ("Shall create switch-off rule", switch_off_rule()),
    ] {
        let rule_id = run_step(step, async {
            ctx.device_token()?;
            rules::create_rule(
                api,
                ctx.user_token()?,
                ctx.account_id()?,
                ctx.device_id()?,
                ctx.component_id()?,
                &definition,
                &policy,
                &suite.cancel,
            )
            .await
        })
        .await?;
        ctx.rules.insert(definition.actuation_cmd.clone(), rule_id);
    }

    let rule_list = run_step("Shall get all rules", async {
        let listed = rules::get_rules(api, ctx.user_token()?, ctx.account_id()?).await?;
        let first = ensure_some(listed.first(), "rule list")?;
        ensure_eq(first.name.as_str(), switch_off_rule().name.as_str(), "first rule name")?;
        Ok(listed)
    })
    .await?;
    ctx.rule_list = rule_list;

    Ok(())
}

/// Clone, update and archive rules, then add a draft
pub async fn rule_management(suite: &Suite, ctx: &mut SuiteContext) -> TesterResult<()> {
    log_suite_start("Update rules and create draft rules");
    let api = &suite.api;

    let cloned = run_step("Shall clone a rule", async {
        rules::clone_rule(api, ctx.user_token()?, ctx.account_id()?, ctx.listed_rule(1)?).await
    })
    .await?;
    ctx.cloned_rule_id = Some(cloned.id);

    run_step("Shall update a rule", async {
        let rule = rules::update_rule(
            api,
            ctx.user_token()?,
            ctx.account_id()?,
            ctx.cloned_rule_id()?,
            &updated_high_temp_rule(),
            ctx.device_id()?,
            ctx.component_id()?,
        )
        .await?;
        tracing::debug!(rule_id = %rule.id, name = %rule.name, "Rule updated");
        Ok(())
    })
    .await?;

    run_step("Shall update rule status", async {
        let rule_id = ctx.listed_rule(1)?.id.as_str();
        rules::update_rule_status(api, ctx.user_token()?, ctx.account_id()?, rule_id, "Archived")
            .await
            .map(|_| ())
    })
    .await?;

    run_step("Shall create a draft rule", async {
        rules::create_draft_rule(api, ctx.user_token()?, ctx.account_id()?, DRAFT_RULE_NAME)
            .await
            .map(|_| ())
    })
    .await
}
