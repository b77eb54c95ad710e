//! Readiness and authentication suites

use shared::logging::log_suite_start;
use shared::Attributes;

use super::Suite;
use crate::error::TesterResult;
use crate::helpers::{auth, users};
use crate::pollers::wait_for_readiness;
use crate::runtime::KafkaHeartbeatSource;
use crate::testing::{run_step, SuiteContext};

/// Wait until every monitored service publishes a heartbeat
pub async fn readiness(suite: &Suite) -> TesterResult<()> {
    log_suite_start("Waiting for OISP services to be ready");

    run_step("Shall wait for oisp services to start", async {
        let source = KafkaHeartbeatSource::new(&suite.config.kafka_broker, &suite.config.heartbeat_topic);
        wait_for_readiness(
            &source,
            &suite.config.services_to_monitor,
            &suite.readiness_policy(),
            &suite.cancel,
        )
        .await
    })
    .await
}

/// Log in as the main user and manage its profile
pub async fn auth(suite: &Suite, ctx: &mut SuiteContext) -> TesterResult<()> {
    log_suite_start("Get authorization and manage user");
    let api = &suite.api;

    let token = run_step("Shall authenticate", async {
        let credentials = suite.config.require_credentials()?;
        auth::login(api, &credentials.username, &credentials.password).await
    })
    .await?;
    ctx.user_token = Some(token);

    let user_id = run_step("Shall get token info", async {
        let (_, user_id) = auth::token_info(api, ctx.user_token()?).await?;
        tracing::info!("userId is: {}", user_id);
        Ok(user_id)
    })
    .await?;
    ctx.user_id = Some(user_id);

    run_step("Shall get user info", async {
        auth::user_info(api, ctx.user_token()?).await.map(|_| ())
    })
    .await?;

    run_step("Shall get user information", async {
        users::get_user_info(api, ctx.user_token()?, ctx.user_id()?).await.map(|_| ())
    })
    .await?;

    run_step("Shall update user information", async {
        let attributes = Attributes::from([
            ("phone".to_string(), "12366666666".to_string()),
            ("another_attribute".to_string(), "another_value".to_string()),
            ("new".to_string(), "next_string_value".to_string()),
        ]);
        users::update_user_info(api, ctx.user_token()?, ctx.user_id()?, attributes)
            .await
            .map(|_| ())
    })
    .await
}
