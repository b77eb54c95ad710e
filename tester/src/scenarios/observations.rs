//! Observation suite: drives the sensor through both rules and checks the
//! actuations pushed back on the control channel

use shared::logging::log_suite_start;
use tokio::time::timeout;

use super::Suite;
use crate::config::fixtures::{temperature_sequence, COMPONENT_PARAM_NAME, SWITCH_OFF_CMD, SWITCH_ON_CMD};
use crate::error::{TesterError, TesterResult};
use crate::helpers::{data, DeviceObservationSink};
use crate::pollers::run_observation_sequence;
use crate::runtime::WsControlChannel;
use crate::testing::{ensure_some, run_step, SuiteContext};
use crate::traits::ControlChannel;

pub async fn observations(suite: &Suite, ctx: &mut SuiteContext) -> TesterResult<()> {
    log_suite_start("Sending observations and checking rules");
    let api = &suite.api;

    let run = run_step("Shall send observation and check rules", async {
        ctx.rule_for(SWITCH_ON_CMD)?;
        ctx.rule_for(SWITCH_OFF_CMD)?;

        let sink = DeviceObservationSink {
            api,
            device_token: ctx.device_token()?,
            account_id: ctx.account_id()?,
            device_id: ctx.device_id()?,
            component_id: ctx.component_id()?,
        };
        let mut channel = WsControlChannel::connect(
            &suite.config.ws_url,
            sink.device_id,
            sink.device_token,
            suite.config.timeouts.actuation,
        )
        .await?;

        let steps = temperature_sequence();
        let limit = suite.config.timeouts.observations;
        let result = timeout(
            limit,
            run_observation_sequence(&sink, &mut channel, &steps, COMPONENT_PARAM_NAME),
        )
        .await;
        channel.close().await?;

        result.map_err(|_| TesterError::Timeout {
            operation: "observation sequence".to_string(),
            elapsed: limit,
            attempts: 1,
        })?
    })
    .await?;
    ctx.observations = Some(run);

    run_step("Shall check observation", async {
        let run = ctx.observations()?;
        let from = ensure_some(run.first_observation_time(), "first observation time")?;
        let component_id = ctx.component_id()?;
        let response =
            data::search_data(api, ctx.user_token()?, ctx.account_id()?, ctx.device_id()?, component_id, from)
                .await?;
        data::verify_observations(&response, component_id, &run.observations)
    })
    .await?;

    run_step("Shall check observation in advance ways", async {
        let from = ensure_some(ctx.observations()?.first_observation_time(), "first observation time")?;
        let response = data::search_data_advanced(
            api,
            ctx.user_token()?,
            ctx.account_id()?,
            ctx.device_id()?,
            ctx.component_id()?,
            from,
        )
        .await?;
        tracing::debug!(%response, "Advanced data search");
        Ok(())
    })
    .await
}
