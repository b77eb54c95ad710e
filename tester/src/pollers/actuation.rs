//! Ordered observation / actuation exchange
//!
//! Observations go out one at a time. When a step expects an actuation the
//! next one is read from the control channel before moving on, so every
//! expected push is matched against exactly one received push, in order.

use tracing::info;

use crate::config::TemperatureStep;
use crate::error::{TesterError, TesterResult};
use crate::traits::{ControlChannel, ObservationSink};

/// One observation as it was submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmittedObservation {
    pub ts: i64,
    pub value: i64,
}

/// Everything a completed run submitted, in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationRun {
    pub observations: Vec<SubmittedObservation>,
}

impl ObservationRun {
    pub fn first_observation_time(&self) -> Option<i64> {
        self.observations.iter().map(|o| o.ts).min()
    }

    pub fn last_observation_time(&self) -> Option<i64> {
        self.observations.iter().map(|o| o.ts).max()
    }
}

/// Drive `steps` through the sink, checking `param_name` on each push.
///
/// The channel is left open; closing it is up to the caller.
pub async fn run_observation_sequence<S, C>(
    sink: &S,
    channel: &mut C,
    steps: &[TemperatureStep],
    param_name: &str,
) -> TesterResult<ObservationRun>
where
    S: ObservationSink + ?Sized,
    C: ControlChannel + ?Sized,
{
    let mut run = ObservationRun::default();

    for (index, step) in steps.iter().enumerate() {
        let ts = sink.submit(step.value).await?;
        run.observations.push(SubmittedObservation { ts, value: step.value });
        info!("📤 Observation {} sent: value={} ts={}", index, step.value, ts);

        let Some(expected) = step.expected_actuation else {
            continue;
        };

        let actuation = channel.next_actuation().await?;
        let param = actuation.param(param_name).ok_or_else(|| TesterError::MissingParam {
            name: param_name.to_string(),
        })?;

        let expected = expected.to_string();
        let received = param.value.as_deref().unwrap_or("null");
        if received != expected {
            return Err(TesterError::ParamMismatch {
                index,
                expected,
                received: received.to_string(),
            });
        }
        info!("✅ Actuation {}={} received for observation {}", param_name, received, index);
    }

    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::temperature_sequence;
    use crate::traits::{MockControlChannel, MockObservationSink};
    use assert_matches::assert_matches;
    use shared::{ActuationContent, ActuationParam};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn push(name: &str, value: &str) -> ActuationContent {
        push_params(&[(name, Some(value))])
    }

    fn push_params(params: &[(&str, Option<&str>)]) -> ActuationContent {
        ActuationContent {
            component_id: Some("actuator-cid".to_string()),
            params: params
                .iter()
                .map(|(name, value)| ActuationParam {
                    name: name.to_string(),
                    value: value.map(str::to_string),
                })
                .collect(),
        }
    }

    fn counting_sink() -> MockObservationSink {
        let mut sink = MockObservationSink::new();
        let clock = Arc::new(Mutex::new(1_000i64));
        sink.expect_submit().returning(move |_| {
            let mut now = clock.lock().unwrap();
            *now += 10;
            Ok(*now)
        });
        sink
    }

    fn scripted_channel(pushes: Vec<ActuationContent>) -> MockControlChannel {
        let queue = Arc::new(Mutex::new(VecDeque::from(pushes)));
        let mut channel = MockControlChannel::new();
        channel.expect_next_actuation().returning(move || {
            queue.lock().unwrap().pop_front().ok_or(TesterError::Timeout {
                operation: "actuation push".to_string(),
                elapsed: Duration::from_secs(30),
                attempts: 1,
            })
        });
        channel
    }

    #[tokio::test]
    async fn test_full_sequence_passes() {
        let sink = counting_sink();
        let pushes = ["1", "1", "1", "1", "0", "1", "0"]
            .iter()
            .map(|v| push("LED", v))
            .collect();
        let mut channel = scripted_channel(pushes);

        let run = run_observation_sequence(&sink, &mut channel, &temperature_sequence(), "LED")
            .await
            .unwrap();

        assert_eq!(run.observations.len(), 10);
        assert_eq!(run.observations[0], SubmittedObservation { ts: 1_010, value: -15 });
        assert_eq!(run.first_observation_time(), Some(1_010));
        assert_eq!(run.last_observation_time(), Some(1_100));
    }

    #[tokio::test]
    async fn test_step_without_actuation_does_not_wait() {
        let sink = counting_sink();
        let mut channel = MockControlChannel::new();
        channel.expect_next_actuation().never();

        let steps = [TemperatureStep::new(25, None), TemperatureStep::new(20, None)];
        let run = run_observation_sequence(&sink, &mut channel, &steps, "LED").await.unwrap();
        assert_eq!(run.observations.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_param() {
        let sink = counting_sink();
        let mut channel = scripted_channel(vec![push("brightness", "1")]);

        let steps = [TemperatureStep::new(-15, Some(1))];
        let result = run_observation_sequence(&sink, &mut channel, &steps, "LED").await;
        assert_matches!(result, Err(TesterError::MissingParam { name }) if name == "LED");
    }

    #[tokio::test]
    async fn test_duplicate_param_is_missing() {
        let sink = counting_sink();
        let mut channel = scripted_channel(vec![push_params(&[("LED", Some("1")), ("LED", Some("0"))])]);

        let steps = [TemperatureStep::new(-15, Some(1))];
        let result = run_observation_sequence(&sink, &mut channel, &steps, "LED").await;
        assert_matches!(result, Err(TesterError::MissingParam { name }) if name == "LED");
    }

    #[tokio::test]
    async fn test_null_value_is_a_mismatch() {
        let sink = counting_sink();
        let mut channel = scripted_channel(vec![push_params(&[("LED", None)])]);

        let steps = [TemperatureStep::new(-15, Some(1))];
        let result = run_observation_sequence(&sink, &mut channel, &steps, "LED").await;
        assert_matches!(
            result,
            Err(TesterError::ParamMismatch { index: 0, received, .. }) if received == "null"
        );
    }

    #[tokio::test]
    async fn test_wrong_value_reports_index() {
        let sink = counting_sink();
        let mut channel = scripted_channel(vec![push("LED", "1"), push("LED", "1")]);

        let steps = [
            TemperatureStep::new(15, Some(1)),
            TemperatureStep::new(25, None),
            TemperatureStep::new(30, Some(0)),
        ];
        let result = run_observation_sequence(&sink, &mut channel, &steps, "LED").await;
        assert_matches!(
            result,
            Err(TesterError::ParamMismatch { index: 2, expected, received }) if expected == "0" && received == "1"
        );
    }

    #[tokio::test]
    async fn test_push_timeout_propagates() {
        let sink = counting_sink();
        let mut channel = scripted_channel(Vec::new());

        let steps = [TemperatureStep::new(-15, Some(1))];
        let result = run_observation_sequence(&sink, &mut channel, &steps, "LED").await;
        assert_matches!(result, Err(TesterError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_submit_failure_stops_run() {
        let mut sink = MockObservationSink::new();
        sink.expect_submit().times(1).returning(|_| {
            Err(TesterError::Api {
                operation: "submit data".to_string(),
                status: 401,
                body: "unauthorized".to_string(),
            })
        });
        let mut channel = MockControlChannel::new();
        channel.expect_next_actuation().never();

        let result = run_observation_sequence(&sink, &mut channel, &temperature_sequence(), "LED").await;
        assert_matches!(result, Err(TesterError::Api { status: 401, .. }));
    }
}
