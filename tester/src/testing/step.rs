//! Step runner
//!
//! Runs one named step of a suite, logs the outcome and tags any failure
//! with the step name.

use std::future::Future;

use tracing::info;

use crate::error::TesterResult;

/// Run `step` and wrap its error with `name`
pub async fn run_step<T, F>(name: &str, step: F) -> TesterResult<T>
where
    F: Future<Output = TesterResult<T>>,
{
    info!("▶️  {}", name);
    match step.await {
        Ok(value) => {
            shared::logging::log_success(name);
            Ok(value)
        }
        Err(e) => {
            shared::logging::log_error(name, &e);
            Err(e.in_step(name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TesterError;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_failure_is_wrapped_with_step_name() {
        let result: TesterResult<()> =
            run_step("Shall create account", async { Err(TesterError::assertion("name mismatch")) }).await;

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Shall create account: Assertion failed: name mismatch");
        assert_matches!(err.root(), TesterError::Assertion { .. });
    }

    #[tokio::test]
    async fn test_success_passes_value_through() {
        let value = run_step("Shall count", async { Ok(3) }).await.unwrap();
        assert_eq!(value, 3);
    }
}
