//! Shared logging utilities for consistent tracing across the tester

use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Default filter when `RUST_LOG` is not set
pub fn default_filter(verbose: bool) -> String {
    if verbose {
        "tester=debug,shared=debug,info".to_string()
    } else {
        "tester=info,shared=info,rskafka=warn,reqwest=warn".to_string()
    }
}

/// Initialize the stdout tracing subscriber.
///
/// `RUST_LOG` wins over the verbosity flag so a single run can be narrowed
/// down without rebuilding.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // try_init: integration tests may install a subscriber more than once
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Logging helper for a suite starting
pub fn log_suite_start(suite: &str) {
    info!(suite = suite, timestamp = format_timestamp(), "🧪 {}", suite);
}

/// Logging helper for a passed step
pub fn log_success(step: &str) {
    info!(step = step, timestamp = format_timestamp(), "✅ {}", step);
}

/// Logging helper for a failed step
pub fn log_error(step: &str, error: &dyn std::fmt::Display) {
    error!(
        step = step,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        step,
        error
    );
}

/// Logging helper for waits on the backend
pub fn log_waiting(action: &str, details: &str) {
    info!(timestamp = format_timestamp(), "⏳ {}: {}", action, details);
}
