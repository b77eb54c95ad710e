//! E2E Test Runner
//!
//! Runs one scenario (or the whole suite) against a live OISP deployment:
//! - Loads endpoints and credentials from the environment / `.env`
//! - Runs the selected scenario under a global timeout
//! - Cancels in-flight waits on Ctrl+C

use clap::Parser;
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use tester::{Suite, SuiteConfig, SuiteConfigBuilder, SuiteContext, TestScenarios};

#[derive(Parser)]
#[command(name = "tester")]
#[command(about = "E2E testing framework for the OISP platform")]
struct Args {
    /// Suite to run, or `all`
    #[arg(long, default_value = "all")]
    scenario: String,

    /// Overall time budget in seconds
    #[arg(long, default_value = "900")]
    timeout_secs: u64,

    /// Override the REST API root (OISP_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// List available scenarios and exit
    #[arg(long)]
    list: bool,

    /// Enable verbose tracing output
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    shared::logging::init_tracing(args.verbose);

    if args.list {
        for name in TestScenarios::available_scenarios() {
            println!("{name}");
        }
        return Ok(());
    }

    tracing::info!(scenario = %args.scenario, timeout_secs = args.timeout_secs, "🧪 Starting OISP E2E tests");

    let mut builder = SuiteConfigBuilder::from_config(SuiteConfig::from_env()?);
    if let Some(api_url) = args.api_url {
        builder = builder.api_url(api_url);
    }
    let config = builder.build();
    tracing::info!("🚀 Target API: {}", config.api_url);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("🛑 Interrupted, cancelling running waits");
            on_interrupt.cancel();
        }
    });

    let scenarios = TestScenarios::new(Suite::new(config, cancel)?);
    let mut ctx = SuiteContext::new();

    let budget = Duration::from_secs(args.timeout_secs);
    match timeout(budget, scenarios.run_scenario(&args.scenario, &mut ctx)).await {
        Ok(Ok(())) => tracing::info!("✅ Scenario '{}' passed", args.scenario),
        Ok(Err(e)) => {
            tracing::error!("❌ Scenario '{}' failed: {}", args.scenario, e);
            return Err(e.into());
        }
        Err(_) => {
            tracing::error!("⏰ Scenario '{}' exceeded {:?}", args.scenario, budget);
            return Err(format!("scenario '{}' timed out", args.scenario).into());
        }
    }

    tracing::info!("🏁 OISP E2E run finished");
    Ok(())
}
