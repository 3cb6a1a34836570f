//! apicheck binary: runs the built-in suite against the live services.

use std::process::ExitCode;

use apicheck::{public_api_suite, run_with};
use apicheck_infrastructure::{ReqwestHttpClient, load_settings, render_report};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = load_settings()?;
    tracing::info!(
        "apicheck v{} (timeout {} ms, parallel: {})",
        env!("CARGO_PKG_VERSION"),
        settings.timeout_ms,
        settings.parallel
    );

    let client = ReqwestHttpClient::from_settings(&settings)?;
    let scenarios = public_api_suite(&settings);
    let report = run_with(client, &settings, &scenarios).await;

    println!("{}", render_report(&report, settings.format)?);

    if report.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
