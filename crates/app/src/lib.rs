//! apicheck - HTTP API smoke tests
//!
//! Ships the built-in suite against the GitHub API and JSONPlaceholder, and
//! a helper that runs any suite with the configured client and evaluator.

pub mod suite;

use std::sync::Arc;

use apicheck_application::{HttpClient, RunSuite};
use apicheck_domain::{RunnerSettings, Scenario, SuiteReport};
use apicheck_infrastructure::AssertionRunner;

pub use suite::{GITHUB_API, JSONPLACEHOLDER, public_api_suite};

/// Runs `scenarios` through `client`, honoring `settings.parallel`.
pub async fn run_with<C>(client: C, settings: &RunnerSettings, scenarios: &[Scenario]) -> SuiteReport
where
    C: HttpClient + 'static,
{
    RunSuite::new(Arc::new(client), Arc::new(AssertionRunner::new()))
        .with_parallel(settings.parallel)
        .run(scenarios)
        .await
}
