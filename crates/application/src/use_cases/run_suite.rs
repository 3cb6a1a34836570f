//! Run suite use case.

use std::sync::Arc;
use std::time::Instant;

use apicheck_domain::{
    NetworkErrorKind, Scenario, ScenarioFailure, ScenarioOutcome, ScenarioReport, SuiteReport,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::execute_request::ExecuteRequest;
use crate::ports::{HttpClient, ResponseEvaluator};

/// Use case that runs every scenario of a suite and collects a report.
///
/// A failing scenario never stops the run; every declared scenario gets a
/// report entry, in declaration order.
pub struct RunSuite<C: HttpClient, E: ResponseEvaluator> {
    execute: ExecuteRequest<C>,
    evaluator: Arc<E>,
    parallel: bool,
}

impl<C, E> RunSuite<C, E>
where
    C: HttpClient + 'static,
    E: ResponseEvaluator + 'static,
{
    /// Creates a sequential runner.
    pub const fn new(client: Arc<C>, evaluator: Arc<E>) -> Self {
        Self {
            execute: ExecuteRequest::new(client),
            evaluator,
            parallel: false,
        }
    }

    /// Sets whether scenarios run concurrently.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Runs all scenarios and returns the suite report.
    pub async fn run(&self, scenarios: &[Scenario]) -> SuiteReport {
        let started_at = Utc::now();
        let start = Instant::now();

        info!(
            scenarios = scenarios.len(),
            parallel = self.parallel,
            "running suite"
        );

        let reports = if self.parallel {
            self.run_parallel(scenarios).await
        } else {
            let mut reports = Vec::with_capacity(scenarios.len());
            for scenario in scenarios {
                reports.push(self.run_scenario(scenario).await);
            }
            reports
        };

        let report = SuiteReport::new(started_at, reports, elapsed_ms(start));
        info!(
            passed = report.passed,
            failed = report.failed,
            duration_ms = report.duration_ms,
            "suite finished"
        );
        report
    }

    /// Runs a single scenario: one request, then its assertions.
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioReport {
        run_one(&self.execute, self.evaluator.as_ref(), scenario).await
    }

    async fn run_parallel(&self, scenarios: &[Scenario]) -> Vec<ScenarioReport> {
        let handles: Vec<_> = scenarios
            .iter()
            .map(|scenario| {
                let execute = self.execute.clone();
                let evaluator = Arc::clone(&self.evaluator);
                let scenario = scenario.clone();
                tokio::spawn(async move { run_one(&execute, evaluator.as_ref(), &scenario).await })
            })
            .collect();

        let mut reports = Vec::with_capacity(handles.len());
        for (scenario, handle) in scenarios.iter().zip(handles) {
            let report = match handle.await {
                Ok(report) => report,
                Err(e) => {
                    warn!(scenario = %scenario.name, error = %e, "scenario task did not complete");
                    let failure = ScenarioFailure::Network {
                        kind: NetworkErrorKind::Unknown,
                        message: format!("scenario task did not complete: {e}"),
                    };
                    ScenarioReport::new(scenario, None, ScenarioOutcome::Failed { failure }, 0)
                }
            };
            reports.push(report);
        }
        reports
    }
}

async fn run_one<C: HttpClient, E: ResponseEvaluator + ?Sized>(
    execute: &ExecuteRequest<C>,
    evaluator: &E,
    scenario: &Scenario,
) -> ScenarioReport {
    let start = Instant::now();

    let (status, outcome) = match execute.execute(&scenario.request).await {
        Ok(response) => {
            let outcome = match evaluator.evaluate(&scenario.assertions, &response) {
                Ok(()) => ScenarioOutcome::Passed,
                Err(failure) => ScenarioOutcome::Failed { failure },
            };
            (Some(response.status), outcome)
        }
        Err(e) => (None, ScenarioOutcome::Failed { failure: e.to_failure() }),
    };

    let report = ScenarioReport::new(scenario, status, outcome, elapsed_ms(start));
    match report.failure() {
        None => info!(scenario = %report.name, duration_ms = report.duration_ms, "passed"),
        Some(failure) => warn!(scenario = %report.name, %failure, "failed"),
    }
    report
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{HttpClientError, HttpFuture};
    use apicheck_domain::request::RequestSpec;
    use apicheck_domain::response::ResponseSpec;
    use apicheck_domain::testing::Assertion;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Answers by URL and records every request it sees.
    struct ScriptedClient {
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().map(|s| s.clone()).unwrap_or_default()
        }
    }

    impl HttpClient for ScriptedClient {
        fn execute(&self, request: &RequestSpec) -> HttpFuture<'_> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(request.url.clone());
            }
            let url = request.url.clone();
            Box::pin(async move {
                if url.contains("down") {
                    return Err(HttpClientError::ConnectionRefused {
                        host: "down.test".to_string(),
                        port: 443,
                    });
                }
                let status = if url.ends_with("/missing") { 404 } else { 200 };
                Ok(ResponseSpec::new(
                    status,
                    HashMap::new(),
                    b"{}".to_vec(),
                    Duration::from_millis(1),
                ))
            })
        }
    }

    /// Checks status assertions only.
    struct StatusOnly;

    impl ResponseEvaluator for StatusOnly {
        fn evaluate(
            &self,
            assertions: &[Assertion],
            response: &ResponseSpec,
        ) -> Result<(), ScenarioFailure> {
            for assertion in assertions {
                if let Assertion::StatusCode { expected } = assertion
                    && *expected != response.status
                {
                    return Err(ScenarioFailure::Assertion {
                        assertion: assertion.description(),
                        expected: expected.to_string(),
                        actual: response.status.to_string(),
                    });
                }
            }
            Ok(())
        }
    }

    fn suite() -> Vec<Scenario> {
        vec![
            Scenario::get("ok", "https://api.test/ok").with_assertion(Assertion::status(200)),
            Scenario::get("unreachable", "https://down.test/").with_assertion(Assertion::status(200)),
            Scenario::get("missing", "https://api.test/missing")
                .with_assertion(Assertion::status(200)),
            Scenario::get("after failures", "https://api.test/last")
                .with_assertion(Assertion::status(200)),
        ]
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_run() {
        let client = Arc::new(ScriptedClient::new());
        let runner = RunSuite::new(Arc::clone(&client), Arc::new(StatusOnly));

        let report = runner.run(&suite()).await;

        assert_eq!(report.total, 4);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 2);

        let labels: Vec<_> = report
            .scenarios
            .iter()
            .map(|s| s.failure().map(ScenarioFailure::label))
            .collect();
        assert_eq!(
            labels,
            vec![None, Some("NetworkError"), Some("AssertionFailure"), None]
        );
        assert_eq!(report.scenarios[1].status, None);
        assert_eq!(report.scenarios[2].status, Some(404));
    }

    #[tokio::test]
    async fn test_one_request_per_scenario_per_run() {
        let client = Arc::new(ScriptedClient::new());
        let runner = RunSuite::new(Arc::clone(&client), Arc::new(StatusOnly));
        let scenarios = suite();

        runner.run(&scenarios).await;
        assert_eq!(client.seen().len(), 4);

        runner.run(&scenarios).await;
        assert_eq!(client.seen().len(), 8);
    }

    #[tokio::test]
    async fn test_parallel_keeps_declaration_order() {
        let client = Arc::new(ScriptedClient::new());
        let runner = RunSuite::new(Arc::clone(&client), Arc::new(StatusOnly)).with_parallel(true);
        let scenarios = suite();

        let report = runner.run(&scenarios).await;

        let names: Vec<_> = report.scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["ok", "unreachable", "missing", "after failures"]);
        assert_eq!(report.failed, 2);
        assert_eq!(client.seen().len(), 4);
    }

    #[tokio::test]
    async fn test_invalid_url_is_reported_not_sent() {
        let client = Arc::new(ScriptedClient::new());
        let runner = RunSuite::new(Arc::clone(&client), Arc::new(StatusOnly));

        let report = runner
            .run_scenario(&Scenario::get("bad", "mailto:someone"))
            .await;

        assert!(matches!(
            report.failure(),
            Some(ScenarioFailure::Network {
                kind: NetworkErrorKind::InvalidUrl,
                ..
            })
        ));
        assert!(client.seen().is_empty());
    }
}
