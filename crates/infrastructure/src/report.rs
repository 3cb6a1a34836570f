//! Suite report rendering.

use std::fmt::Write as _;

use apicheck_domain::{ReportFormat, ScenarioFailure, ScenarioReport, SuiteReport};

/// Renders `report` in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_report(report: &SuiteReport, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => serde_json::to_string_pretty(report),
    }
}

/// Renders a human-readable report: one line per scenario, diagnostics
/// indented under failures, then a summary line.
#[must_use]
pub fn render_text(report: &SuiteReport) -> String {
    let mut out = String::new();

    for scenario in &report.scenarios {
        write_scenario(&mut out, scenario);
    }

    let _ = writeln!(
        out,
        "\n{} passed, {} failed, {} total ({:.1}%) in {} ms",
        report.passed,
        report.failed,
        report.total,
        report.pass_rate(),
        report.duration_ms
    );
    out
}

fn write_scenario(out: &mut String, scenario: &ScenarioReport) {
    let verdict = if scenario.passed() { "PASS" } else { "FAIL" };
    let status = scenario
        .status
        .map_or_else(|| "no response".to_string(), |s| s.to_string());

    let _ = writeln!(
        out,
        "{verdict}  {}  {} {}  [{status}, {} ms]",
        scenario.name, scenario.method, scenario.url, scenario.duration_ms
    );

    let Some(failure) = scenario.failure() else {
        return;
    };

    match failure {
        ScenarioFailure::Network { kind, message } => {
            let _ = writeln!(out, "      {}: {}", failure.label(), kind.title());
            let _ = writeln!(out, "        {message}");
        }
        ScenarioFailure::Assertion {
            assertion,
            expected,
            actual,
        } => {
            let _ = writeln!(out, "      {}: {assertion}", failure.label());
            let _ = writeln!(out, "        expected: {expected}");
            let _ = writeln!(out, "        actual:   {actual}");
        }
        ScenarioFailure::Parse { assertion, message }
        | ScenarioFailure::InvalidAssertion { assertion, message } => {
            let _ = writeln!(out, "      {}: {assertion}", failure.label());
            let _ = writeln!(out, "        {message}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use apicheck_domain::{NetworkErrorKind, Scenario, ScenarioOutcome};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn sample() -> SuiteReport {
        let ok = Scenario::get("github root", "https://api.github.com");
        let wrong = Scenario::get("wrong user", "https://jsonplaceholder.typicode.com/posts/1");
        let down = Scenario::get("down", "https://down.invalid/");

        SuiteReport::new(
            Utc::now(),
            vec![
                ScenarioReport::new(&ok, Some(200), ScenarioOutcome::Passed, 12),
                ScenarioReport::new(
                    &wrong,
                    Some(200),
                    ScenarioOutcome::Failed {
                        failure: ScenarioFailure::Assertion {
                            assertion: "JSON userId == 2".to_string(),
                            expected: "2".to_string(),
                            actual: "1".to_string(),
                        },
                    },
                    30,
                ),
                ScenarioReport::new(
                    &down,
                    None,
                    ScenarioOutcome::Failed {
                        failure: ScenarioFailure::Network {
                            kind: NetworkErrorKind::DnsError,
                            message: "could not resolve host 'down.invalid'".to_string(),
                        },
                    },
                    5,
                ),
            ],
            50,
        )
    }

    #[test]
    fn test_text_report() {
        let text = render_text(&sample());
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines[0],
            "PASS  github root  GET https://api.github.com  [200, 12 ms]"
        );
        assert_eq!(
            lines[1],
            "FAIL  wrong user  GET https://jsonplaceholder.typicode.com/posts/1  [200, 30 ms]"
        );
        assert_eq!(lines[2], "      AssertionFailure: JSON userId == 2");
        assert_eq!(lines[3], "        expected: 2");
        assert_eq!(lines[4], "        actual:   1");
        assert_eq!(
            lines[5],
            "FAIL  down  GET https://down.invalid/  [no response, 5 ms]"
        );
        assert_eq!(lines[6], "      NetworkError: DNS Resolution Failed");
        assert_eq!(
            text.lines().last(),
            Some("1 passed, 2 failed, 3 total (33.3%) in 50 ms")
        );
    }

    #[test]
    fn test_json_report() {
        let json = render_report(&sample(), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total"], 3);
        assert_eq!(value["scenarios"][1]["outcome"]["status"], "failed");
        assert_eq!(
            value["scenarios"][1]["outcome"]["failure"]["actual"],
            "1"
        );
    }
}
