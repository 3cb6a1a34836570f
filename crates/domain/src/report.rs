//! Scenario and suite reports.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::request::HttpMethod;
use crate::scenario::Scenario;

/// Categories of transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkErrorKind {
    /// Invalid URL format.
    InvalidUrl,
    /// DNS resolution failed.
    DnsError,
    /// Could not establish connection.
    ConnectionFailed,
    /// Connection was refused by the server.
    ConnectionRefused,
    /// Request timed out.
    Timeout,
    /// TLS/SSL error.
    TlsError,
    /// Invalid request body (e.g., malformed JSON).
    InvalidBody,
    /// Too many redirects.
    TooManyRedirects,
    /// Unknown or unexpected error.
    Unknown,
}

impl NetworkErrorKind {
    /// Returns a human-readable title for this error type.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "Invalid URL",
            Self::DnsError => "DNS Resolution Failed",
            Self::ConnectionFailed => "Connection Failed",
            Self::ConnectionRefused => "Connection Refused",
            Self::Timeout => "Request Timeout",
            Self::TlsError => "SSL/TLS Error",
            Self::InvalidBody => "Invalid Request Body",
            Self::TooManyRedirects => "Too Many Redirects",
            Self::Unknown => "Unknown Error",
        }
    }
}

/// Why a scenario failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ScenarioFailure {
    /// The request never produced a response.
    Network {
        /// Failure category.
        kind: NetworkErrorKind,
        /// Underlying error text.
        message: String,
    },
    /// An assertion evaluated false.
    Assertion {
        /// Description of the failing assertion.
        assertion: String,
        /// Expected value.
        expected: String,
        /// Value found in the response.
        actual: String,
    },
    /// A JSON assertion was reached but the body is not JSON.
    Parse {
        /// Description of the assertion that needed JSON.
        assertion: String,
        /// Parser error text.
        message: String,
    },
    /// The assertion itself is malformed (e.g. a bad JSON path).
    InvalidAssertion {
        /// Description of the assertion.
        assertion: String,
        /// What is wrong with it.
        message: String,
    },
}

impl ScenarioFailure {
    /// Short label for the failure class.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Network { .. } => "NetworkError",
            Self::Assertion { .. } => "AssertionFailure",
            Self::Parse { .. } => "ParseError",
            Self::InvalidAssertion { .. } => "InvalidAssertion",
        }
    }
}

impl fmt::Display for ScenarioFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network { kind, message } => {
                write!(f, "{}: {} ({message})", self.label(), kind.title())
            }
            Self::Assertion {
                assertion,
                expected,
                actual,
            } => write!(
                f,
                "{}: {assertion}: expected {expected}, actual {actual}",
                self.label()
            ),
            Self::Parse { assertion, message } | Self::InvalidAssertion { assertion, message } => {
                write!(f, "{}: {assertion}: {message}", self.label())
            }
        }
    }
}

/// Pass/fail outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioOutcome {
    /// Every assertion held.
    Passed,
    /// The scenario failed.
    Failed {
        /// The first failure encountered.
        failure: ScenarioFailure,
    },
}

/// Result of running one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario identifier.
    pub scenario_id: Uuid,
    /// Scenario name.
    pub name: String,
    /// Request method.
    pub method: HttpMethod,
    /// Request URL.
    pub url: String,
    /// Status code received, if any response arrived.
    pub status: Option<u16>,
    /// Pass/fail outcome.
    pub outcome: ScenarioOutcome,
    /// Wall time for request and evaluation, in milliseconds.
    pub duration_ms: u64,
}

impl ScenarioReport {
    /// Creates a report for `scenario`.
    #[must_use]
    pub fn new(
        scenario: &Scenario,
        status: Option<u16>,
        outcome: ScenarioOutcome,
        duration_ms: u64,
    ) -> Self {
        Self {
            scenario_id: scenario.id,
            name: scenario.name.clone(),
            method: scenario.method(),
            url: scenario.url().to_string(),
            status,
            outcome,
            duration_ms,
        }
    }

    /// Returns true if the scenario passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.outcome, ScenarioOutcome::Passed)
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&ScenarioFailure> {
        match &self.outcome {
            ScenarioOutcome::Passed => None,
            ScenarioOutcome::Failed { failure } => Some(failure),
        }
    }
}

/// Results from running a whole suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Per-scenario results in declaration order.
    pub scenarios: Vec<ScenarioReport>,
    /// Total number of scenarios.
    pub total: usize,
    /// Number of passed scenarios.
    pub passed: usize,
    /// Number of failed scenarios.
    pub failed: usize,
    /// Wall time for the whole run, in milliseconds.
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Creates a suite report and computes totals.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, scenarios: Vec<ScenarioReport>, duration_ms: u64) -> Self {
        let total = scenarios.len();
        let passed = scenarios.iter().filter(|s| s.passed()).count();

        Self {
            started_at,
            scenarios,
            total,
            passed,
            failed: total - passed,
            duration_ms,
        }
    }

    /// Check if every scenario passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}
