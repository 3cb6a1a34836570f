//! Scenario definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::request::{HttpMethod, RequestBody, RequestSpec};
use crate::testing::Assertion;

/// One declared request plus the assertions to check against its response.
///
/// Scenarios are built once when the suite is authored and only read after
/// that; the runner never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Unique identifier.
    #[serde(default = "generate_id")]
    pub id: Uuid,
    /// Scenario name, used in reports.
    pub name: String,
    /// The request to issue.
    pub request: RequestSpec,
    /// Assertions, evaluated in order.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
}

fn generate_id() -> Uuid {
    Uuid::now_v7()
}

impl Scenario {
    /// Creates a scenario with no assertions.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestSpec) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            request,
            assertions: Vec::new(),
        }
    }

    /// Creates a GET scenario.
    #[must_use]
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, RequestSpec::get(url))
    }

    /// Creates a POST scenario sending `body` as `application/json`.
    #[must_use]
    pub fn post_json(
        name: impl Into<String>,
        url: impl Into<String>,
        body: &serde_json::Value,
    ) -> Self {
        let request = RequestSpec::post(url)
            .with_header("Content-Type", "application/json")
            .with_body(RequestBody::json_value(body));
        Self::new(name, request)
    }

    /// Adds an assertion (builder pattern).
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Overrides the request timeout (builder pattern).
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request.timeout_ms = timeout_ms;
        self
    }

    /// Returns the request method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.request.method
    }

    /// Returns the target URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.request.url
    }
}
