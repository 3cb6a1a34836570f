//! Assertion runner implementation.
//!
//! Evaluates assertions against a captured response, stopping at the first
//! one that does not hold.

use apicheck_application::ports::ResponseEvaluator;
use apicheck_domain::json_path::{self, JsonPath, PathSegment, ResolveError};
use apicheck_domain::testing::{Assertion, ComparisonOperator, values_equal};
use apicheck_domain::{ScenarioFailure, response::ResponseSpec};
use serde_json::Value;

const MISSING: &str = "<missing>";

/// The response body parsed as JSON, computed at most once per response.
#[derive(Debug, Default)]
pub struct ParsedBody {
    json: Option<Result<Value, String>>,
}

impl ParsedBody {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self { json: None }
    }

    fn get<'a>(&'a mut self, response: &ResponseSpec) -> Result<&'a Value, &'a str> {
        self.json
            .get_or_insert_with(|| response.body_as_json().map_err(|e| e.to_string()))
            .as_ref()
            .map_err(String::as_str)
    }
}

/// Evaluates assertions against responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssertionRunner;

impl AssertionRunner {
    /// Create a new assertion runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run a single assertion against a response.
    ///
    /// # Errors
    ///
    /// Returns the failure if the assertion does not hold.
    pub fn run_assertion(
        &self,
        assertion: &Assertion,
        response: &ResponseSpec,
        parsed: &mut ParsedBody,
    ) -> Result<(), ScenarioFailure> {
        match assertion {
            Assertion::StatusCode { expected } => {
                Self::check_status_code(assertion, response, *expected)
            }
            Assertion::Header { name, expected } => {
                Self::check_header(assertion, response, name, expected)
            }
            Assertion::JsonPath { path, expected } => {
                let value = Self::lookup(assertion, response, parsed, path)?;
                Self::check_json_equals(assertion, value, expected)
            }
            Assertion::JsonPathMatches {
                path,
                operator,
                value: expected,
            } => {
                let value = Self::lookup(assertion, response, parsed, path)?;
                Self::check_json_matches(assertion, &value, *operator, expected)
            }
            Assertion::JsonSize {
                path,
                operator,
                bound,
            } => Self::check_json_size(assertion, response, parsed, path, *operator, *bound),
        }
    }

    fn check_status_code(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: u16,
    ) -> Result<(), ScenarioFailure> {
        if response.status == expected {
            Ok(())
        } else {
            Err(mismatch(assertion, response.status.to_string()))
        }
    }

    fn check_header(
        assertion: &Assertion,
        response: &ResponseSpec,
        name: &str,
        expected: &str,
    ) -> Result<(), ScenarioFailure> {
        match response.get_header(name) {
            Some(actual) if actual == expected => Ok(()),
            Some(actual) => Err(mismatch(assertion, actual.to_string())),
            None => Err(mismatch(assertion, MISSING.to_string())),
        }
    }

    fn check_json_equals(
        assertion: &Assertion,
        actual: Value,
        expected: &Value,
    ) -> Result<(), ScenarioFailure> {
        if values_equal(&actual, expected) {
            Ok(())
        } else {
            Err(mismatch(assertion, actual.to_string()))
        }
    }

    fn check_json_matches(
        assertion: &Assertion,
        actual: &Value,
        operator: ComparisonOperator,
        expected: &Value,
    ) -> Result<(), ScenarioFailure> {
        let holds = if let (Some(a), Some(b)) = (as_integer(actual), as_integer(expected)) {
            operator.holds(&a, &b)
        } else if let (Some(a), Some(b)) = (actual.as_f64(), expected.as_f64()) {
            operator.holds(&a, &b)
        } else {
            match operator {
                ComparisonOperator::Equals => values_equal(actual, expected),
                ComparisonOperator::NotEquals => !values_equal(actual, expected),
                _ => false,
            }
        };

        if holds {
            Ok(())
        } else {
            Err(mismatch(assertion, actual.to_string()))
        }
    }

    fn check_json_size(
        assertion: &Assertion,
        response: &ResponseSpec,
        parsed: &mut ParsedBody,
        path: &str,
        operator: ComparisonOperator,
        bound: usize,
    ) -> Result<(), ScenarioFailure> {
        let parsed_path = Self::parse_path(assertion, path)?;
        let value = Self::resolve(assertion, response, parsed, &parsed_path)?;

        // `items.size()` already yields the count.
        let size = if parsed_path.segments().last() == Some(&PathSegment::Size) {
            value.as_u64().and_then(|n| usize::try_from(n).ok())
        } else {
            json_path::size_of(&value)
        };

        match size {
            Some(size) if operator.holds(&size, &bound) => Ok(()),
            Some(size) => Err(mismatch(assertion, size.to_string())),
            None => Err(mismatch(
                assertion,
                format!("<{}>", json_path::type_name(&value)),
            )),
        }
    }

    fn lookup(
        assertion: &Assertion,
        response: &ResponseSpec,
        parsed: &mut ParsedBody,
        path: &str,
    ) -> Result<Value, ScenarioFailure> {
        let parsed_path = Self::parse_path(assertion, path)?;
        Self::resolve(assertion, response, parsed, &parsed_path)
    }

    fn parse_path(assertion: &Assertion, path: &str) -> Result<JsonPath, ScenarioFailure> {
        JsonPath::parse(path).map_err(|e| ScenarioFailure::InvalidAssertion {
            assertion: assertion.description(),
            message: e.to_string(),
        })
    }

    fn resolve(
        assertion: &Assertion,
        response: &ResponseSpec,
        parsed: &mut ParsedBody,
        path: &JsonPath,
    ) -> Result<Value, ScenarioFailure> {
        let json = parsed
            .get(response)
            .map_err(|message| ScenarioFailure::Parse {
                assertion: assertion.description(),
                message: format!("Failed to parse body as JSON: {message}"),
            })?;

        path.resolve(json).map_err(|e| match e {
            ResolveError::Missing { .. } => mismatch(assertion, MISSING.to_string()),
            ResolveError::NotACollection { kind } => mismatch(assertion, format!("<{kind}>")),
        })
    }
}

/// Exact integer value, so large `u64`/`i64` values compare without rounding.
fn as_integer(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

fn mismatch(assertion: &Assertion, actual: String) -> ScenarioFailure {
    ScenarioFailure::Assertion {
        assertion: assertion.description(),
        expected: assertion.expected_display(),
        actual,
    }
}

impl ResponseEvaluator for AssertionRunner {
    fn evaluate(
        &self,
        assertions: &[Assertion],
        response: &ResponseSpec,
    ) -> Result<(), ScenarioFailure> {
        let mut parsed = ParsedBody::new();
        for assertion in assertions {
            self.run_assertion(assertion, response, &mut parsed)?;
        }
        Ok(())
    }
}
