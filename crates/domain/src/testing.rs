//! Response assertions.
//!
//! Declarative predicates over a captured [`ResponseSpec`](crate::response::ResponseSpec).
//! Evaluation lives with the runner; this module only describes them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single check to run against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Response status equals `expected`.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// Header `name` (case-insensitive) equals `expected` exactly.
    Header {
        /// Header name.
        name: String,
        /// Expected value.
        expected: String,
    },
    /// Value at `path` deep-equals `expected`.
    JsonPath {
        /// Path expression, see [`JsonPath`](crate::json_path::JsonPath).
        path: String,
        /// Expected value.
        expected: Value,
    },
    /// Numeric value at `path` compares to `value` with `operator`.
    JsonPathMatches {
        /// Path expression.
        path: String,
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Value to compare against.
        value: Value,
    },
    /// Size of the collection at `path` compares to `bound` with `operator`.
    JsonSize {
        /// Path expression addressing an array, object, or string.
        path: String,
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Bound to compare the size against.
        bound: usize,
    },
}

impl Assertion {
    /// Status code equality.
    #[must_use]
    pub const fn status(expected: u16) -> Self {
        Self::StatusCode { expected }
    }

    /// Header value equality.
    #[must_use]
    pub fn header(name: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::Header {
            name: name.into(),
            expected: expected.into(),
        }
    }

    /// JSON value equality.
    #[must_use]
    pub fn json_eq(path: impl Into<String>, expected: impl Into<Value>) -> Self {
        Self::JsonPath {
            path: path.into(),
            expected: expected.into(),
        }
    }

    /// JSON numeric comparison.
    #[must_use]
    pub fn json_cmp(
        path: impl Into<String>,
        operator: ComparisonOperator,
        value: impl Into<Value>,
    ) -> Self {
        Self::JsonPathMatches {
            path: path.into(),
            operator,
            value: value.into(),
        }
    }

    /// JSON collection size comparison.
    #[must_use]
    pub fn json_size(path: impl Into<String>, operator: ComparisonOperator, bound: usize) -> Self {
        Self::JsonSize {
            path: path.into(),
            operator,
            bound,
        }
    }

    /// Human-readable description, e.g. `JSON userId == 1`.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code == {expected}"),
            Self::Header { name, expected } => format!("Header '{name}' == '{expected}'"),
            Self::JsonPath { path, expected } => format!("JSON {} == {expected}", display_path(path)),
            Self::JsonPathMatches {
                path,
                operator,
                value,
            } => format!("JSON {} {} {value}", display_path(path), operator.symbol()),
            Self::JsonSize {
                path,
                operator,
                bound,
            } => format!("JSON size of {} {} {bound}", display_path(path), operator.symbol()),
        }
    }

    /// The expected side of the assertion, rendered for diagnostics.
    #[must_use]
    pub fn expected_display(&self) -> String {
        match self {
            Self::StatusCode { expected } => expected.to_string(),
            Self::Header { expected, .. } => expected.clone(),
            Self::JsonPath { expected, .. } => expected.to_string(),
            Self::JsonPathMatches {
                operator, value, ..
            } => format!("{} {value}", operator.symbol()),
            Self::JsonSize {
                operator, bound, ..
            } => format!("{} {bound}", operator.symbol()),
        }
    }
}

fn display_path(path: &str) -> &str {
    let trimmed = path.trim();
    if trimmed.is_empty() { "$" } else { trimmed }
}

/// Comparison operators for value and size assertions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    /// Equal to.
    Equals,
    /// Not equal to.
    NotEquals,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal to.
    GreaterThanOrEqual,
    /// Less than.
    LessThan,
    /// Less than or equal to.
    LessThanOrEqual,
}

impl ComparisonOperator {
    /// Get the symbol for this operator.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
        }
    }

    /// Returns whether `actual <op> expected` holds.
    #[must_use]
    pub fn holds<T: PartialOrd>(&self, actual: &T, expected: &T) -> bool {
        match self {
            Self::Equals => actual == expected,
            Self::NotEquals => actual != expected,
            Self::GreaterThan => actual > expected,
            Self::GreaterThanOrEqual => actual >= expected,
            Self::LessThan => actual < expected,
            Self::LessThanOrEqual => actual <= expected,
        }
    }
}

/// Deep JSON equality where numbers compare by value (`1 == 1.0`).
#[must_use]
pub fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                a == b
            } else if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                a == b
            } else {
                a.as_f64() == b.as_f64()
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| b.get(k).is_some_and(|other| values_equal(v, other)))
        }
        _ => actual == expected,
    }
}
