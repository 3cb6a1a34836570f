//! apicheck Domain - Core types
//!
//! This crate defines the domain model for the apicheck smoke test runner:
//! requests, captured responses, assertions, scenarios and reports.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod json_path;
pub mod report;
pub mod request;
pub mod response;
pub mod scenario;
pub mod settings;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use json_path::{JsonPath, PathSegment};
pub use report::{NetworkErrorKind, ScenarioFailure, ScenarioOutcome, ScenarioReport, SuiteReport};
pub use scenario::Scenario;
pub use settings::{ReportFormat, RunnerSettings};
pub use testing::{Assertion, ComparisonOperator};
