//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A JSON path expression could not be parsed.
    #[error("invalid JSON path '{path}': {reason}")]
    InvalidJsonPath {
        /// The offending expression.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The report format name is not recognised.
    #[error("unknown report format: {0}")]
    UnknownReportFormat(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
