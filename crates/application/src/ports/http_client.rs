//! HTTP client port

use std::future::Future;
use std::pin::Pin;

use apicheck_domain::{NetworkErrorKind, request::RequestSpec, response::ResponseSpec};
use thiserror::Error;

/// Boxed future returned by [`HttpClient::execute`].
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + 'a>>;

/// Port for executing HTTP requests.
///
/// Implementations must send exactly one request per call and must not
/// cache responses between calls.
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the captured response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or an invalid request.
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_>;
}

/// Transport-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body is not valid for its content type.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// No response within the timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// Host name did not resolve.
    #[error("could not resolve host '{host}': {message}")]
    DnsError {
        /// Host name.
        host: String,
        /// Resolver error text.
        message: String,
    },

    /// The server actively refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Host name.
        host: String,
        /// Port.
        port: u16,
    },

    /// Any other connection failure.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// TLS handshake or certificate failure.
    #[error("TLS error: {0}")]
    TlsError(String),

    /// Redirect limit exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// A replaying client had nothing recorded for this request.
    #[error("no recorded response for {method} {url}")]
    NotRecorded {
        /// Request method.
        method: String,
        /// Request URL.
        url: String,
    },

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Maps this error to its report category.
    #[must_use]
    pub const fn to_error_kind(&self) -> NetworkErrorKind {
        match self {
            Self::InvalidUrl(_) => NetworkErrorKind::InvalidUrl,
            Self::InvalidBody(_) => NetworkErrorKind::InvalidBody,
            Self::Timeout { .. } => NetworkErrorKind::Timeout,
            Self::DnsError { .. } => NetworkErrorKind::DnsError,
            Self::ConnectionRefused { .. } => NetworkErrorKind::ConnectionRefused,
            Self::ConnectionFailed(_) => NetworkErrorKind::ConnectionFailed,
            Self::TlsError(_) => NetworkErrorKind::TlsError,
            Self::TooManyRedirects { .. } => NetworkErrorKind::TooManyRedirects,
            Self::NotRecorded { .. } | Self::Other(_) => NetworkErrorKind::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            HttpClientError::Timeout { timeout_ms: 10 }.to_error_kind(),
            NetworkErrorKind::Timeout
        );
        assert_eq!(
            HttpClientError::DnsError {
                host: "nope.invalid".to_string(),
                message: "failed to lookup".to_string(),
            }
            .to_error_kind(),
            NetworkErrorKind::DnsError
        );
        assert_eq!(
            HttpClientError::Other("boom".to_string()).to_error_kind(),
            NetworkErrorKind::Unknown
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            HttpClientError::ConnectionRefused {
                host: "127.0.0.1".to_string(),
                port: 9,
            }
            .to_string(),
            "connection refused by 127.0.0.1:9"
        );
    }
}
