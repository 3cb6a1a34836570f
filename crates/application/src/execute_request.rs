//! Execute Request Use Case
//!
//! Sends one request through the `HttpClient` port and returns the captured
//! response or a categorised error.

use std::sync::Arc;
use std::time::Duration;

use apicheck_domain::{
    NetworkErrorKind, ScenarioFailure, request::RequestSpec, response::ResponseSpec,
};
use thiserror::Error;
use tracing::debug;

use crate::ports::{HttpClient, HttpClientError};

/// Result type for request execution.
pub type ExecuteResult = Result<ResponseSpec, ExecuteRequestError>;

/// Error type for the execute request use case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteRequestError {
    /// URL is empty.
    #[error("URL is required")]
    EmptyUrl,

    /// URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed.
    #[error("{0}")]
    HttpError(#[from] HttpClientError),
}

impl ExecuteRequestError {
    /// Converts this error into a scenario failure for the report.
    #[must_use]
    pub fn to_failure(&self) -> ScenarioFailure {
        let kind = match self {
            Self::EmptyUrl | Self::InvalidUrl(_) => NetworkErrorKind::InvalidUrl,
            Self::HttpError(e) => e.to_error_kind(),
        };
        ScenarioFailure::Network {
            kind,
            message: self.to_string(),
        }
    }
}

/// Use case for executing a single HTTP request.
///
/// Every call to [`ExecuteRequest::execute`] results in at most one call to
/// the underlying client. Nothing is cached between calls.
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> Clone for ExecuteRequest<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Creates a new `ExecuteRequest` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Executes the request and returns the result.
    ///
    /// The request's `timeout_ms` bounds the whole exchange even if the
    /// client adapter applies no timeout of its own.
    ///
    /// # Errors
    ///
    /// Returns `ExecuteRequestError` on validation or HTTP failures.
    pub async fn execute(&self, request: &RequestSpec) -> ExecuteResult {
        Self::validate(request)?;

        debug!(method = %request.method, url = %request.url, "sending request");

        let timeout = Duration::from_millis(request.timeout_ms);
        let response = tokio::time::timeout(timeout, self.client.execute(request))
            .await
            .map_err(|_| HttpClientError::Timeout {
                timeout_ms: request.timeout_ms,
            })??;

        debug!(
            status = response.status,
            duration_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
            "response received"
        );

        Ok(response)
    }

    fn validate(request: &RequestSpec) -> Result<(), ExecuteRequestError> {
        if request.url.trim().is_empty() {
            return Err(ExecuteRequestError::EmptyUrl);
        }

        request
            .parse_url()
            .map_err(|e| ExecuteRequestError::InvalidUrl(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HttpFuture;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock HTTP client for testing.
    struct MockHttpClient {
        response: Result<ResponseSpec, HttpClientError>,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl MockHttpClient {
        fn success() -> Self {
            Self {
                response: Ok(ResponseSpec::new(
                    200,
                    HashMap::new(),
                    b"OK".to_vec(),
                    Duration::from_millis(50),
                )),
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn error(err: HttpClientError) -> Self {
            Self {
                response: Err(err),
                ..Self::success()
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::success()
            }
        }
    }

    impl HttpClient for MockHttpClient {
        fn execute(&self, _request: &RequestSpec) -> HttpFuture<'_> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = self.response.clone();
            let delay = self.delay;
            Box::pin(async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                result
            })
        }
    }

    #[tokio::test]
    async fn test_execute_success() {
        let client = Arc::new(MockHttpClient::success());
        let use_case = ExecuteRequest::new(Arc::clone(&client));

        let request = RequestSpec::get("https://api.example.com/test");
        let response = use_case.execute(&request).await.expect("should be ok");

        assert_eq!(response.status, 200);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_each_execution_hits_the_client() {
        let client = Arc::new(MockHttpClient::success());
        let use_case = ExecuteRequest::new(Arc::clone(&client));
        let request = RequestSpec::get("https://api.example.com/test");

        let _ = use_case.execute(&request).await;
        let _ = use_case.execute(&request).await;

        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_execute_empty_url() {
        let client = Arc::new(MockHttpClient::success());
        let use_case = ExecuteRequest::new(Arc::clone(&client));

        let result = use_case.execute(&RequestSpec::get("  ")).await;

        assert!(matches!(result, Err(ExecuteRequestError::EmptyUrl)));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_execute_invalid_url() {
        let client = Arc::new(MockHttpClient::success());
        let use_case = ExecuteRequest::new(client);

        let result = use_case.execute(&RequestSpec::get("not-a-valid-url")).await;

        assert!(matches!(result, Err(ExecuteRequestError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_execute_http_error() {
        let client = Arc::new(MockHttpClient::error(HttpClientError::Timeout {
            timeout_ms: 5000,
        }));
        let use_case = ExecuteRequest::new(client);

        let request = RequestSpec::get("https://api.example.com/test");
        let result = use_case.execute(&request).await;

        assert!(matches!(
            result,
            Err(ExecuteRequestError::HttpError(HttpClientError::Timeout { .. }))
        ));
    }

    #[tokio::test]
    async fn test_outer_timeout_bounds_slow_client() {
        let client = Arc::new(MockHttpClient::slow(Duration::from_secs(5)));
        let use_case = ExecuteRequest::new(client);

        let request = RequestSpec::get("https://api.example.com/slow").with_timeout_ms(20);
        let result = use_case.execute(&request).await;

        assert_eq!(
            result,
            Err(ExecuteRequestError::HttpError(HttpClientError::Timeout {
                timeout_ms: 20
            }))
        );
    }

    #[test]
    fn test_error_to_failure() {
        let failure = ExecuteRequestError::HttpError(HttpClientError::ConnectionFailed(
            "reset".to_string(),
        ))
        .to_failure();

        assert_eq!(
            failure,
            ScenarioFailure::Network {
                kind: NetworkErrorKind::ConnectionFailed,
                message: "connection failed: reset".to_string(),
            }
        );
        assert!(matches!(
            ExecuteRequestError::EmptyUrl.to_failure(),
            ScenarioFailure::Network {
                kind: NetworkErrorKind::InvalidUrl,
                ..
            }
        ));
    }
}
