//! Replaying HTTP client.
//!
//! Serves canned responses keyed by method and URL instead of touching the
//! network. Each `execute` call is still counted as one request, so suites
//! behave the same way against it as against the live client.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use apicheck_application::ports::{HttpClient, HttpClientError, HttpFuture};
use apicheck_domain::{
    request::{HttpMethod, RequestSpec},
    response::ResponseSpec,
};

/// A canned response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedResponse {
    /// Status code to return.
    pub status: u16,
    /// Headers to return.
    pub headers: HashMap<String, String>,
    /// Body to return.
    pub body: String,
}

impl RecordedResponse {
    /// A response with an empty body.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    /// A JSON response with `Content-Type: application/json; charset=utf-8`.
    #[must_use]
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status)
            .with_header("Content-Type", "application/json; charset=utf-8")
            .with_body(body.to_string())
    }

    /// Adds a header (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// A request observed by the replaying client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Request method.
    pub method: HttpMethod,
    /// Normalized request URL.
    pub url: String,
    /// Request body text.
    pub body: String,
}

/// `HttpClient` that replays recorded responses.
#[derive(Debug, Default)]
pub struct RecordedHttpClient {
    responses: HashMap<(HttpMethod, String), Result<RecordedResponse, HttpClientError>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordedHttpClient {
    /// Creates an empty client; every request fails until something is recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a response for `method url` (builder pattern).
    #[must_use]
    pub fn with_response(
        mut self,
        method: HttpMethod,
        url: &str,
        response: RecordedResponse,
    ) -> Self {
        self.responses
            .insert((method, normalize_url(url)), Ok(response));
        self
    }

    /// Records a transport error for `method url` (builder pattern).
    #[must_use]
    pub fn with_error(mut self, method: HttpMethod, url: &str, error: HttpClientError) -> Self {
        self.responses.insert((method, normalize_url(url)), Err(error));
        self
    }

    /// Returns every request received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Returns how many requests were received.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

impl HttpClient for RecordedHttpClient {
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_> {
        let url = normalize_url(&request.url);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                method: request.method,
                url: url.clone(),
                body: request.body.content().to_string(),
            });
        }

        let result = match self.responses.get(&(request.method, url.clone())) {
            Some(Ok(recorded)) => Ok(ResponseSpec::new(
                recorded.status,
                recorded.headers.clone(),
                recorded.body.clone().into_bytes(),
                Duration::ZERO,
            )),
            Some(Err(error)) => Err(error.clone()),
            None => Err(HttpClientError::NotRecorded {
                method: request.method.to_string(),
                url,
            }),
        };

        Box::pin(async move { result })
    }
}

/// Canonical form so `https://host` and `https://host/` match.
fn normalize_url(raw: &str) -> String {
    url::Url::parse(raw.trim()).map_or_else(|_| raw.trim().to_string(), |u| u.to_string())
}
