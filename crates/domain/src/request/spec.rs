//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;

use super::{Header, Headers, HttpMethod, RequestBody};
use crate::error::{DomainError, DomainResult};

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Complete specification for one outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: String,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
    /// Timeout for the whole exchange, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl RequestSpec {
    /// Creates a request with the given method and URL.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: RequestBody::None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Adds a header (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(Header::new(name, value));
        self
    }

    /// Sets the body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets the timeout (builder pattern).
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Parses and validates the URL.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the URL is malformed or is not http(s).
    pub fn parse_url(&self) -> DomainResult<Url> {
        let url = Url::parse(self.url.trim())
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.url)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(DomainError::InvalidUrl(format!(
                "unsupported scheme '{other}': {}",
                self.url
            ))),
        }
    }
}
