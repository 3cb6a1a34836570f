//! Response specification type
//!
//! A response captured from a single exchange: status, headers, body and
//! timing. Assertions are always evaluated against one of these.

use std::collections::HashMap;
use std::time::Duration;

/// HTTP response captured by the runner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Response headers. Lookups go through [`ResponseSpec::get_header`].
    pub headers: HashMap<String, String>,
    /// Response body decoded as (lossy) UTF-8, for display only.
    pub body: String,
    /// Response body exactly as received.
    pub body_bytes: Vec<u8>,
    /// Time from sending the request to reading the full body.
    pub duration: Duration,
}

impl ResponseSpec {
    /// Creates a new `ResponseSpec` from raw response data.
    #[must_use]
    pub fn new(
        status: u16,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        Self {
            status,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
            body_bytes: body,
            duration,
        }
    }

    /// Parses the raw body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the parser error when the body is not valid JSON, including
    /// bodies that are not valid UTF-8.
    pub fn body_as_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body_bytes)
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
