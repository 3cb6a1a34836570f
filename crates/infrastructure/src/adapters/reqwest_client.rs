//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library
//! and performs real network I/O.

use std::collections::HashMap;
use std::error::Error as _;
use std::time::{Duration, Instant};

use apicheck_application::ports::{HttpClient, HttpClientError, HttpFuture};
use apicheck_domain::{
    RunnerSettings,
    request::{HttpMethod, RequestBody, RequestSpec},
    response::ResponseSpec,
};
use reqwest::{Client, Method};
use tracing::trace;

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "apicheck/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::from_settings(&RunnerSettings::default())
    }

    /// Creates a client using the user agent from `settings`.
    ///
    /// Timeouts are applied per request from `RequestSpec::timeout_ms`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn from_settings(settings: &RunnerSettings) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
        }
    }

    /// Attaches the request body, rejecting malformed JSON before it is sent.
    fn build_body(
        builder: reqwest::RequestBuilder,
        body: &RequestBody,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        match body {
            RequestBody::None => Ok(builder),
            RequestBody::Raw { content, .. } => {
                if body.is_json() && !content.is_empty() {
                    let _: serde_json::Value = serde_json::from_str(content)
                        .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
                }
                Ok(builder.body(content.clone()))
            }
        }
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let message = error_chain(error);
        let lower = message.to_lowercase();
        let host = error
            .url()
            .and_then(|u| u.host_str().map(ToString::to_string))
            .unwrap_or_else(|| "unknown".to_string());

        if error.is_connect() {
            if lower.contains("dns") || lower.contains("resolve") || lower.contains("lookup") {
                return HttpClientError::DnsError { host, message };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                    host,
                };
            }
            if lower.contains("certificate") || lower.contains("tls") {
                return HttpClientError::TlsError(message);
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(message)
    }
}

/// Joins an error with all of its sources, since reqwest keeps the useful
/// detail (resolver or socket error) in the chain.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_> {
        let method = request.method;
        let url = request.parse_url();
        let headers = request.headers.clone();
        let body = request.body.clone();
        let timeout_ms = request.timeout_ms;

        Box::pin(async move {
            let url = url.map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;

            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(method), url)
                .timeout(Duration::from_millis(timeout_ms));

            for header in headers.iter() {
                builder = builder.header(&header.name, &header.value);
            }

            if let Some(content_type) = body.content_type()
                && !headers.contains("content-type")
            {
                builder = builder.header("Content-Type", content_type);
            }

            builder = Self::build_body(builder, &body)?;

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status().as_u16();

            let mut response_headers: HashMap<String, String> = HashMap::new();
            for (name, value) in response.headers() {
                let value = value.to_str().unwrap_or("<binary>");
                response_headers
                    .entry(name.to_string())
                    .and_modify(|existing| {
                        existing.push_str(", ");
                        existing.push_str(value);
                    })
                    .or_insert_with(|| value.to_string());
            }

            let body_bytes = response
                .bytes()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?
                .to_vec();

            let duration = start.elapsed();
            trace!(status, bytes = body_bytes.len(), "body read");

            Ok(ResponseSpec::new(
                status,
                response_headers,
                body_bytes,
                duration,
            ))
        })
    }
}
