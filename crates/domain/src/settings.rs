//! Runner settings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::request::DEFAULT_TIMEOUT_MS;

/// How the suite report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One line per scenario plus a summary (default).
    #[default]
    Text,
    /// The full report as pretty-printed JSON.
    Json,
}

impl FromStr for ReportFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(DomainError::UnknownReportFormat(other.to_string())),
        }
    }
}

/// Settings that control a suite run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerSettings {
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Run scenarios concurrently instead of one after another.
    #[serde(default)]
    pub parallel: bool,

    /// Report output format.
    #[serde(default)]
    pub format: ReportFormat,
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_user_agent() -> String {
    format!("apicheck/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            parallel: false,
            format: ReportFormat::default(),
        }
    }
}
