//! Runner settings loading.
//!
//! Settings start from `RunnerSettings::default()` and are overridden by
//! environment variables:
//!
//! | Variable | Field |
//! |---|---|
//! | `APICHECK_TIMEOUT_MS` | `timeout_ms` |
//! | `APICHECK_USER_AGENT` | `user_agent` |
//! | `APICHECK_PARALLEL` | `parallel` (`true`/`false`/`1`/`0`) |
//! | `APICHECK_FORMAT` | `format` (`text`/`json`) |

use apicheck_domain::{DomainError, ReportFormat, RunnerSettings};
use tracing::debug;

/// Error type for settings loading.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    /// A variable is set but its value cannot be used.
    #[error("invalid value for {name}: '{value}' ({reason})")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

const TIMEOUT_MS: &str = "APICHECK_TIMEOUT_MS";
const USER_AGENT: &str = "APICHECK_USER_AGENT";
const PARALLEL: &str = "APICHECK_PARALLEL";
const FORMAT: &str = "APICHECK_FORMAT";

/// Loads settings from the process environment.
///
/// # Errors
///
/// Returns `SettingsError` if a variable holds an unusable value.
pub fn load_settings() -> Result<RunnerSettings, SettingsError> {
    load_settings_from(|name| std::env::var(name).ok())
}

/// Loads settings using `lookup` to read variables.
///
/// # Errors
///
/// Returns `SettingsError` if a variable holds an unusable value.
pub fn load_settings_from<F>(lookup: F) -> Result<RunnerSettings, SettingsError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = RunnerSettings::default();

    if let Some(value) = lookup(TIMEOUT_MS) {
        settings.timeout_ms = match value.trim().parse::<u64>() {
            Ok(0) => return Err(invalid(TIMEOUT_MS, value, "must be greater than zero")),
            Ok(ms) => ms,
            Err(e) => return Err(invalid(TIMEOUT_MS, value, e.to_string())),
        };
    }

    if let Some(value) = lookup(USER_AGENT) {
        if value.trim().is_empty() {
            return Err(invalid(USER_AGENT, value, "must not be empty"));
        }
        settings.user_agent = value;
    }

    if let Some(value) = lookup(PARALLEL) {
        settings.parallel = match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            _ => return Err(invalid(PARALLEL, value, "expected true or false")),
        };
    }

    if let Some(value) = lookup(FORMAT) {
        settings.format = value
            .parse::<ReportFormat>()
            .map_err(|e: DomainError| invalid(FORMAT, value.clone(), e.to_string()))?;
    }

    debug!(?settings, "settings loaded");
    Ok(settings)
}

fn invalid(name: &'static str, value: String, reason: impl Into<String>) -> SettingsError {
    SettingsError::InvalidValue {
        name,
        value,
        reason: reason.into(),
    }
}
