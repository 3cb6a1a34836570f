//! Request body types

use serde::{Deserialize, Serialize};

/// HTTP request body with an optional content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// Raw text body sent verbatim
    Raw {
        /// The content type (e.g., "application/json", "text/plain")
        content_type: String,
        /// The body content
        content: String,
    },
}

impl RequestBody {
    /// Creates a JSON body from already-serialized text.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::Raw {
            content_type: "application/json".to_string(),
            content: content.into(),
        }
    }

    /// Creates a JSON body from a value.
    #[must_use]
    pub fn json_value(value: &serde_json::Value) -> Self {
        Self::json(value.to_string())
    }

    /// Returns the content type if there is a body.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Raw { content_type, .. } => Some(content_type),
        }
    }

    /// Returns the raw content, empty for `None`.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::None => "",
            Self::Raw { content, .. } => content,
        }
    }

    /// Returns true if the content type is JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.contains("application/json") || ct.contains("+json"))
    }
}
