//! JSON path expressions.
//!
//! Two spellings are accepted and mean the same thing:
//!
//! - rooted: `$`, `$.user.id`, `$.items[0].id`, `$.items.size()`
//! - bare: `userId`, `[0].userId`, `size()`, `items.size()`
//!
//! Array indices may be negative to count from the end (`[-1]` is the last
//! element). `size()` is only valid as the final segment.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::error::{DomainError, DomainResult};

/// One step of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object member lookup.
    Field(String),
    /// Array element lookup.
    Index(isize),
    /// Length of the current array, object, or string.
    Size,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(idx) => write!(f, "[{idx}]"),
            Self::Size => f.write_str("size()"),
        }
    }
}

/// Why a parsed path could not be resolved against a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A segment did not exist in the document.
    #[error("'{segment}' not found")]
    Missing {
        /// The segment that failed to resolve.
        segment: String,
    },
    /// `size()` was applied to a scalar.
    #[error("size() is not defined for {kind}")]
    NotACollection {
        /// JSON type of the value `size()` was applied to.
        kind: &'static str,
    },
}

/// A parsed JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Parses a path expression.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidJsonPath` for empty segments, unclosed or
    /// non-numeric brackets, unknown functions, or `size()` not in last position.
    pub fn parse(expr: &str) -> DomainResult<Self> {
        let raw = expr.trim();
        let invalid = |reason: String| DomainError::InvalidJsonPath {
            path: raw.to_string(),
            reason,
        };

        let body = raw.strip_prefix('$').unwrap_or(raw);
        let chars: Vec<char> = body.chars().collect();
        let mut segments = Vec::new();
        let mut after_dot = false;
        // A field name may start a bare path or follow a '.', nothing else.
        let mut name_allowed = body.len() == raw.len();
        let mut i = 0;

        while i < chars.len() {
            if segments.last() == Some(&PathSegment::Size) {
                return Err(invalid("size() must be the last segment".to_string()));
            }
            match chars[i] {
                '.' => {
                    if after_dot {
                        return Err(invalid("empty segment".to_string()));
                    }
                    after_dot = true;
                    name_allowed = true;
                    i += 1;
                }
                '[' => {
                    let close = chars[i + 1..]
                        .iter()
                        .position(|c| *c == ']')
                        .ok_or_else(|| invalid("unclosed '['".to_string()))?;
                    let inner: String = chars[i + 1..i + 1 + close].iter().collect();
                    segments.push(parse_bracket(inner.trim()).map_err(invalid)?);
                    after_dot = false;
                    name_allowed = false;
                    i += close + 2;
                }
                c if !name_allowed => {
                    return Err(invalid(format!("expected '.' or '[' before '{c}'")));
                }
                _ => {
                    let start = i;
                    while i < chars.len() && chars[i] != '.' && chars[i] != '[' {
                        i += 1;
                    }
                    let name: String = chars[start..i].iter().collect();
                    segments.push(parse_name(&name).map_err(invalid)?);
                    after_dot = false;
                    name_allowed = false;
                }
            }
        }

        if after_dot && body != "." {
            return Err(invalid("trailing '.'".to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Resolves the path against a document.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError` if a segment is absent or `size()` hits a scalar.
    pub fn resolve(&self, root: &Value) -> Result<Value, ResolveError> {
        let mut current = root;
        for segment in &self.segments {
            let next = match segment {
                PathSegment::Field(name) => current.get(name.as_str()),
                PathSegment::Index(idx) => current
                    .as_array()
                    .and_then(|items| element_index(items.len(), *idx).and_then(|i| items.get(i))),
                PathSegment::Size => {
                    return size_of(current)
                        .map(Value::from)
                        .ok_or(ResolveError::NotACollection {
                            kind: type_name(current),
                        });
                }
            };
            current = next.ok_or_else(|| ResolveError::Missing {
                segment: segment.to_string(),
            })?;
        }
        Ok(current.clone())
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw.is_empty() {
            f.write_str("$")
        } else {
            f.write_str(&self.raw)
        }
    }
}

/// Number of elements of an array, members of an object, or chars of a string.
#[must_use]
pub fn size_of(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(members) => Some(members.len()),
        Value::String(s) => Some(s.chars().count()),
        Value::Null | Value::Bool(_) | Value::Number(_) => None,
    }
}

/// JSON type name for diagnostics.
#[must_use]
pub const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_name(name: &str) -> Result<PathSegment, String> {
    if name == "size()" {
        return Ok(PathSegment::Size);
    }
    if name.contains('(') || name.contains(')') {
        return Err(format!("unsupported function '{name}'"));
    }
    if name == "*" {
        return Err("wildcards are not supported".to_string());
    }
    Ok(PathSegment::Field(name.to_string()))
}

fn parse_bracket(inner: &str) -> Result<PathSegment, String> {
    for quote in ['\'', '"'] {
        if let Some(name) = inner
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return Ok(PathSegment::Field(name.to_string()));
        }
    }
    inner
        .parse::<isize>()
        .map(PathSegment::Index)
        .map_err(|_| format!("invalid array index '{inner}'"))
}

fn element_index(len: usize, idx: isize) -> Option<usize> {
    if idx >= 0 {
        Some(idx.unsigned_abs())
    } else {
        len.checked_sub(idx.unsigned_abs())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn resolve(path: &str, doc: &Value) -> Result<Value, ResolveError> {
        JsonPath::parse(path).unwrap().resolve(doc)
    }

    #[test]
    fn rooted_and_bare_spellings_agree() {
        let doc = json!({"user": {"id": 7, "tags": ["a", "b"]}});
        assert_eq!(resolve("$.user.id", &doc), Ok(json!(7)));
        assert_eq!(resolve("user.id", &doc), Ok(json!(7)));
        assert_eq!(resolve("$.user.tags[1]", &doc), Ok(json!("b")));
        assert_eq!(resolve("user.tags[1]", &doc), Ok(json!("b")));
    }

    #[test]
    fn root_paths() {
        let doc = json!([1, 2, 3]);
        for path in ["", "$", "$."] {
            let parsed = JsonPath::parse(path).unwrap();
            assert!(parsed.segments().is_empty(), "{path}");
            assert_eq!(parsed.resolve(&doc), Ok(doc.clone()));
        }
    }

    #[test]
    fn leading_index_on_array_document() {
        let doc = json!([{"userId": 1}, {"userId": 2}]);
        assert_eq!(resolve("[0].userId", &doc), Ok(json!(1)));
        assert_eq!(resolve("$[1].userId", &doc), Ok(json!(2)));
        assert_eq!(resolve("[-1].userId", &doc), Ok(json!(2)));
        assert_eq!(resolve("$[0]['userId']", &doc), Ok(json!(1)));
        assert_eq!(
            resolve("[5].userId", &doc),
            Err(ResolveError::Missing {
                segment: "[5]".to_string()
            })
        );
        assert!(resolve("[-3]", &doc).is_err());
    }

    #[test]
    fn quoted_bracket_field() {
        let doc = json!({"content-type": "json"});
        assert_eq!(resolve("$['content-type']", &doc), Ok(json!("json")));
    }

    #[test]
    fn size_function() {
        let doc = json!({"items": [1, 2, 3], "name": "héllo", "n": 4});
        assert_eq!(resolve("items.size()", &doc), Ok(json!(3)));
        assert_eq!(resolve("$.name.size()", &doc), Ok(json!(5)));
        assert_eq!(resolve("size()", &doc), Ok(json!(3)));
        assert_eq!(
            resolve("n.size()", &doc),
            Err(ResolveError::NotACollection { kind: "number" })
        );
    }

    #[test]
    fn missing_field_names_the_segment() {
        let doc = json!({"user": {}});
        assert_eq!(
            resolve("$.user.email", &doc),
            Err(ResolveError::Missing {
                segment: "email".to_string()
            })
        );
    }

    #[test]
    fn malformed_paths_are_rejected() {
        for path in [
            "a..b",
            "a.",
            "items[0",
            "items[x]",
            "size().id",
            "count()",
            "$.*",
            "items[0]id",
            "$foo",
            "$size()",
        ] {
            assert!(
                matches!(
                    JsonPath::parse(path),
                    Err(DomainError::InvalidJsonPath { .. })
                ),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn display_uses_text_as_written() {
        assert_eq!(JsonPath::parse("[0].userId").unwrap().to_string(), "[0].userId");
        assert_eq!(JsonPath::parse("").unwrap().to_string(), "$");
    }
}
