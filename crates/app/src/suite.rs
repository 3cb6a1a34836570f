//! The built-in public API suite.

use apicheck_domain::{Assertion, ComparisonOperator, RunnerSettings, Scenario};
use serde_json::json;

/// Base URL of the GitHub REST API.
pub const GITHUB_API: &str = "https://api.github.com";

/// Base URL of the JSONPlaceholder fake REST API.
pub const JSONPLACEHOLDER: &str = "https://jsonplaceholder.typicode.com";

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Builds the built-in scenarios in declaration order.
#[must_use]
pub fn public_api_suite(settings: &RunnerSettings) -> Vec<Scenario> {
    let posts = format!("{JSONPLACEHOLDER}/posts");

    let scenarios = vec![
        Scenario::get("GitHub API root responds", GITHUB_API)
            .with_assertion(Assertion::status(200)),
        Scenario::get("post 1 belongs to user 1", format!("{JSONPLACEHOLDER}/posts/1"))
            .with_assertion(Assertion::json_eq("userId", 1)),
        Scenario::get("posts are served as UTF-8 JSON", posts.as_str())
            .with_assertion(Assertion::header("Content-Type", JSON_UTF8)),
        Scenario::post_json(
            "creating a post echoes it back",
            posts.as_str(),
            &json!({"title": "foo", "body": "bar", "userId": 1}),
        )
        .with_assertion(Assertion::status(201))
        .with_assertion(Assertion::json_eq("title", "foo"))
        .with_assertion(Assertion::json_eq("body", "bar"))
        .with_assertion(Assertion::json_eq("userId", 1)),
        Scenario::get("comment 5 responds", format!("{JSONPLACEHOLDER}/comments/5"))
            .with_assertion(Assertion::status(200)),
        Scenario::get("first todo belongs to user 1", format!("{JSONPLACEHOLDER}/todos"))
            .with_assertion(Assertion::json_eq("[0].userId", 1)),
        Scenario::get("post list has more than five entries", posts.as_str())
            .with_assertion(Assertion::json_size("size()", ComparisonOperator::GreaterThan, 5)),
    ];

    scenarios
        .into_iter()
        .map(|scenario| scenario.with_timeout_ms(settings.timeout_ms))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use apicheck_domain::request::HttpMethod;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_suite_targets() {
        let suite = public_api_suite(&RunnerSettings::default());
        let targets: Vec<_> = suite
            .iter()
            .map(|s| (s.method(), s.url().to_string()))
            .collect();

        assert_eq!(
            targets,
            vec![
                (HttpMethod::Get, "https://api.github.com".to_string()),
                (HttpMethod::Get, "https://jsonplaceholder.typicode.com/posts/1".to_string()),
                (HttpMethod::Get, "https://jsonplaceholder.typicode.com/posts".to_string()),
                (HttpMethod::Post, "https://jsonplaceholder.typicode.com/posts".to_string()),
                (HttpMethod::Get, "https://jsonplaceholder.typicode.com/comments/5".to_string()),
                (HttpMethod::Get, "https://jsonplaceholder.typicode.com/todos".to_string()),
                (HttpMethod::Get, "https://jsonplaceholder.typicode.com/posts".to_string()),
            ]
        );
    }

    #[test]
    fn test_post_sends_json_body() {
        let suite = public_api_suite(&RunnerSettings::default());
        let create = &suite[3];

        assert!(create.request.headers.contains("content-type"));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(create.request.body.content()).unwrap(),
            json!({"title": "foo", "body": "bar", "userId": 1})
        );
        assert_eq!(create.assertions.len(), 4);
    }

    #[test]
    fn test_timeout_comes_from_settings() {
        let settings = RunnerSettings {
            timeout_ms: 1_500,
            ..RunnerSettings::default()
        };

        assert!(
            public_api_suite(&settings)
                .iter()
                .all(|s| s.request.timeout_ms == 1_500)
        );
    }

    #[test]
    fn test_every_scenario_has_an_assertion() {
        assert!(
            public_api_suite(&RunnerSettings::default())
                .iter()
                .all(|s| !s.assertions.is_empty())
        );
    }
}
