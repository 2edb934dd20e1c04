mod helpers;

use std::sync::Arc;

use helpers::{TestServer, header};
use pinned_server::ServerConfig;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header as header_matcher, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn start_with_backend(backend: &MockServer) -> TestServer {
    let config = ServerConfig::default()
        .with_github_api_url(backend.uri())
        .with_github_token(Some("test-token".to_string()));
    let provider = Arc::new(config.github_provider());

    TestServer::start_with_config(config, provider).await.unwrap()
}

fn rate_limit_body(remaining: u64) -> serde_json::Value {
    json!({
        "data": {
            "rateLimit": {
                "limit": 5000,
                "remaining": remaining,
                "resetAt": "2025-01-01T01:00:00Z"
            }
        }
    })
}

async fn mount_rate_limit(backend: &MockServer, remaining: u64) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("rateLimit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rate_limit_body(remaining)))
        .mount(backend)
        .await;
}

#[test_log::test(tokio::test)]
async fn test_user_pinned_repositories_end_to_end() {
    let backend = MockServer::start().await;
    mount_rate_limit(&backend, 4321).await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header_matcher("Authorization", "Bearer test-token"))
        .and(body_string_contains("pinnedItems"))
        .and(body_string_contains("user(login: $login)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "subject": {
                    "login": "octocat",
                    "pinnedItems": {
                        "edges": [
                            { "node": {
                                "__typename": "Repository",
                                "name": "hello-world",
                                "description": null,
                                "url": "https://github.com/octocat/hello-world",
                                "forkCount": 12,
                                "stargazerCount": 34,
                                "primaryLanguage": null,
                                "updatedAt": "2024-06-01T00:00:00Z",
                                "createdAt": "2011-01-26T19:01:12Z"
                            } },
                            { "node": {
                                "__typename": "Gist",
                                "name": "abc123",
                                "description": "a gist",
                                "url": "https://gist.github.com/abc123"
                            } },
                            { "node": {
                                "__typename": "Repository",
                                "name": "spoon-knife",
                                "description": "fork me",
                                "url": "https://github.com/octocat/spoon-knife",
                                "forkCount": 1,
                                "stargazerCount": 2,
                                "primaryLanguage": { "name": "HTML" },
                                "updatedAt": "2024-06-02T00:00:00Z",
                                "createdAt": "2014-02-03T00:00:00Z"
                            } }
                        ]
                    }
                }
            }
        })))
        .expect(1)
        .mount(&backend)
        .await;

    let server = start_with_backend(&backend).await;
    let response = reqwest::get(server.url("/user/octocat")).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(header(&response, "X-RateLimit-Remaining"), Some("4321"));
    assert_eq!(
        header(&response, "X-RateLimit-Reset"),
        Some("Wed, 01 Jan 2025 01:00:00 GMT")
    );

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!([
            {
                "name": "hello-world",
                "description": "",
                "url": "https://github.com/octocat/hello-world",
                "forkCount": 12,
                "stargazerCount": 34,
                "language": "",
                "updatedAt": "2024-06-01T00:00:00Z",
                "createdAt": "2011-01-26T19:01:12Z"
            },
            {
                "name": "spoon-knife",
                "description": "fork me",
                "url": "https://github.com/octocat/spoon-knife",
                "forkCount": 1,
                "stargazerCount": 2,
                "language": "HTML",
                "updatedAt": "2024-06-02T00:00:00Z",
                "createdAt": "2014-02-03T00:00:00Z"
            }
        ])
    );
}

#[test_log::test(tokio::test)]
async fn test_exhausted_backend_quota_skips_pinned_query() {
    let backend = MockServer::start().await;
    mount_rate_limit(&backend, 0).await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("pinnedItems"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;

    let server = start_with_backend(&backend).await;
    let response = reqwest::get(server.url("/org/rust-lang")).await.unwrap();

    assert_eq!(response.status(), 429);
    assert_eq!(
        header(&response, "Retry-After"),
        Some("Wed, 01 Jan 2025 01:00:00 GMT")
    );
}

#[test_log::test(tokio::test)]
async fn test_unknown_organization_is_internal_error() {
    let backend = MockServer::start().await;
    mount_rate_limit(&backend, 4999).await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("organization(login: $login)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "subject": null },
            "errors": [{
                "type": "NOT_FOUND",
                "message": "Could not resolve to an Organization with the login of 'nope'."
            }]
        })))
        .mount(&backend)
        .await;

    let server = start_with_backend(&backend).await;
    let response = reqwest::get(server.url("/org/nope")).await.unwrap();

    assert_eq!(response.status(), 500);
    assert_eq!(header(&response, "X-RateLimit-Remaining"), Some("4999"));
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("Could not resolve to an Organization")
    );
}

#[test_log::test(tokio::test)]
async fn test_backend_outage_is_internal_error() {
    let backend = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&backend)
        .await;

    let server = start_with_backend(&backend).await;
    let response = reqwest::get(server.url("/user/octocat")).await.unwrap();

    assert_eq!(response.status(), 500);
    assert!(header(&response, "X-RateLimit-Limit").is_none());
    assert_eq!(
        response.text().await.unwrap(),
        "GitHub API error: 502 Bad Gateway"
    );
}
