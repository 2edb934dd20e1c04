use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use pinned_github_models::{
    GraphQlError, GraphQlRequest, GraphQlResponse, PinnedItemsData, PinnedItemsVariables,
    RateLimitData,
};
use pinned_models::{PinnedItem, RateLimitStatus, Subject, SubjectKind};
use pinned_provider::{PINNED_ITEMS_PAGE_SIZE, PinnedProvider, RateLimitExceeded};
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::queries::{RATE_LIMIT_QUERY, pinned_items_query};

pub struct GitHubProvider {
    http_client: reqwest::Client,
    auth_token: Option<String>,
    base_url: String,
}

impl GitHubProvider {
    /// Create a new GitHub provider without authentication.
    ///
    /// GitHub's GraphQL API rejects anonymous calls, so production use needs
    /// [`GitHubProvider::with_token`].
    #[must_use]
    pub fn new() -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent("pinned")
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Failed to build configured HTTP client, using defaults: {e}");
                reqwest::Client::new()
            });
        Self {
            http_client,
            auth_token: None,
            base_url: "https://api.github.com".to_string(),
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: String) -> Self {
        self.auth_token = Some(token);
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn graphql_url(&self) -> String {
        format!("{}/graphql", self.base_url)
    }

    async fn query<V: Serialize + Send + Sync, T: DeserializeOwned>(
        &self,
        query: &str,
        variables: V,
    ) -> Result<T> {
        let url = self.graphql_url();
        log::debug!("POST {url}");

        let mut request = self
            .http_client
            .post(&url)
            .header("Accept", "application/json")
            .json(&GraphQlRequest { query, variables });

        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let quota = parse_rate_limit_headers(response.headers());

        if !status.is_success() {
            if let Some(quota) = quota
                && quota.is_exhausted()
                && matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS)
            {
                log::warn!("GitHub API rate limit exhausted until {}", quota.reset_at);
                return Err(RateLimitExceeded { status: quota }.into());
            }

            log::error!("GitHub API error: {}", response.text().await?);
            anyhow::bail!("GitHub API error: {status}");
        }

        let body: GraphQlResponse<T> = response.json().await?;

        if !body.errors.is_empty() {
            if let Some(quota) = quota
                && body.errors.iter().any(is_rate_limited)
            {
                log::warn!("GitHub GraphQL rate limited until {}", quota.reset_at);
                return Err(RateLimitExceeded { status: quota }.into());
            }

            let message = body
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            log::error!("GitHub GraphQL error: {message}");
            anyhow::bail!(message);
        }

        body.data
            .ok_or_else(|| anyhow!("GitHub GraphQL response contained no data"))
    }
}

impl Default for GitHubProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PinnedProvider for GitHubProvider {
    async fn rate_limit(&self) -> Result<RateLimitStatus> {
        let data: RateLimitData = self
            .query(RATE_LIMIT_QUERY, serde_json::Map::new())
            .await?;

        Ok(data.rate_limit)
    }

    async fn pinned_items(&self, subject: &Subject) -> Result<Vec<PinnedItem>> {
        let variables = PinnedItemsVariables {
            login: subject.login(),
            first: PINNED_ITEMS_PAGE_SIZE,
        };

        let data: PinnedItemsData = self
            .query(pinned_items_query(subject.kind()), variables)
            .await?;

        let node = data.subject.ok_or_else(|| {
            let kind = match subject.kind() {
                SubjectKind::Account => "a User",
                SubjectKind::Organization => "an Organization",
            };
            anyhow!(
                "Could not resolve to {kind} with the login of '{}'",
                subject.login()
            )
        })?;

        log::debug!(
            "Fetched {} pinned item(s) for {}",
            node.pinned_items.edges.len(),
            node.login
        );

        Ok(node
            .pinned_items
            .edges
            .into_iter()
            .map(|edge| edge.node.unwrap_or(PinnedItem::Other))
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "github"
    }
}

fn is_rate_limited(error: &GraphQlError) -> bool {
    error.error_type.as_deref() == Some("RATE_LIMITED")
}

fn parse_rate_limit_headers(headers: &HeaderMap) -> Option<RateLimitStatus> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
    };

    let limit = u64::try_from(header("x-ratelimit-limit")?).ok()?;
    let remaining = u64::try_from(header("x-ratelimit-remaining")?.max(0)).ok()?;
    let reset_at: DateTime<Utc> = DateTime::from_timestamp(header("x-ratelimit-reset")?, 0)?;

    Some(RateLimitStatus::new(limit, remaining, reset_at))
}
