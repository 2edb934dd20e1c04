#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use pinned_models::{PinnedItem, RateLimitStatus};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
pub struct PinnedItemsVariables<'a> {
    pub login: &'a str,
    pub first: u8,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    /// GitHub-specific error classification, e.g. `NOT_FOUND` or `RATE_LIMITED`.
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitData {
    pub rate_limit: RateLimitStatus,
}

/// Pinned-items query result. Both subject kinds alias their root field to
/// `subject` so one shape serves both queries.
#[derive(Debug, Deserialize)]
pub struct PinnedItemsData {
    pub subject: Option<SubjectNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectNode {
    pub login: String,
    pub pinned_items: PinnedItemConnection,
}

#[derive(Debug, Deserialize)]
pub struct PinnedItemConnection {
    #[serde(default)]
    pub edges: Vec<PinnedItemEdge>,
}

#[derive(Debug, Deserialize)]
pub struct PinnedItemEdge {
    /// A node that fails to decode is kept as [`PinnedItem::Other`] so one
    /// malformed edge never fails the whole connection.
    #[serde(default, deserialize_with = "deserialize_lenient_node")]
    pub node: Option<PinnedItem>,
}

fn deserialize_lenient_node<'de, D>(deserializer: D) -> Result<Option<PinnedItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(value.map(|value| {
        serde_json::from_value(value).unwrap_or_else(|e| {
            log::debug!("Skipping malformed pinned item: {e}");
            PinnedItem::Other
        })
    }))
}
