use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flat, caller-facing view of one pinned repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub description: String,
    pub url: String,
    pub fork_count: u64,
    pub stargazer_count: u64,
    /// Empty when the repository has no primary language.
    pub language: String,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
