//! Pinned items as returned by the upstream API.
//!
//! A pinned item is a union over several entity kinds, discriminated by the
//! GraphQL `__typename` field. Only [`PinnedItem::Repository`] carries the
//! fields the service exposes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum PinnedItem {
    Repository(PinnedRepository),
    Gist(PinnedGist),
    /// Any pinnable kind this service does not model.
    #[serde(other)]
    Other,
}

impl PinnedItem {
    #[must_use]
    pub const fn as_repository(&self) -> Option<&PinnedRepository> {
        match self {
            Self::Repository(repo) => Some(repo),
            Self::Gist(_) | Self::Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedRepository {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub fork_count: u64,
    pub stargazer_count: u64,
    pub primary_language: Option<Language>,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedGist {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_repository_variant() {
        let json = r#"{
            "__typename": "Repository",
            "name": "hello-world",
            "description": null,
            "url": "https://github.com/octocat/hello-world",
            "forkCount": 12,
            "stargazerCount": 340,
            "primaryLanguage": { "name": "Rust" },
            "updatedAt": "2025-01-02T00:00:00Z",
            "createdAt": "2020-05-01T00:00:00Z"
        }"#;

        let item: PinnedItem = serde_json::from_str(json).unwrap();
        let repo = item.as_repository().unwrap();

        assert_eq!(repo.name, "hello-world");
        assert_eq!(repo.description, None);
        assert_eq!(repo.fork_count, 12);
        assert_eq!(repo.primary_language.as_ref().unwrap().name, "Rust");
    }

    #[test]
    fn test_deserialize_gist_variant() {
        let json = r#"{
            "__typename": "Gist",
            "name": "abc123",
            "description": "dotfiles",
            "url": "https://gist.github.com/abc123"
        }"#;

        let item: PinnedItem = serde_json::from_str(json).unwrap();

        assert!(matches!(item, PinnedItem::Gist(ref gist) if gist.name == "abc123"));
        assert!(item.as_repository().is_none());
    }

    #[test]
    fn test_unknown_typename_is_other() {
        let json = r#"{ "__typename": "Project" }"#;

        let item: PinnedItem = serde_json::from_str(json).unwrap();

        assert_eq!(item, PinnedItem::Other);
    }
}
