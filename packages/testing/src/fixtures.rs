use chrono::{DateTime, TimeZone, Utc};
use pinned_models::{Language, PinnedGist, PinnedItem, PinnedRepository, RateLimitStatus};

/// Fixed quota reset instant used by fixtures: 2025-01-01T01:00:00Z.
#[must_use]
pub fn reset_at() -> DateTime<Utc> {
    Utc.timestamp_opt(1_735_693_200, 0)
        .single()
        .unwrap_or_default()
}

#[must_use]
pub fn rate_limit(limit: u64, remaining: u64) -> RateLimitStatus {
    RateLimitStatus::new(limit, remaining, reset_at())
}

#[must_use]
pub fn repository(name: &str) -> RepositoryBuilder {
    RepositoryBuilder::new(name)
}

#[must_use]
pub fn gist(name: &str) -> PinnedItem {
    PinnedItem::Gist(PinnedGist {
        name: name.to_string(),
        description: None,
        url: format!("https://gist.github.com/{name}"),
    })
}

pub struct RepositoryBuilder {
    repository: PinnedRepository,
}

impl RepositoryBuilder {
    #[must_use]
    pub fn new(name: &str) -> Self {
        let timestamp = reset_at();

        Self {
            repository: PinnedRepository {
                name: name.to_string(),
                description: Some(format!("{name} description")),
                url: format!("https://github.com/octocat/{name}"),
                fork_count: 0,
                stargazer_count: 0,
                primary_language: Some(Language {
                    name: "Rust".to_string(),
                }),
                updated_at: timestamp,
                created_at: timestamp,
            },
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: Option<&str>) -> Self {
        self.repository.primary_language = language.map(|name| Language {
            name: name.to_string(),
        });
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.repository.description = description.map(ToString::to_string);
        self
    }

    #[must_use]
    pub const fn with_counts(mut self, forks: u64, stars: u64) -> Self {
        self.repository.fork_count = forks;
        self.repository.stargazer_count = stars;
        self
    }

    #[must_use]
    pub const fn with_timestamps(
        mut self,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        self.repository.created_at = created_at;
        self.repository.updated_at = updated_at;
        self
    }

    #[must_use]
    pub fn build(self) -> PinnedItem {
        PinnedItem::Repository(self.repository)
    }
}
