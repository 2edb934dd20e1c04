use anyhow::Result;
use pinned_models::{PinnedItem, RateLimitStatus, Subject};

/// Number of pinned items requested per subject. No further pages are read.
pub const PINNED_ITEMS_PAGE_SIZE: u8 = 6;

/// Upstream code-hosting API consumed by the request pipeline.
///
/// Implementations are shared by every in-flight request and must be safe
/// for concurrent use.
#[async_trait::async_trait]
pub trait PinnedProvider: Send + Sync {
    /// Fetch the current quota state. Does not consume a quota slot.
    async fn rate_limit(&self) -> Result<RateLimitStatus>;

    /// Fetch up to [`PINNED_ITEMS_PAGE_SIZE`] pinned items for `subject`,
    /// in upstream order.
    async fn pinned_items(&self, subject: &Subject) -> Result<Vec<PinnedItem>>;

    fn provider_name(&self) -> &str;
}

/// The upstream itself refused a call because the quota is spent.
///
/// Providers return this (inside [`anyhow::Error`]) so callers can tell an
/// authoritative upstream rejection apart from other failures.
#[derive(Debug, Clone, thiserror::Error)]
#[error("upstream rate limit exceeded (resets at {})", .status.reset_at)]
pub struct RateLimitExceeded {
    pub status: RateLimitStatus,
}
