use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time quota state reported by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitStatus {
    pub limit: u64,
    pub remaining: u64,
    /// Instant at which the quota window refreshes.
    pub reset_at: DateTime<Utc>,
}

impl RateLimitStatus {
    #[must_use]
    pub const fn new(limit: u64, remaining: u64, reset_at: DateTime<Utc>) -> Self {
        Self {
            limit,
            remaining,
            reset_at,
        }
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining < 1
    }
}
