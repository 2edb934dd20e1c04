use pinned_models::{RateLimitStatus, ValidationError};
use pinned_provider::RateLimitExceeded;

/// Any failure talking to the upstream, from either the quota check or the
/// pinned-items query.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{0:#}")]
    Request(#[from] anyhow::Error),
    #[error("context canceled")]
    Cancelled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited(RateLimitStatus),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl PipelineError {
    /// Promote an upstream error to [`PipelineError::RateLimited`] when the
    /// upstream itself reported the quota as spent.
    #[must_use]
    pub fn from_upstream(error: UpstreamError) -> Self {
        match error {
            UpstreamError::Request(err) => match err.downcast::<RateLimitExceeded>() {
                Ok(exceeded) => Self::RateLimited(exceeded.status),
                Err(err) => Self::Upstream(UpstreamError::Request(err)),
            },
            other => Self::Upstream(other),
        }
    }

    #[must_use]
    pub const fn rate_limit_status(&self) -> Option<RateLimitStatus> {
        match self {
            Self::RateLimited(status) => Some(*status),
            Self::Validation(_) | Self::Upstream(_) => None,
        }
    }
}
