use std::sync::Arc;

use pinned_models::RateLimitStatus;
use pinned_provider::PinnedProvider;

use crate::context::RequestContext;
use crate::error::PipelineError;

/// Checks the upstream quota before a request is allowed to spend it.
///
/// The check is a separate round trip from the query it protects, so it is
/// advisory: concurrent requests may all observe one remaining slot and all
/// proceed. The upstream's own rejection stays authoritative and is mapped
/// to [`PipelineError::RateLimited`] by the executor.
#[derive(Clone)]
pub struct RateLimitGuard {
    provider: Arc<dyn PinnedProvider>,
}

impl RateLimitGuard {
    #[must_use]
    pub fn new(provider: Arc<dyn PinnedProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the current quota and decide whether the request may proceed.
    ///
    /// # Errors
    ///
    /// * [`PipelineError::RateLimited`] if no quota remains
    /// * [`PipelineError::Upstream`] if the quota could not be fetched
    pub async fn check(&self, ctx: &RequestContext) -> Result<RateLimitStatus, PipelineError> {
        let status = ctx
            .run(self.provider.rate_limit())
            .await
            .map_err(PipelineError::from_upstream)?;

        if status.is_exhausted() {
            log::warn!(
                "{} rate limit exhausted ({} of {}), resets at {}",
                self.provider.provider_name(),
                status.remaining,
                status.limit,
                status.reset_at
            );
            return Err(PipelineError::RateLimited(status));
        }

        log::trace!(
            "{} rate limit: {} of {} remaining",
            self.provider.provider_name(),
            status.remaining,
            status.limit
        );

        Ok(status)
    }
}
