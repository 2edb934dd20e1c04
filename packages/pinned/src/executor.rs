use std::sync::Arc;

use pinned_models::{PinnedItem, Subject};
use pinned_provider::PinnedProvider;

use crate::context::RequestContext;
use crate::error::PipelineError;

/// Runs the single pinned-items query for a subject.
///
/// No retries: any upstream failure is terminal for the request.
#[derive(Clone)]
pub struct SubjectQueryExecutor {
    provider: Arc<dyn PinnedProvider>,
}

impl SubjectQueryExecutor {
    #[must_use]
    pub fn new(provider: Arc<dyn PinnedProvider>) -> Self {
        Self { provider }
    }

    /// # Errors
    ///
    /// * [`PipelineError::Upstream`] on transport, query, or decode failure,
    ///   including an unknown login
    /// * [`PipelineError::RateLimited`] if the upstream refused the query
    ///   for lack of quota
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        subject: &Subject,
    ) -> Result<Vec<PinnedItem>, PipelineError> {
        log::debug!(
            "Querying {} pinned items for {subject}",
            self.provider.provider_name()
        );

        ctx.run(self.provider.pinned_items(subject))
            .await
            .map_err(PipelineError::from_upstream)
    }
}
