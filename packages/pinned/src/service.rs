use std::sync::Arc;

use pinned_models::{RateLimitStatus, Repository, Subject, SubjectKind};
use pinned_provider::PinnedProvider;

use crate::chain::{Chain, Exchange, RateLimitStage, ValidationStage};
use crate::context::RequestContext;
use crate::error::PipelineError;
use crate::executor::SubjectQueryExecutor;
use crate::guard::RateLimitGuard;
use crate::normalize::normalize;

/// Result of one pass through the pipeline.
#[derive(Debug)]
pub struct Outcome {
    /// Quota admitted before the query ran, if the guard got that far.
    pub quota: Option<RateLimitStatus>,
    pub result: Result<Vec<Repository>, PipelineError>,
}

impl Outcome {
    /// Quota to report to the caller: the admitted quota, or the exhausted
    /// quota that caused a rejection.
    #[must_use]
    pub fn reported_quota(&self) -> Option<RateLimitStatus> {
        match &self.result {
            Err(e) => e.rate_limit_status().or(self.quota),
            Ok(_) => self.quota,
        }
    }
}

#[derive(Clone)]
pub struct PinnedService {
    chain: Chain,
    executor: SubjectQueryExecutor,
}

impl PinnedService {
    /// Build the standard pipeline: validation, then the quota guard, then
    /// the pinned-items query.
    #[must_use]
    pub fn new(provider: Arc<dyn PinnedProvider>) -> Self {
        let chain = Chain::new()
            .with_stage(ValidationStage)
            .with_stage(RateLimitStage::new(RateLimitGuard::new(provider.clone())));

        Self::with_chain(provider, chain)
    }

    #[must_use]
    pub fn with_chain(provider: Arc<dyn PinnedProvider>, chain: Chain) -> Self {
        Self {
            chain,
            executor: SubjectQueryExecutor::new(provider),
        }
    }

    #[must_use]
    pub const fn chain(&self) -> &Chain {
        &self.chain
    }

    pub async fn fetch(
        &self,
        ctx: &RequestContext,
        kind: SubjectKind,
        login: impl Into<String> + Send,
    ) -> Outcome {
        let mut exchange = Exchange::new(kind, login);
        let result = self.respond(ctx, &mut exchange).await;

        Outcome {
            quota: exchange.quota,
            result,
        }
    }

    async fn respond(
        &self,
        ctx: &RequestContext,
        exchange: &mut Exchange,
    ) -> Result<Vec<Repository>, PipelineError> {
        self.chain.run(ctx, exchange).await?;

        let subject = match exchange.subject.take() {
            Some(subject) => subject,
            None => Subject::new(exchange.kind, exchange.login.as_str())?,
        };

        let items = self.executor.execute(ctx, &subject).await?;

        Ok(normalize(items))
    }
}
