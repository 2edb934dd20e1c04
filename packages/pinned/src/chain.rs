//! Composable request-handling stages.
//!
//! Each [`Stage`] either forwards the request (returns `Ok`, possibly after
//! recording something on the [`Exchange`]) or short-circuits it (returns
//! `Err`). A [`Chain`] runs its stages in order and stops at the first
//! rejection.

use std::sync::Arc;

use pinned_models::{RateLimitStatus, Subject, SubjectKind};

use crate::context::RequestContext;
use crate::error::PipelineError;
use crate::guard::RateLimitGuard;

/// State carried through the chain for one request.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub kind: SubjectKind,
    /// Login exactly as received, before validation.
    pub login: String,
    pub subject: Option<Subject>,
    /// Quota admitted by the rate-limit stage.
    pub quota: Option<RateLimitStatus>,
}

impl Exchange {
    #[must_use]
    pub fn new(kind: SubjectKind, login: impl Into<String>) -> Self {
        Self {
            kind,
            login: login.into(),
            subject: None,
            quota: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returning an error rejects the request; later stages do not run.
    async fn process(
        &self,
        ctx: &RequestContext,
        exchange: &mut Exchange,
    ) -> Result<(), PipelineError>;
}

#[derive(Clone, Default)]
pub struct Chain {
    stages: Vec<Arc<dyn Stage>>,
}

impl Chain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// # Errors
    ///
    /// * The first error returned by any stage
    pub async fn run(
        &self,
        ctx: &RequestContext,
        exchange: &mut Exchange,
    ) -> Result<(), PipelineError> {
        for stage in &self.stages {
            if let Err(e) = stage.process(ctx, exchange).await {
                log::debug!("Stage '{}' rejected request: {e}", stage.name());
                return Err(e);
            }
        }

        Ok(())
    }
}

/// Rejects blank logins before any upstream call is made.
pub struct ValidationStage;

#[async_trait::async_trait]
impl Stage for ValidationStage {
    fn name(&self) -> &'static str {
        "validation"
    }

    async fn process(
        &self,
        _ctx: &RequestContext,
        exchange: &mut Exchange,
    ) -> Result<(), PipelineError> {
        exchange.subject = Some(Subject::new(exchange.kind, exchange.login.as_str())?);
        Ok(())
    }
}

/// Admits the request only while upstream quota remains.
pub struct RateLimitStage {
    guard: RateLimitGuard,
}

impl RateLimitStage {
    #[must_use]
    pub const fn new(guard: RateLimitGuard) -> Self {
        Self { guard }
    }
}

#[async_trait::async_trait]
impl Stage for RateLimitStage {
    fn name(&self) -> &'static str {
        "rate_limit"
    }

    async fn process(
        &self,
        ctx: &RequestContext,
        exchange: &mut Exchange,
    ) -> Result<(), PipelineError> {
        exchange.quota = Some(self.guard.check(ctx).await?);
        Ok(())
    }
}
