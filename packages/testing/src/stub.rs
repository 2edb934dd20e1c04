use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use anyhow::Result;
use pinned_models::{PinnedItem, RateLimitStatus, Subject};
use pinned_provider::{PinnedProvider, RateLimitExceeded};

use crate::fixtures::rate_limit;

/// Canned answer for one kind of upstream call.
#[derive(Debug, Clone)]
pub enum StubResponse<T> {
    Ok(T),
    /// Fail with an untyped error carrying this message.
    Fail(String),
    /// Fail the way an upstream that enforces its own quota would.
    Exhausted(RateLimitStatus),
}

impl<T: Clone> StubResponse<T> {
    fn resolve(&self) -> Result<T> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::Fail(message) => Err(anyhow::anyhow!(message.clone())),
            Self::Exhausted(status) => Err(RateLimitExceeded { status: *status }.into()),
        }
    }
}

/// In-memory [`PinnedProvider`] that records every call it receives.
pub struct StubProvider {
    rate_limit: StubResponse<RateLimitStatus>,
    pinned_items: StubResponse<Vec<PinnedItem>>,
    delay: Option<Duration>,
    rate_limit_calls: AtomicUsize,
    pinned_items_calls: AtomicUsize,
    pinned_items_completed: AtomicUsize,
    subjects: Mutex<Vec<Subject>>,
}

impl StubProvider {
    /// A provider with plenty of quota (4999 of 5000) and no pinned items.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rate_limit: StubResponse::Ok(rate_limit(5000, 4999)),
            pinned_items: StubResponse::Ok(vec![]),
            delay: None,
            rate_limit_calls: AtomicUsize::new(0),
            pinned_items_calls: AtomicUsize::new(0),
            pinned_items_completed: AtomicUsize::new(0),
            subjects: Mutex::new(vec![]),
        }
    }

    #[must_use]
    pub fn with_rate_limit(mut self, status: RateLimitStatus) -> Self {
        self.rate_limit = StubResponse::Ok(status);
        self
    }

    #[must_use]
    pub fn with_rate_limit_error(mut self, message: &str) -> Self {
        self.rate_limit = StubResponse::Fail(message.to_string());
        self
    }

    #[must_use]
    pub fn with_pinned_items(mut self, items: Vec<PinnedItem>) -> Self {
        self.pinned_items = StubResponse::Ok(items);
        self
    }

    #[must_use]
    pub fn with_pinned_items_error(mut self, message: &str) -> Self {
        self.pinned_items = StubResponse::Fail(message.to_string());
        self
    }

    #[must_use]
    pub fn with_pinned_items_exhausted(mut self, status: RateLimitStatus) -> Self {
        self.pinned_items = StubResponse::Exhausted(status);
        self
    }

    /// Delay every pinned-items call, e.g. to exercise deadlines.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    #[must_use]
    pub fn rate_limit_calls(&self) -> usize {
        self.rate_limit_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn pinned_items_calls(&self) -> usize {
        self.pinned_items_calls.load(Ordering::SeqCst)
    }

    /// Pinned-items calls that ran to completion instead of being dropped
    /// mid-flight.
    #[must_use]
    pub fn pinned_items_completed(&self) -> usize {
        self.pinned_items_completed.load(Ordering::SeqCst)
    }

    /// Subjects passed to `pinned_items`, in call order.
    #[must_use]
    pub fn subjects(&self) -> Vec<Subject> {
        self.subjects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for StubProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PinnedProvider for StubProvider {
    async fn rate_limit(&self) -> Result<RateLimitStatus> {
        self.rate_limit_calls.fetch_add(1, Ordering::SeqCst);
        self.rate_limit.resolve()
    }

    async fn pinned_items(&self, subject: &Subject) -> Result<Vec<PinnedItem>> {
        self.pinned_items_calls.fetch_add(1, Ordering::SeqCst);
        self.subjects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(subject.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.pinned_items_completed.fetch_add(1, Ordering::SeqCst);
        self.pinned_items.resolve()
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}
