//! Per-request execution context.
//!
//! Every inbound request owns one [`RequestContext`]. It is handed explicitly
//! to each upstream call so those calls stop when the request's deadline
//! passes or the request is cancelled. The HTTP layer cancels the context
//! when the caller disconnects; any call still in flight is then dropped.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::Instant;

use crate::error::UpstreamError;

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancellation: Arc<Cancellation>,
}

#[derive(Debug, Default)]
struct Cancellation {
    cancelled: AtomicBool,
    notify: Notify,
}

impl RequestContext {
    /// A context with no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose deadline is `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().with_deadline(Instant::now() + timeout)
    }

    #[must_use]
    pub const fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancel this context and every clone of it.
    pub fn cancel(&self) {
        self.cancellation.cancelled.store(true, Ordering::SeqCst);
        self.cancellation.notify.notify_waiters();
    }

    /// Guard that cancels this context when dropped, so clones handed to
    /// other tasks stop once the request future holding the guard is gone.
    #[must_use]
    pub fn cancel_on_drop(&self) -> CancelOnDrop {
        CancelOnDrop(self.clone())
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.cancelled.load(Ordering::SeqCst)
    }

    /// Drive an upstream call to completion unless the context is cancelled
    /// or its deadline passes first.
    ///
    /// # Errors
    ///
    /// * [`UpstreamError::Cancelled`] if the context was cancelled
    /// * [`UpstreamError::DeadlineExceeded`] if the deadline passed
    /// * [`UpstreamError::Request`] if the call itself failed
    pub async fn run<T, F>(&self, call: F) -> Result<T, UpstreamError>
    where
        F: Future<Output = anyhow::Result<T>> + Send,
    {
        if self.is_cancelled() {
            return Err(UpstreamError::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| deadline <= Instant::now()) {
            return Err(UpstreamError::DeadlineExceeded);
        }

        let deadline = self.deadline;
        let expired = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancelled() => Err(UpstreamError::Cancelled),
            () = expired => Err(UpstreamError::DeadlineExceeded),
            result = call => result.map_err(UpstreamError::Request),
        }
    }

    async fn cancelled(&self) {
        loop {
            let notified = self.cancellation.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

#[derive(Debug)]
pub struct CancelOnDrop(RequestContext);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}
