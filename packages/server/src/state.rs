use std::sync::Arc;
use std::time::Duration;

use pinned::{PinnedService, RequestContext};
use pinned_provider::PinnedProvider;

use crate::ServerConfig;

pub struct AppState {
    pub service: PinnedService,
    pub request_timeout: Option<Duration>,
    pub opaque_errors: bool,
}

impl AppState {
    pub fn new(provider: Arc<dyn PinnedProvider>, config: &ServerConfig) -> Self {
        Self {
            service: PinnedService::new(provider),
            request_timeout: config.request_timeout,
            opaque_errors: config.opaque_errors,
        }
    }

    /// Fresh context for one inbound request.
    pub fn context(&self) -> RequestContext {
        self.request_timeout
            .map_or_else(RequestContext::new, RequestContext::with_timeout)
    }
}
