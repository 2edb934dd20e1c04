#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Rate-limit aware request pipeline for pinned repositories.
//!
//! A request flows through a [`Chain`] of stages (validation, then the
//! [`RateLimitGuard`]), then the [`SubjectQueryExecutor`], and finally
//! [`normalize`]. [`PinnedService`] wires these together.

pub mod chain;
pub mod context;
pub mod error;
pub mod executor;
pub mod guard;
pub mod normalize;
pub mod service;

pub use chain::{Chain, Exchange, RateLimitStage, Stage, ValidationStage};
pub use context::{CancelOnDrop, RequestContext};
pub use error::{PipelineError, UpstreamError};
pub use executor::SubjectQueryExecutor;
pub use guard::RateLimitGuard;
pub use normalize::normalize;
pub use service::{Outcome, PinnedService};
