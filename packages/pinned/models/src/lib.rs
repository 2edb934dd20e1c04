#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Data models shared by the pinned repositories service.
//!
//! Everything here is request-scoped: values are built once per inbound
//! request and dropped with the response that produced them.

pub mod pinned;
pub mod rate_limit;
pub mod repository;
pub mod subject;

pub use pinned::{Language, PinnedGist, PinnedItem, PinnedRepository};
pub use rate_limit::RateLimitStatus;
pub use repository::Repository;
pub use subject::{Subject, SubjectKind, ValidationError};
