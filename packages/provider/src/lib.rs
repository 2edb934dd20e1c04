#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod provider;

pub use provider::{PINNED_ITEMS_PAGE_SIZE, PinnedProvider, RateLimitExceeded};
