#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

mod fixtures;
mod stub;

pub use fixtures::{RepositoryBuilder, gist, rate_limit, repository, reset_at};
pub use stub::{StubProvider, StubResponse};
