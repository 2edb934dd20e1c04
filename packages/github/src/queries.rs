//! GraphQL documents sent to the GitHub API.
//!
//! Both pinned-items queries alias their root field to `subject` so a single
//! response shape covers users and organizations.

use pinned_models::SubjectKind;

pub const RATE_LIMIT_QUERY: &str = "query { rateLimit { limit remaining resetAt } }";

macro_rules! pinned_items_query {
    ($root:literal) => {
        concat!(
            "query($login: String!, $first: Int!) { subject: ",
            $root,
            "(login: $login) { login pinnedItems(first: $first) { edges { node { __typename ",
            "... on Repository { name description url forkCount stargazerCount ",
            "primaryLanguage { name } updatedAt createdAt } ",
            "... on Gist { name description url } ",
            "} } } } }"
        )
    };
}

pub const USER_PINNED_ITEMS_QUERY: &str = pinned_items_query!("user");
pub const ORGANIZATION_PINNED_ITEMS_QUERY: &str = pinned_items_query!("organization");

#[must_use]
pub const fn pinned_items_query(kind: SubjectKind) -> &'static str {
    match kind {
        SubjectKind::Account => USER_PINNED_ITEMS_QUERY,
        SubjectKind::Organization => ORGANIZATION_PINNED_ITEMS_QUERY,
    }
}
