use pinned_models::{PinnedItem, PinnedRepository, Repository};

/// Flatten pinned items into [`Repository`] records.
///
/// Non-repository items are skipped, so the result may be shorter than the
/// input. Order is preserved.
#[must_use]
pub fn normalize(items: Vec<PinnedItem>) -> Vec<Repository> {
    items
        .into_iter()
        .filter_map(|item| match item {
            PinnedItem::Repository(repo) => Some(project(repo)),
            PinnedItem::Gist(_) | PinnedItem::Other => None,
        })
        .collect()
}

fn project(repo: PinnedRepository) -> Repository {
    Repository {
        name: repo.name,
        description: repo.description.unwrap_or_default(),
        url: repo.url,
        fork_count: repo.fork_count,
        stargazer_count: repo.stargazer_count,
        language: repo
            .primary_language
            .map(|language| language.name)
            .unwrap_or_default(),
        updated_at: repo.updated_at,
        created_at: repo.created_at,
    }
}
