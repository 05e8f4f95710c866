//! Process-lifetime memoization of fetched details.

use catalog::MovieId;
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::types::MovieDetails;

/// Append-only map from movie id to fetched details.
///
/// Each id gets its own `OnceCell`, so concurrent callers for the same id
/// share a single fetch while different ids proceed independently. Entries
/// are never evicted.
#[derive(Debug, Default)]
pub struct DetailsCache {
    entries: DashMap<MovieId, Arc<OnceCell<MovieDetails>>>,
}

impl DetailsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached details for `movie_id`, running `fetch` on first use.
    ///
    /// If the fetching future is dropped before completing, the entry stays
    /// empty and the next caller fetches again.
    pub async fn get_or_fetch<F, Fut>(&self, movie_id: MovieId, fetch: F) -> MovieDetails
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = MovieDetails>,
    {
        let cell = self.cell(movie_id);
        cell.get_or_init(fetch).await.clone()
    }

    /// Cached details, if a fetch for `movie_id` has completed
    pub fn get(&self, movie_id: MovieId) -> Option<MovieDetails> {
        self.entries
            .get(&movie_id)
            .and_then(|entry| entry.value().get().cloned())
    }

    /// Number of completed entries
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, movie_id: MovieId) -> Arc<OnceCell<MovieDetails>> {
        self.entries.entry(movie_id).or_default().value().clone()
    }
}
