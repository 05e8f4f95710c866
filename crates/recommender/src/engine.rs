//! # Recommendation Engine
//!
//! Coordinates one lookup:
//! 1. Find the queried title in the catalog (exact match)
//! 2. Rank its similarity row and take the scan window
//! 3. Fetch metadata for candidates in ranked order
//! 4. Apply the genre filter and stop at the result cap
//!
//! Fetches may run in small concurrent batches, but accept/reject decisions
//! are always made in ranked order, so the output does not depend on
//! `fetch_concurrency`.

use std::sync::Arc;
use std::time::Instant;

use catalog::{Catalog, CatalogStore, MovieId, MovieRecord, SimilarityMatrix};
use tmdb_client::{MetadataClient, MovieDetails};
use tracing::{debug, info, instrument, warn};

use crate::error::{RecommendError, Result};
use crate::filter::GenreFilter;
use crate::ranking;
use crate::types::{Recommendation, ScanLimits};

/// Answers "movies like this one" queries against a loaded catalog
#[derive(Clone)]
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    matrix: Arc<SimilarityMatrix>,
    metadata: MetadataClient,
    limits: ScanLimits,
}

impl RecommendationEngine {
    /// Create an engine over an already loaded catalog.
    ///
    /// Fails if the catalog and matrix don't line up.
    pub fn new(
        catalog: Arc<Catalog>,
        matrix: Arc<SimilarityMatrix>,
        metadata: MetadataClient,
    ) -> catalog::Result<Self> {
        catalog::store::validate(&catalog, &matrix)?;
        Ok(Self {
            catalog,
            matrix,
            metadata,
            limits: ScanLimits::default(),
        })
    }

    /// Load (or reuse) the store's catalog and build an engine on it
    pub fn from_store(store: &CatalogStore, metadata: MetadataClient) -> catalog::Result<Self> {
        let (catalog, matrix) = store.load()?;
        Self::new(catalog, matrix, metadata)
    }

    pub fn with_limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Metadata for a single movie; never fails
    pub async fn fetch_details(&self, movie_id: MovieId) -> MovieDetails {
        self.metadata.fetch(movie_id).await
    }

    /// Movies similar to `title`, best first.
    ///
    /// Returns an empty list (not an error) when no candidate in the scan
    /// window passes `genre_filter`.
    #[instrument(skip_all, fields(title = %title, genres = genre_filter.is_active()))]
    pub async fn recommend(
        &self,
        title: &str,
        genre_filter: &GenreFilter,
    ) -> Result<Vec<Recommendation>> {
        let start_time = Instant::now();

        let index = self
            .catalog
            .position(title)
            .ok_or_else(|| RecommendError::TitleNotFound(title.to_string()))?;

        // validate() in new() guarantees a row per catalog entry
        let row = self.matrix.row(index).unwrap_or_default();
        let ranked = ranking::rank(row);
        let candidates: Vec<(&MovieRecord, f64)> =
            ranking::scan_window(&ranked, self.limits.window)
                .iter()
                .filter_map(|&(i, score)| self.catalog.get(i).map(|movie| (movie, score)))
                .collect();
        debug!("Scanning {} candidates", candidates.len());

        let recommendations = self.scan(&candidates, genre_filter).await;

        info!(
            "Selected {} recommendations for '{}' in {:.2?}",
            recommendations.len(),
            title,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Enrich candidates in ranked order until the cap or the end of the window
    async fn scan(
        &self,
        candidates: &[(&MovieRecord, f64)],
        genre_filter: &GenreFilter,
    ) -> Vec<Recommendation> {
        let cap = self.limits.cap;
        let mut accepted = Vec::new();
        let mut remaining = candidates;

        while !remaining.is_empty() && accepted.len() < cap {
            // Never fetch more than could still be accepted
            let batch_size = self
                .limits
                .fetch_concurrency
                .max(1)
                .min(cap - accepted.len())
                .min(remaining.len());
            let (batch, rest) = remaining.split_at(batch_size);
            remaining = rest;

            let fetched = self.fetch_batch(batch).await;
            for (&(movie, score), details) in batch.iter().zip(fetched) {
                if !genre_filter.accepts(&details) {
                    debug!(movie_id = movie.id, "Rejected by genre filter");
                    continue;
                }
                accepted.push(Recommendation {
                    movie_id: movie.id,
                    title: movie.title.clone(),
                    score,
                    details,
                });
                if accepted.len() >= cap {
                    break;
                }
            }
        }

        accepted
    }

    /// Fetch details for a batch, preserving batch order
    async fn fetch_batch(&self, batch: &[(&MovieRecord, f64)]) -> Vec<MovieDetails> {
        if let [(movie, _)] = batch {
            return vec![self.metadata.fetch(movie.id).await];
        }

        let handles: Vec<_> = batch
            .iter()
            .map(|(movie, _)| {
                let metadata = self.metadata.clone();
                let movie_id = movie.id;
                (movie_id, tokio::spawn(async move { metadata.fetch(movie_id).await }))
            })
            .collect();

        let mut fetched = Vec::with_capacity(handles.len());
        for (movie_id, handle) in handles {
            match handle.await {
                Ok(details) => fetched.push(details),
                Err(e) => {
                    warn!(movie_id, error = %e, "Metadata task failed");
                    fetched.push(MovieDetails::unavailable());
                }
            }
        }
        fetched
    }
}
