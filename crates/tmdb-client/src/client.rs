//! Retrying, memoizing metadata client.

use catalog::MovieId;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::api::{MovieApi, TmdbApi};
use crate::cache::DetailsCache;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::reporter::{Reporter, TracingReporter};
use crate::types::MovieDetails;

/// Bounded retries with exponential backoff.
///
/// Attempt `n` (0-based) that fails waits `backoff * 2^n` before the next
/// one; there is no wait after the last attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    /// `attempts` is clamped to at least one
    pub fn new(attempts: u32, backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff,
        }
    }

    /// Wait after failed attempt `attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Fetches [`MovieDetails`] for catalog movies.
///
/// `fetch` never fails: transient errors are retried, and once retries are
/// exhausted the failure goes to the [`Reporter`] and the caller gets
/// [`MovieDetails::unavailable`]. Results, including unavailable ones, are
/// memoized in the shared [`DetailsCache`].
#[derive(Clone)]
pub struct MetadataClient {
    api: Arc<dyn MovieApi>,
    cache: Arc<DetailsCache>,
    reporter: Arc<dyn Reporter>,
    retry: RetryPolicy,
}

impl MetadataClient {
    /// Client with a fresh cache, tracing reporter and default retry policy
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self {
            api,
            cache: Arc::new(DetailsCache::new()),
            reporter: Arc::new(TracingReporter),
            retry: RetryPolicy::default(),
        }
    }

    /// TMDB-backed client configured from `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let api = TmdbApi::from_config(config)?;
        Ok(Self::new(Arc::new(api)).with_retry_policy(config.retry_policy()))
    }

    /// Share a cache between clients
    pub fn with_cache(mut self, cache: Arc<DetailsCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn cache(&self) -> &Arc<DetailsCache> {
        &self.cache
    }

    /// Details for `movie_id`, from cache or the API
    pub async fn fetch(&self, movie_id: MovieId) -> MovieDetails {
        self.cache
            .get_or_fetch(movie_id, || self.fetch_uncached(movie_id))
            .await
    }

    async fn fetch_uncached(&self, movie_id: MovieId) -> MovieDetails {
        match self.fetch_with_retry(movie_id).await {
            Ok(details) => details,
            Err(error) => {
                self.reporter.fetch_failed(movie_id, &error);
                MovieDetails::unavailable()
            }
        }
    }

    /// Run the retry loop without the cache, returning the last error
    pub async fn fetch_with_retry(&self, movie_id: MovieId) -> Result<MovieDetails> {
        let mut attempt = 0;
        loop {
            match self.api.get_movie(movie_id).await {
                Ok(movie) => return Ok(MovieDetails::from(movie)),
                Err(error) if attempt + 1 < self.retry.attempts => {
                    let delay = self.retry.delay_for(attempt);
                    debug!(
                        movie_id,
                        attempt,
                        ?delay,
                        error = %error,
                        "Metadata fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
