use catalog::MovieId;
use tracing::warn;

use crate::error::MetadataFetchError;

/// Observer for non-fatal fetch failures.
///
/// Called once per movie whose details could not be fetched after all
/// retries. Implementations decide how to surface it (log, UI banner).
pub trait Reporter: Send + Sync {
    fn fetch_failed(&self, movie_id: MovieId, error: &MetadataFetchError);
}

/// Reports failures as `tracing` warnings
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn fetch_failed(&self, movie_id: MovieId, error: &MetadataFetchError) {
        warn!(movie_id, error = %error, "Could not fetch details for movie");
    }
}
