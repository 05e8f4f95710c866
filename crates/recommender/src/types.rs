use catalog::MovieId;
use serde::Serialize;
use tmdb_client::MovieDetails;

/// Number of ranked candidates examined after the query movie itself
pub const SCAN_WINDOW: usize = 59;

/// Maximum number of recommendations returned
pub const RESULT_CAP: usize = 36;

/// One recommended movie: a catalog row joined with its fetched details
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    /// Similarity to the queried movie
    pub score: f64,
    #[serde(flatten)]
    pub details: MovieDetails,
}

/// Bounds on the work done per request.
///
/// `window` and `cap` are independent: with a genre filter a request can
/// return fewer than `cap` results even if more matches exist past the
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    pub window: usize,
    pub cap: usize,
    /// Metadata fetches in flight at once; 1 scans strictly one by one
    pub fetch_concurrency: usize,
}

impl ScanLimits {
    pub fn with_fetch_concurrency(mut self, fetch_concurrency: usize) -> Self {
        self.fetch_concurrency = fetch_concurrency.max(1);
        self
    }
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            window: SCAN_WINDOW,
            cap: RESULT_CAP,
            fetch_concurrency: 1,
        }
    }
}
