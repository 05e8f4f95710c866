use thiserror::Error;

/// Errors returned by [`RecommendationEngine::recommend`](crate::RecommendationEngine::recommend).
///
/// Metadata failures never show up here; they degrade to unavailable details.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// No catalog title equals the query exactly
    #[error("Movie not found in database: {0}")]
    TitleNotFound(String),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
