//! Content-based movie recommendations.
//!
//! This crate provides:
//! - Ranking of a precomputed similarity row
//! - GenreFilter for narrowing enriched candidates
//! - RecommendationEngine, which ties the catalog and the metadata client
//!   together into a single bounded lookup
//!
//! ## Architecture
//! Each request is processed in stages:
//! 1. The queried title is located in the catalog (exact match)
//! 2. Its similarity row is ranked and the scan window taken
//! 3. Candidates are enriched via TMDB, filtered by genre, and capped
//!
//! ## Example Usage
//! ```ignore
//! use catalog::CatalogStore;
//! use recommender::{GenreFilter, RecommendationEngine};
//! use tmdb_client::{ClientConfig, MetadataClient};
//!
//! let store = CatalogStore::new("data");
//! let metadata = MetadataClient::from_config(&ClientConfig::from_env()?)?;
//! let engine = RecommendationEngine::from_store(&store, metadata)?;
//!
//! let recommendations = engine
//!     .recommend("Avatar", &GenreFilter::new(["Science Fiction"]))
//!     .await?;
//! ```

pub mod engine;
pub mod error;
pub mod filter;
pub mod ranking;
pub mod types;

// Re-export main types
pub use engine::RecommendationEngine;
pub use error::{RecommendError, Result};
pub use filter::GenreFilter;
pub use types::{Recommendation, ScanLimits, RESULT_CAP, SCAN_WINDOW};
