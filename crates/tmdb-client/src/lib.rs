//! Metadata client for The Movie Database (TMDB).
//!
//! This crate enriches catalog movies with poster, overview, rating,
//! release year, genres and trailer. It handles:
//! - One HTTP call per attempt for details and videos together
//! - Bounded retries with exponential backoff and a per-attempt timeout
//! - Memoizing results per movie id for the life of the process
//! - Reporting exhausted retries to an observer instead of failing
//!
//! ## Example Usage
//! ```ignore
//! use tmdb_client::{ClientConfig, MetadataClient};
//!
//! let config = ClientConfig::from_env()?;
//! let client = MetadataClient::from_config(&config)?;
//!
//! let details = client.fetch(19995).await;
//! println!("Avatar ({})", details.release_year);
//! ```

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod reporter;
pub mod types;

pub use api::{MovieApi, TmdbApi};
pub use cache::DetailsCache;
pub use client::{MetadataClient, RetryPolicy};
pub use config::ClientConfig;
pub use error::{MetadataFetchError, Result};
pub use reporter::{Reporter, TracingReporter};
pub use types::{MovieDetails, TmdbMovie, TMDB_GENRES};
