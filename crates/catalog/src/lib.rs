//! # Catalog Crate
//!
//! This crate loads and holds the movie catalog and its precomputed
//! similarity matrix.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, Catalog, SimilarityMatrix)
//! - **parser**: Parse the JSON artifacts into Rust structs
//! - **store**: Load once, validate, and share read-only handles
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CatalogStore;
//!
//! let store = CatalogStore::new("data");
//! let (catalog, matrix) = store.load()?;
//!
//! let index = catalog.position("Avatar").unwrap();
//! let scores = matrix.row(index).unwrap();
//! println!("{} has {} similarity scores", catalog.get(index).unwrap().title, scores.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{LoadError, Result};
pub use store::{CatalogStore, MOVIES_FILE, SIMILARITY_FILE};
pub use types::{Catalog, MovieId, MovieRecord, SimilarityMatrix};
