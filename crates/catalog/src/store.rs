//! Loading and memoizing the catalog artifacts.
//!
//! The store reads both artifacts once, checks that they agree on the
//! number of movies, and hands out shared read-only handles from then on.

use crate::error::{LoadError, Result};
use crate::parser;
use crate::types::{Catalog, SimilarityMatrix};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::info;

/// File name of the catalog table inside the data directory
pub const MOVIES_FILE: &str = "movies.json";

/// File name of the similarity matrix inside the data directory
pub const SIMILARITY_FILE: &str = "similarity.json";

type Loaded = (Arc<Catalog>, Arc<SimilarityMatrix>);

/// Read-only store over a data directory.
///
/// The first successful [`load`](CatalogStore::load) is cached for the life
/// of the store; later calls return the same `Arc`s without touching disk.
/// A failed load is not cached.
#[derive(Debug)]
pub struct CatalogStore {
    data_dir: PathBuf,
    loaded: Mutex<Option<Loaded>>,
}

impl CatalogStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            loaded: Mutex::new(None),
        }
    }

    /// Load the catalog and similarity matrix, reading storage at most once
    pub fn load(&self) -> Result<Loaded> {
        // Holding the lock across the read keeps concurrent first callers
        // from loading twice.
        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((catalog, matrix)) = loaded.as_ref() {
            return Ok((catalog.clone(), matrix.clone()));
        }

        let (catalog, matrix) = load_from_dir(&self.data_dir)?;
        let result = (Arc::new(catalog), Arc::new(matrix));
        *loaded = Some((result.0.clone(), result.1.clone()));
        Ok(result)
    }
}

/// Parse both artifacts from `data_dir` and validate that they line up
pub fn load_from_dir(data_dir: &Path) -> Result<(Catalog, SimilarityMatrix)> {
    info!("Loading catalog from {:?}", data_dir);
    let start = Instant::now();

    let movies_path = data_dir.join(MOVIES_FILE);
    let similarity_path = data_dir.join(SIMILARITY_FILE);

    // The matrix dominates load time; parse the catalog alongside it
    let (catalog, matrix) = rayon::join(
        || parser::parse_movies(&movies_path),
        || parser::parse_similarity(&similarity_path),
    );
    let catalog = catalog?;
    let matrix = matrix?;

    validate(&catalog, &matrix)?;

    info!(
        movies = catalog.len(),
        elapsed = ?start.elapsed(),
        "Catalog loaded"
    );
    Ok((catalog, matrix))
}

/// Check the catalog/matrix invariants.
///
/// Finiteness is checked row by row in parallel since real matrices have
/// millions of entries.
pub fn validate(catalog: &Catalog, matrix: &SimilarityMatrix) -> Result<()> {
    if catalog.is_empty() {
        return Err(LoadError::Empty);
    }
    if catalog.len() != matrix.size() {
        return Err(LoadError::DimensionMismatch {
            catalog: catalog.len(),
            matrix: matrix.size(),
        });
    }

    let non_finite = (0..matrix.size())
        .into_par_iter()
        .filter_map(|row| {
            let scores = matrix.row(row)?;
            scores.iter().position(|s| !s.is_finite()).map(|col| (row, col))
        })
        .min();
    if let Some((row, col)) = non_finite {
        return Err(LoadError::NonFiniteScore { row, col });
    }
    Ok(())
}
