//! Core domain types for the movie catalog.
//!
//! The catalog and the similarity matrix are parallel structures: the movie
//! at catalog index `i` owns row `i` (and column `i`) of the matrix.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// TMDB identifier of a movie
pub type MovieId = u32;

// =============================================================================
// Catalog
// =============================================================================

/// One row of the catalog table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "movie_id", alias = "id")]
    pub id: MovieId,
    pub title: String,
}

/// Ordered, immutable list of known movies.
///
/// Positions are stable for the lifetime of the process; a position is the
/// row index into the matching [`SimilarityMatrix`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
}

impl Catalog {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        Self { movies }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Get the movie at a catalog position
    pub fn get(&self, index: usize) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    /// Position of the first movie whose title equals `title` exactly.
    ///
    /// No case folding or whitespace normalisation: "Heat" and "heat" are
    /// different titles.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.movies.iter().position(|m| m.title == title)
    }

    /// Case-insensitive substring search over titles, in catalog order
    pub fn search(&self, query: &str) -> Vec<&MovieRecord> {
        let query = query.to_lowercase();
        self.movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&query))
            .collect()
    }
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Square matrix of precomputed pairwise similarity scores.
///
/// Stored row-major in a single allocation. Symmetry is not assumed; a query
/// for movie `i` only ever reads row `i`.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build from a flat row-major buffer of `size * size` scores.
    ///
    /// Returns `None` if the buffer length doesn't match.
    pub fn from_flat(size: usize, scores: Vec<f64>) -> Option<Self> {
        (size.checked_mul(size)? == scores.len()).then_some(Self { size, scores })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Scores of every movie relative to the movie at `index`
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.size {
            return None;
        }
        let start = index * self.size;
        Some(&self.scores[start..start + self.size])
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.row(row)?.get(col).copied()
    }
}
