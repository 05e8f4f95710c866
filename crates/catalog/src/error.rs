//! Error types for the catalog crate.
//!
//! Every variant is fatal to startup: the recommender cannot run without a
//! well-formed catalog and similarity matrix.

use thiserror::Error;

/// Errors that can occur while loading the catalog artifacts
#[derive(Error, Debug)]
pub enum LoadError {
    /// Artifact could not be found on disk
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading an artifact
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Artifact content couldn't be decoded
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// A row of the similarity matrix has the wrong number of columns
    #[error("Similarity matrix is not square: row {row} has {found} columns, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Catalog and matrix disagree on the number of movies
    #[error("Catalog has {catalog} movies but similarity matrix has {matrix} rows")]
    DimensionMismatch { catalog: usize, matrix: usize },

    /// Matrix contains NaN or infinity
    #[error("Non-finite similarity score at [{row}][{col}]")]
    NonFiniteScore { row: usize, col: usize },

    /// Catalog has no movies
    #[error("Catalog is empty")]
    Empty,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, LoadError>;
