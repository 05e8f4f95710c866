//! Parsers for the catalog artifacts.
//!
//! - movies.json: `[{"movie_id": 19995, "title": "Avatar"}, ...]`
//! - similarity.json: `[[1.0, 0.12, ...], [0.12, 1.0, ...], ...]`
//!
//! Both are produced offline by the pipeline that computed the similarity
//! matrix. Parsing only checks shape; cross-file checks live in the store.

use crate::error::{LoadError, Result};
use crate::types::{Catalog, MovieRecord, SimilarityMatrix};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole artifact, mapping a missing file to `FileNotFound`
fn read_artifact(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => LoadError::IoError(e),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the movies.json file
pub fn parse_movies(path: &Path) -> Result<Catalog> {
    let content = read_artifact(path)?;
    parse_movies_str(&content, &file_name(path))
}

/// Parse catalog rows from JSON text; `file` is only used in error messages
pub fn parse_movies_str(content: &str, file: &str) -> Result<Catalog> {
    let movies: Vec<MovieRecord> =
        serde_json::from_str(content).map_err(|e| LoadError::ParseError {
            file: file.to_string(),
            reason: e.to_string(),
        })?;
    Ok(Catalog::new(movies))
}

/// Parse the similarity.json file
pub fn parse_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let content = read_artifact(path)?;
    parse_similarity_str(&content, &file_name(path))
}

/// Parse a square score matrix from JSON text.
///
/// Rejects ragged rows. Scores are kept at full `f64` precision; numbers
/// outside the `f64` range fail to parse.
pub fn parse_similarity_str(content: &str, file: &str) -> Result<SimilarityMatrix> {
    let rows: Vec<Vec<f64>> =
        serde_json::from_str(content).map_err(|e| LoadError::ParseError {
            file: file.to_string(),
            reason: e.to_string(),
        })?;

    let size = rows.len();
    if let Some((row, found)) = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (i, r.len()))
        .find(|&(_, len)| len != size)
    {
        return Err(LoadError::NotSquare {
            row,
            expected: size,
            found,
        });
    }

    let scores: Vec<f64> = rows.into_iter().flatten().collect();
    SimilarityMatrix::from_flat(size, scores).ok_or_else(|| LoadError::ParseError {
        file: file.to_string(),
        reason: "score count does not match matrix size".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movies() {
        let json = r#"[
            {"movie_id": 19995, "title": "Avatar"},
            {"id": 285, "title": "Pirates of the Caribbean: At World's End", "tags": "ignored"}
        ]"#;

        let catalog = parse_movies_str(json, "movies.json").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().id, 19995);
        assert_eq!(catalog.get(1).unwrap().id, 285);
    }

    #[test]
    fn test_parse_movies_rejects_missing_title() {
        let result = parse_movies_str(r#"[{"movie_id": 1}]"#, "movies.json");
        assert!(matches!(result, Err(LoadError::ParseError { .. })));
    }

    #[test]
    fn test_parse_similarity() {
        let matrix = parse_similarity_str("[[1.0, 0.5], [0.25, 1.0]]", "similarity.json").unwrap();
        assert_eq!(matrix.size(), 2);
        assert_eq!(matrix.row(1).unwrap(), &[0.25, 1.0]);
        assert_eq!(matrix.get(0, 1), Some(0.5));
    }

    #[test]
    fn test_parse_similarity_rejects_ragged_rows() {
        let result = parse_similarity_str("[[1.0, 0.5], [0.25]]", "similarity.json");
        assert!(matches!(
            result,
            Err(LoadError::NotSquare { row: 1, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_parse_similarity_keeps_full_precision() {
        // Equal once rounded to f32
        let json = "[[1.0, 0.1234567891, 0.1234567892], [0.1, 1.0, 0.1], [0.1, 0.1, 1.0]]";
        let matrix = parse_similarity_str(json, "similarity.json").unwrap();

        let row = matrix.row(0).unwrap();
        assert_eq!(row[1], 0.1234567891);
        assert_eq!(row[2], 0.1234567892);
        assert!(row[2] > row[1]);
    }

    #[test]
    fn test_parse_similarity_rejects_out_of_range_scores() {
        let result = parse_similarity_str("[[1.0, 0.5], [1e400, 1.0]]", "similarity.json");
        assert!(matches!(result, Err(LoadError::ParseError { .. })));
    }

    #[test]
    fn test_parse_similarity_rejects_garbage() {
        let result = parse_similarity_str("not json", "similarity.json");
        assert!(matches!(result, Err(LoadError::ParseError { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = parse_movies(Path::new("/definitely/not/here/movies.json"));
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }
}
