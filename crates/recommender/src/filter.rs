//! Genre filter applied to enriched candidates.

use std::collections::BTreeSet;
use tmdb_client::MovieDetails;

/// Keeps only candidates sharing at least one genre with the selection.
///
/// An empty selection keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreFilter {
    genres: BTreeSet<String>,
}

impl GenreFilter {
    pub fn new<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            genres: genres.into_iter().map(Into::into).collect(),
        }
    }

    /// Filter that accepts every candidate
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.genres.is_empty()
    }

    pub fn accepts(&self, details: &MovieDetails) -> bool {
        !self.is_active() || details.genres.iter().any(|g| self.genres.contains(g))
    }
}

impl<S: Into<String>> FromIterator<S> for GenreFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details_with_genres(genres: &[&str]) -> MovieDetails {
        MovieDetails {
            genres: genres.iter().map(|g| g.to_string()).collect(),
            ..MovieDetails::unavailable()
        }
    }

    #[test]
    fn test_genre_filter() {
        let filter = GenreFilter::new(["Action", "Drama"]);

        assert!(filter.is_active());
        assert!(filter.accepts(&details_with_genres(&["Action", "Adventure"]))); // overlap
        assert!(filter.accepts(&details_with_genres(&["Drama"])));
        assert!(!filter.accepts(&details_with_genres(&["Science Fiction"]))); // no overlap
        assert!(!filter.accepts(&details_with_genres(&[])));
    }

    #[test]
    fn test_empty_filter_accepts_everything() {
        let filter = GenreFilter::none();

        assert!(!filter.is_active());
        assert!(filter.accepts(&details_with_genres(&["Horror"])));
        assert!(filter.accepts(&MovieDetails::unavailable()));
    }

    #[test]
    fn test_genre_names_are_exact() {
        let filter: GenreFilter = ["science fiction"].into_iter().collect();
        assert!(!filter.accepts(&details_with_genres(&["Science Fiction"])));
    }
}
