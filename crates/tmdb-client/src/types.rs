//! Enrichment data and the TMDB wire format it is parsed from.

use serde::{Deserialize, Serialize};

/// Prefix for poster paths returned by TMDB
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Watch URL prefix for YouTube video keys
pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Release year shown when TMDB has no release date
pub const UNKNOWN_YEAR: &str = "N/A";

/// TMDB movie genre names, as offered for filtering
pub const TMDB_GENRES: [&str; 19] = [
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Music",
    "Mystery",
    "Romance",
    "Science Fiction",
    "TV Movie",
    "Thriller",
    "War",
    "Western",
];

/// Metadata for one movie, fetched per request.
///
/// A value with every optional field empty is the "unavailable" state
/// produced when all fetch attempts fail; it is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub poster_url: Option<String>,
    pub overview: Option<String>,
    /// TMDB vote average, 0-10
    pub rating: Option<f32>,
    /// Four-digit year, or "N/A"
    pub release_year: String,
    /// Genre names in TMDB order, without duplicates
    pub genres: Vec<String>,
    pub trailer_url: Option<String>,
}

impl MovieDetails {
    /// Details for a movie whose metadata could not be fetched
    pub fn unavailable() -> Self {
        Self {
            poster_url: None,
            overview: None,
            rating: None,
            release_year: UNKNOWN_YEAR.to_string(),
            genres: Vec::new(),
            trailer_url: None,
        }
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

impl Default for MovieDetails {
    fn default() -> Self {
        Self::unavailable()
    }
}

// =============================================================================
// TMDB wire format
// =============================================================================

/// Response of `GET /movie/{id}?append_to_response=videos`
///
/// Every field is optional; TMDB omits or nulls fields freely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovie {
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f32>,
    pub release_date: Option<String>,
    pub genres: Option<Vec<TmdbGenre>>,
    pub videos: Option<TmdbVideos>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbVideo {
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub key: String,
}

impl From<TmdbMovie> for MovieDetails {
    fn from(movie: TmdbMovie) -> Self {
        let videos = movie.videos.map(|v| v.results).unwrap_or_default();
        Self {
            poster_url: poster_url(movie.poster_path.as_deref()),
            overview: movie.overview,
            rating: movie.vote_average,
            release_year: release_year(movie.release_date.as_deref()),
            genres: genre_names(movie.genres.unwrap_or_default()),
            trailer_url: trailer_url(&videos),
        }
    }
}

/// Genre names in response order, keeping the first of any duplicates
fn genre_names(genres: Vec<TmdbGenre>) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(genres.len());
    for genre in genres {
        if !names.contains(&genre.name) {
            names.push(genre.name);
        }
    }
    names
}

/// Full poster URL, or `None` when TMDB has no poster
pub fn poster_url(poster_path: Option<&str>) -> Option<String> {
    poster_path
        .filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", POSTER_BASE_URL, p))
}

/// Year part of a `YYYY-MM-DD` release date
///
/// Example: "2010-05-14" -> "2010"
///          None or "" -> "N/A"
pub fn release_year(release_date: Option<&str>) -> String {
    match release_date {
        Some(date) if !date.is_empty() => date.split('-').next().unwrap_or(date).to_string(),
        _ => UNKNOWN_YEAR.to_string(),
    }
}

/// First YouTube trailer, in API order
pub fn trailer_url(videos: &[TmdbVideo]) -> Option<String> {
    videos
        .iter()
        .find(|v| v.video_type == "Trailer" && v.site == "YouTube")
        .map(|v| format!("{}{}", YOUTUBE_WATCH_URL, v.key))
}
