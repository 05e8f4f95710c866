use anyhow::{Context, Result};
use catalog::{CatalogStore, MovieId};
use clap::{Parser, Subcommand};
use colored::Colorize;
use recommender::{GenreFilter, RecommendError, Recommendation, RecommendationEngine, ScanLimits};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tmdb_client::{
    ClientConfig, MetadataClient, MetadataFetchError, MovieDetails, Reporter, TMDB_GENRES,
};

/// Characters of overview shown on a recommendation card
const OVERVIEW_PREVIEW_CHARS: usize = 200;

/// Maximum titles listed by `search`
const SEARCH_RESULT_LIMIT: usize = 20;

/// MovieMatch - content-based movie recommendations
#[derive(Parser)]
#[command(name = "movie-match")]
#[command(about = "Find movies similar to one you like, enriched with TMDB details", long_about = None)]
struct Cli {
    /// Directory holding movies.json and similarity.json
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Exact catalog title of the movie you like
        #[arg(long)]
        title: String,

        /// Only keep movies in at least one of these genres (repeatable)
        #[arg(long = "genre")]
        genres: Vec<String>,

        /// Metadata fetches in flight at once
        #[arg(long, default_value = "1")]
        concurrency: usize,

        /// Print recommendations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search catalog titles (case-insensitive substring match)
    Search {
        #[arg(long)]
        query: String,
    },

    /// Show TMDB details for a single movie
    Details {
        #[arg(long)]
        movie_id: MovieId,

        /// Print details as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the genres accepted by --genre
    Genres,
}

/// Prints fetch failures to the terminal in place of the tracing warning
struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn fetch_failed(&self, movie_id: MovieId, error: &MetadataFetchError) {
        eprintln!("{}", failure_message(movie_id, error).yellow());
    }
}

fn failure_message(movie_id: MovieId, error: &MetadataFetchError) -> String {
    format!("Could not fetch details for movie ID {}. Error: {}", movie_id, error)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend {
            title,
            genres,
            concurrency,
            json,
        } => handle_recommend(&cli.data_dir, &title, genres, concurrency, json).await?,
        Commands::Search { query } => handle_search(&cli.data_dir, &query)?,
        Commands::Details { movie_id, json } => handle_details(movie_id, json).await?,
        Commands::Genres => handle_genres(),
    }

    Ok(())
}

fn load_store(data_dir: &Path) -> Result<CatalogStore> {
    eprintln!("Loading catalog from {}...", data_dir.display());
    let start = Instant::now();
    let store = CatalogStore::new(data_dir);
    let (catalog, _) = store
        .load()
        .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;
    eprintln!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );
    Ok(store)
}

fn metadata_client() -> Result<MetadataClient> {
    let config = ClientConfig::from_env()?;
    let client = MetadataClient::from_config(&config).context("Failed to build TMDB client")?;
    Ok(client.with_reporter(Arc::new(ConsoleReporter)))
}

/// Handle the 'recommend' command
async fn handle_recommend(
    data_dir: &Path,
    title: &str,
    genres: Vec<String>,
    concurrency: usize,
    json: bool,
) -> Result<()> {
    let store = load_store(data_dir)?;
    let engine = RecommendationEngine::from_store(&store, metadata_client()?)?
        .with_limits(ScanLimits::default().with_fetch_concurrency(concurrency));
    let filter = GenreFilter::new(genres);

    eprintln!("Fetching recommendations...");
    let recommendations = match engine.recommend(title, &filter).await {
        Ok(recommendations) => recommendations,
        Err(RecommendError::TitleNotFound(_)) => {
            println!("{}", "Movie not found in database.".red());
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else if recommendations.is_empty() {
        println!("No recommendations found matching your criteria.");
    } else {
        print_recommendations(title, &recommendations);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(data_dir: &Path, query: &str) -> Result<()> {
    let store = load_store(data_dir)?;
    let (catalog, _) = store.load()?;

    let matches = catalog.search(query);
    if matches.is_empty() {
        println!("No movies found with that name.");
        return Ok(());
    }

    println!("{}", format!("Search results for '{}':", query).bold().blue());
    for movie in matches.iter().take(SEARCH_RESULT_LIMIT) {
        println!("{}: {}", movie.id.to_string().green(), movie.title);
    }
    if matches.len() > SEARCH_RESULT_LIMIT {
        println!("... and {} more", matches.len() - SEARCH_RESULT_LIMIT);
    }
    Ok(())
}

/// Handle the 'details' command
async fn handle_details(movie_id: MovieId, json: bool) -> Result<()> {
    let details = metadata_client()?.fetch(movie_id).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        print_card(&format!("Movie {}", movie_id), &details);
    }
    Ok(())
}

/// Handle the 'genres' command
fn handle_genres() {
    println!("{}", "Available genres:".bold().blue());
    for genre in TMDB_GENRES {
        println!("  - {}", genre);
    }
}

fn print_recommendations(title: &str, recommendations: &[Recommendation]) {
    println!(
        "{}",
        format!("Movies similar to '{}':", title).bold().blue()
    );
    for (rank, rec) in recommendations.iter().enumerate() {
        print!("{}. ", (rank + 1).to_string().green());
        print_card(&rec.title, &rec.details);
    }
    println!("{}", "---".dimmed());
}

fn print_card(title: &str, details: &MovieDetails) {
    println!("{} ({})", title.bold(), details.release_year);
    println!("   {}", overview_preview(details.overview.as_deref()));
    if let Some(rating) = details.rating {
        println!("   Rating: {}/10", rating);
    }
    if let Some(genres) = genre_line(details) {
        println!("   Genres: {}", genres);
    }
    match &details.poster_url {
        Some(url) => println!("   Poster: {}", url),
        None => println!("   {}", "Poster not available".italic()),
    }
    match &details.trailer_url {
        Some(url) => println!("   Trailer: {}", url),
        None => println!("   {}", "Trailer not available".italic()),
    }
    println!();
}

/// Genres in TMDB order, or `None` when there are none
fn genre_line(details: &MovieDetails) -> Option<String> {
    (!details.genres.is_empty()).then(|| details.genres.join(", "))
}

/// First 200 characters of the overview followed by "..."
fn overview_preview(overview: Option<&str>) -> String {
    match overview {
        Some(text) if !text.is_empty() => {
            let preview: String = text.chars().take(OVERVIEW_PREVIEW_CHARS).collect();
            format!("{}...", preview)
        }
        _ => "No overview available.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_preview() {
        assert_eq!(overview_preview(Some("A thief.")), "A thief....");
        assert_eq!(overview_preview(None), "No overview available.");
        assert_eq!(overview_preview(Some("")), "No overview available.");

        let long = "é".repeat(300);
        let preview = overview_preview(Some(&long));
        assert_eq!(preview.chars().count(), OVERVIEW_PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_genre_line_keeps_tmdb_order() {
        let details = MovieDetails {
            genres: vec!["Thriller".to_string(), "Action".to_string()],
            ..MovieDetails::unavailable()
        };
        assert_eq!(genre_line(&details).as_deref(), Some("Thriller, Action"));
        assert_eq!(genre_line(&MovieDetails::unavailable()), None);
    }

    #[test]
    fn test_failure_message() {
        let error = MetadataFetchError::Status {
            status: 404,
            body: "not found".to_string(),
        };
        let message = failure_message(603, &error);
        assert!(message.starts_with("Could not fetch details for movie ID 603. Error: "));
        assert!(message.contains("404"));
    }

    #[test]
    fn test_cli_parses_repeated_genres() {
        let cli = Cli::try_parse_from([
            "movie-match",
            "recommend",
            "--title",
            "Avatar",
            "--genre",
            "Action",
            "--genre",
            "Science Fiction",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, PathBuf::from("data"));
        match cli.command {
            Commands::Recommend {
                title,
                genres,
                concurrency,
                json,
            } => {
                assert_eq!(title, "Avatar");
                assert_eq!(genres, vec!["Action", "Science Fiction"]);
                assert_eq!(concurrency, 1);
                assert!(!json);
            }
            _ => panic!("expected recommend"),
        }
    }
}
