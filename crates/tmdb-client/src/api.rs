//! Transport layer for the TMDB API.
//!
//! [`MovieApi`] is the seam between the retrying client and the network;
//! [`TmdbApi`] is the real reqwest-backed implementation.

use async_trait::async_trait;
use catalog::MovieId;
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{MetadataFetchError, Result};
use crate::types::TmdbMovie;

/// One attempt at fetching a movie's details and videos
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn get_movie(&self, movie_id: MovieId) -> Result<TmdbMovie>;
}

/// reqwest client for TMDB v3
#[derive(Debug, Clone)]
pub struct TmdbApi {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbApi {
    /// Build a client; `timeout` bounds every single HTTP attempt
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key: api_key.into(),
            api_url: api_url.into(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.timeout(),
        )
    }

    fn movie_url(&self, movie_id: MovieId) -> String {
        format!("{}/movie/{}", self.api_url.trim_end_matches('/'), movie_id)
    }
}

#[async_trait]
impl MovieApi for TmdbApi {
    async fn get_movie(&self, movie_id: MovieId) -> Result<TmdbMovie> {
        let response = self
            .http_client
            .get(self.movie_url(movie_id))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", "en-US"),
                ("append_to_response", "videos"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataFetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response_text = response.text().await?;
        debug!(movie_id, bytes = response_text.len(), "TMDB response received");

        serde_json::from_str(&response_text)
            .map_err(|e| MetadataFetchError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // ============================================================================
    // Mock TMDB Service
    // ============================================================================

    /// Serve one canned HTTP response per connection on a random port.
    ///
    /// Returns the base URL and the request lines received so far.
    async fn start_mock_tmdb(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, Arc<Mutex<Vec<String>>>, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock TMDB service");
        let addr = listener.local_addr().expect("Failed to get local address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = requests.clone();
        let handle = tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                // Read until the end of the request head
                while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf[read..]).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => read += n,
                    }
                }
                let head = String::from_utf8_lossy(&buf[..read]).to_string();
                if let Some(line) = head.lines().next() {
                    seen.lock().unwrap().push(line.to_string());
                }

                let response = format!(
                    "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), requests, handle)
    }

    #[tokio::test]
    async fn test_get_movie_sends_expected_request() {
        let (url, requests, handle) = start_mock_tmdb(
            "HTTP/1.1 200 OK",
            r#"{"poster_path": "/p.jpg", "release_date": "2010-07-15", "genres": [{"name": "Action"}]}"#,
        )
        .await;

        let api = TmdbApi::new("test_key", url, Duration::from_secs(5)).unwrap();
        let movie = api.get_movie(27205).await.expect("fetch should succeed");

        assert_eq!(movie.poster_path.as_deref(), Some("/p.jpg"));
        assert_eq!(movie.release_date.as_deref(), Some("2010-07-15"));

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request_line = &requests[0];
        assert!(request_line.starts_with("GET /movie/27205?"));
        assert!(request_line.contains("api_key=test_key"));
        assert!(request_line.contains("language=en-US"));
        assert!(request_line.contains("append_to_response=videos"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_get_movie_non_success_status() {
        let (url, _requests, handle) = start_mock_tmdb(
            "HTTP/1.1 404 Not Found",
            r#"{"status_message": "The resource you requested could not be found."}"#,
        )
        .await;

        let api = TmdbApi::new("test_key", url, Duration::from_secs(5)).unwrap();
        let result = api.get_movie(1).await;

        match result {
            Err(MetadataFetchError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("could not be found"));
            }
            other => panic!("expected status error, got {:?}", other),
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_get_movie_invalid_body() {
        let (url, _requests, handle) = start_mock_tmdb("HTTP/1.1 200 OK", "<html>oops</html>").await;

        let api = TmdbApi::new("test_key", url, Duration::from_secs(5)).unwrap();
        let result = api.get_movie(1).await;

        assert!(matches!(result, Err(MetadataFetchError::InvalidResponse(_))));

        handle.abort();
    }

    #[tokio::test]
    async fn test_get_movie_times_out() {
        // Accept connections but never answer
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let mut sockets = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                sockets.push(socket);
            }
        });

        let api = TmdbApi::new("test_key", format!("http://{}", addr), Duration::from_millis(200))
            .unwrap();
        let result = api.get_movie(1).await;

        match result {
            Err(MetadataFetchError::Http(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {:?}", other),
        }

        handle.abort();
    }

    #[test]
    fn test_movie_url_trims_trailing_slash() {
        let api = TmdbApi::new("k", "https://api.themoviedb.org/3/", Duration::from_secs(5)).unwrap();
        assert_eq!(api.movie_url(550), "https://api.themoviedb.org/3/movie/550");
    }
}
