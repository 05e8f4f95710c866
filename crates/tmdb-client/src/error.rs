use thiserror::Error;

/// Errors that can occur when talking to the metadata API.
///
/// These never escape [`MetadataClient::fetch`](crate::MetadataClient::fetch):
/// they are retried, then reported and degraded to unavailable details.
#[derive(Error, Debug)]
pub enum MetadataFetchError {
    /// Transport failure, including the per-request timeout
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Metadata API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from metadata API: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, MetadataFetchError>;
