use std::path::PathBuf;
use thiserror::Error;

/// Anything that stops a level from being fetched and saved.
///
/// Callers never recover from these; a failed level aborts the whole run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request to Overpass API: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Overpass API returned error status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Failed to read Overpass response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FetchError>;
