// src/error.rs
// =============================================================================
// Errors that stop a run before (or right after) crawling.
//
// Everything that can go wrong with a single URL is recorded as a
// LinkOutcome instead; only setup problems end up here.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("invalid root URL '{url}': {reason}")]
    InvalidRootUrl { url: String, reason: String },

    #[error("invalid timeout {0}: must be a positive number of seconds")]
    InvalidTimeout(f64),

    #[error("could not read pattern file {}: {source}", path.display())]
    PatternFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("could not set up logging: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("could not write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
