use std::path::PathBuf;

use thiserror::Error;

/// Application-level error type shared by the API client and the controller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed ranking payload: {0}")]
    Parse(#[from] serde_json::Error),
}
