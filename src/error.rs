use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// The feed could not be retrieved or understood. Aborts the whole run.
#[derive(Debug, Error)]
pub enum FeedFetchError {
    #[error("feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("feed request failed with status {0}")]
    Status(StatusCode),

    #[error("feed is not valid RSS: {0}")]
    Parse(#[from] rss::Error),
}

/// A single episode could not be downloaded. The run carries on with the next one.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Fetch failed: {} {reason}", .status.as_u16())]
    Status { status: StatusCode, reason: String },

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("transfer interrupted after {written} bytes: {source}")]
    Interrupted {
        written: u64,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Whether bytes may already have reached the destination file.
    pub fn left_partial_file(&self) -> bool {
        match self {
            Self::Interrupted { .. } => true,
            // The destination was already there; nothing of ours was written.
            Self::Write { source, .. } => source.kind() != std::io::ErrorKind::AlreadyExists,
            Self::Status { .. } | Self::Request(_) => false,
        }
    }
}
