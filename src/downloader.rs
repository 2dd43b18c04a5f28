use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{header, Client};
use std::{path::Path, time::Duration};
use tokio::{
    fs::{remove_file, OpenOptions},
    io::AsyncWriteExt,
};

use crate::config::{Config, PartialFiles};
use crate::error::DownloadError;

const PROGRESS_TEMPLATE: &str =
    "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

/// Fetches episode audio and streams it to disk.
pub struct Downloader {
    client: Client,
    user_agent: String,
    partial_files: PartialFiles,
    quiet: bool,
}

impl Downloader {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(20))
            .user_agent(concat!("podarchive/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            user_agent: config.user_agent.clone(),
            partial_files: config.partial_files,
            quiet: config.quiet,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Downloads `url` into a new file at `dest` and returns the number of
    /// bytes written. A non-2xx response fails before anything is created.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        let res = self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::ACCEPT, "audio/*,*/*;q=0.8")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.5")
            .send()
            .await
            .map_err(DownloadError::Request)?;

        let status = res.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                status,
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let pb = self.progress_bar(res.content_length());

        let result = write_stream(res.bytes_stream(), dest, &pb).await;

        match &result {
            Ok(written) => {
                pb.finish_and_clear();
                tracing::debug!(path = %dest.display(), bytes = written, "download complete");
            }
            Err(err) => {
                pb.abandon();
                if err.left_partial_file() && self.partial_files == PartialFiles::Remove {
                    self.discard_partial(dest).await;
                }
            }
        }

        result
    }

    async fn discard_partial(&self, dest: &Path) {
        match remove_file(dest).await {
            Ok(()) => tracing::info!(path = %dest.display(), "removed partial file"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %dest.display(), error = %err, "could not remove partial file")
            }
        }
    }

    fn progress_bar(&self, total: Option<u64>) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total.unwrap_or(0));
        match ProgressStyle::with_template(PROGRESS_TEMPLATE) {
            Ok(style) => pb.set_style(style.progress_chars("#>-")),
            Err(err) => tracing::debug!(error = %err, "invalid progress template"),
        }
        pb
    }
}

/// Copies a body stream chunk by chunk into a freshly created file. An
/// existing file at `dest` is never overwritten.
pub async fn write_stream<S>(
    mut stream: S,
    dest: &Path,
    pb: &ProgressBar,
) -> Result<u64, DownloadError>
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Unpin,
{
    let write_err = |source: std::io::Error| DownloadError::Write {
        path: dest.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
        .await
        .map_err(write_err)?;
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| DownloadError::Interrupted { written, source })?;
        file.write_all(&chunk).await.map_err(write_err)?;
        written += chunk.len() as u64;
        pb.set_position(written);
    }

    file.flush().await.map_err(write_err)?;

    Ok(written)
}
