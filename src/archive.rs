//! The run loop: walk the episode list in order, skip what is already on
//! disk, download the rest one at a time.

use std::path::PathBuf;

use tokio::fs;

use crate::config::Config;
use crate::downloader::Downloader;
use crate::episode::Episode;
use crate::error::FeedFetchError;
use crate::feed;

/// How one episode ended up in this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped,
    Downloaded { bytes: u64 },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub sequence_index: usize,
    pub title: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub skipped: usize,
    pub downloaded: usize,
    pub failed: Vec<Failure>,
}

impl Summary {
    pub fn record(&mut self, episode: &Episode, outcome: &Outcome) {
        match outcome {
            Outcome::Skipped => self.skipped += 1,
            Outcome::Downloaded { .. } => self.downloaded += 1,
            Outcome::Failed { reason } => self.failed.push(Failure {
                sequence_index: episode.sequence_index,
                title: episode.title.clone(),
                reason: reason.clone(),
            }),
        }
    }

    pub fn total(&self) -> usize {
        self.skipped + self.downloaded + self.failed.len()
    }
}

pub struct Archiver {
    downloader: Downloader,
    feed_url: String,
    output_dir: PathBuf,
}

impl Archiver {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::with_downloader(Downloader::new(config)?, config))
    }

    pub fn with_downloader(downloader: Downloader, config: &Config) -> Self {
        Self {
            downloader,
            feed_url: config.feed_url.clone(),
            output_dir: config.output_dir.clone(),
        }
    }

    pub fn destination(&self, episode: &Episode) -> PathBuf {
        self.output_dir.join(episode.file_name())
    }

    /// Fetches the feed and archives every episode in it.
    ///
    /// Only a feed failure is returned as an error; episode failures are
    /// collected in the summary.
    pub async fn sync(&self) -> Result<Summary, FeedFetchError> {
        let episodes = feed::fetch_feed(self.downloader.client(), &self.feed_url).await?;
        Ok(self.run(&episodes).await)
    }

    pub async fn run(&self, episodes: &[Episode]) -> Summary {
        let mut summary = Summary::default();

        if let Err(err) = fs::create_dir_all(&self.output_dir).await {
            tracing::error!(dir = %self.output_dir.display(), error = %err, "cannot create output directory");
        }

        for episode in episodes {
            let outcome = self.archive_episode(episode).await;
            summary.record(episode, &outcome);
        }

        tracing::info!(
            downloaded = summary.downloaded,
            skipped = summary.skipped,
            failed = summary.failed.len(),
            "run finished"
        );
        summary
    }

    pub async fn archive_episode(&self, episode: &Episode) -> Outcome {
        let dest = self.destination(episode);
        let stem = episode.stem();

        match fs::try_exists(&dest).await {
            Ok(true) => {
                println!("Skipped: {stem}");
                return Outcome::Skipped;
            }
            Ok(false) => {}
            Err(err) => return failed(episode, err.to_string()),
        }

        println!("Downloading: {stem}");
        match self.downloader.download(&episode.enclosure_url, &dest).await {
            Ok(bytes) => Outcome::Downloaded { bytes },
            Err(err) => failed(episode, err.to_string()),
        }
    }
}

fn failed(episode: &Episode, reason: String) -> Outcome {
    eprintln!("Error downloading {}: {reason}", episode.sanitized_title());
    Outcome::Failed { reason }
}
