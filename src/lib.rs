//! Archive a podcast feed: every episode downloaded once, numbered oldest
//! first, with files already on disk left alone.

pub mod archive;
pub mod cli;
pub mod config;
pub mod downloader;
pub mod episode;
pub mod error;
pub mod feed;
pub mod logging;

pub use archive::{Archiver, Failure, Outcome, Summary};
pub use config::{Config, PartialFiles};
pub use downloader::Downloader;
pub use episode::{sanitize_title, Episode};
pub use error::{DownloadError, FeedFetchError};
