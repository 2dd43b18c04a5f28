use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::archive::Archiver;
use crate::config::{Config, PartialFiles};

#[derive(Debug, Parser)]
#[command(name = "podarchive")]
#[command(about = "Download every episode of a podcast feed, numbered oldest first")]
pub struct Cli {
    /// RSS feed to archive
    #[arg(long)]
    pub feed_url: Option<String>,

    /// Directory the episodes are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Config file (defaults to $XDG_CONFIG_HOME/podarchive/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep or remove files left by an interrupted download
    #[arg(long, value_enum)]
    pub partial_files: Option<PartialFiles>,

    /// Hide download progress bars
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Layers the command line flags over a loaded config.
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(feed_url) = self.feed_url {
            config.feed_url = feed_url;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(partial_files) = self.partial_files {
            config.partial_files = partial_files;
        }
        config.quiet |= self.quiet;
        config
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let config = cli.apply(config);

    let archiver = Archiver::new(&config).context("building HTTP client")?;
    let summary = archiver
        .sync()
        .await
        .with_context(|| format!("cannot read feed {}", config.feed_url))?;

    println!(
        "Done: {} episodes, {} downloaded, {} skipped, {} failed",
        summary.total(),
        summary.downloaded,
        summary.skipped,
        summary.failed.len()
    );

    Ok(())
}
