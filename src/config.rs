use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_FEED_URL: &str = "https://rss.art19.com/super-simple-podcast";

/// Sent with episode requests. Some tracking redirectors only hand out the
/// media file to clients that look like a browser.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// What to do with a file left behind by a transfer that broke off midway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PartialFiles {
    Keep,
    /// Delete it, so the next run downloads the episode again instead of
    /// skipping a truncated file.
    #[default]
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub feed_url: String,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub partial_files: PartialFiles,
    /// Hide per-download progress bars.
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            output_dir: PathBuf::from("./episodes"),
            user_agent: BROWSER_USER_AGENT.to_string(),
            partial_files: PartialFiles::default(),
            quiet: false,
        }
    }
}

impl Config {
    /// Loads the config file at `path`, or the one in the XDG config
    /// directory when no path is given. A missing XDG file means defaults;
    /// a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// `$XDG_CONFIG_HOME/podarchive/config.toml`, if it exists.
fn default_config_path() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix("podarchive")
        .ok()?
        .find_config_file("config.toml")
}
