//! Feed retrieval and conversion into an oldest-first episode list.

use reqwest::Client;
use rss::Channel;

use crate::episode::Episode;
use crate::error::FeedFetchError;

pub async fn fetch_feed(client: &Client, url: &str) -> Result<Vec<Episode>, FeedFetchError> {
    tracing::info!(url, "fetching feed");

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(FeedFetchError::Status(response.status()));
    }

    let content = response.bytes().await?;
    let episodes = parse_feed(&content)?;

    tracing::info!(count = episodes.len(), "feed parsed");
    Ok(episodes)
}

/// Parses an RSS document and returns its episodes oldest-first.
///
/// Feeds list their newest item first, so items are reversed before
/// numbering. An item without a title or an enclosure is skipped with a
/// warning, but it still occupies its number so later episodes keep the
/// file names they would have had otherwise.
pub fn parse_feed(content: &[u8]) -> Result<Vec<Episode>, FeedFetchError> {
    let channel = Channel::read_from(content)?;

    let episodes = channel
        .items()
        .iter()
        .rev()
        .enumerate()
        .filter_map(|(position, item)| {
            let sequence_index = position + 1;
            match (item.title(), item.enclosure()) {
                (Some(title), Some(enclosure)) => {
                    Some(Episode::new(title, enclosure.url(), sequence_index))
                }
                (title, enclosure) => {
                    tracing::warn!(
                        sequence_index,
                        title = title.unwrap_or("<untitled>"),
                        has_enclosure = enclosure.is_some(),
                        "skipping malformed feed entry"
                    );
                    None
                }
            }
        })
        .collect();

    Ok(episodes)
}
