//! Episode descriptors and the file names they are stored under.

/// One playable entry of the feed, numbered in chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub title: String,
    pub enclosure_url: String,
    /// 1-based position once the feed is ordered oldest-first.
    pub sequence_index: usize,
}

impl Episode {
    pub fn new(
        title: impl Into<String>,
        enclosure_url: impl Into<String>,
        sequence_index: usize,
    ) -> Self {
        Self {
            title: title.into(),
            enclosure_url: enclosure_url.into(),
            sequence_index,
        }
    }

    pub fn sanitized_title(&self) -> String {
        sanitize_title(&self.title)
    }

    /// `007_Some_Title`, the name used in console output.
    pub fn stem(&self) -> String {
        format!("{:03}_{}", self.sequence_index, self.sanitized_title())
    }

    pub fn file_name(&self) -> String {
        format!("{}.mp3", self.stem())
    }
}

/// Reduces a title to ASCII letters, digits, `_` and `-`, with every
/// whitespace run turned into a single underscore.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join("_")
}
