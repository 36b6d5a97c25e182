//! Message structure

use super::content::Content;
use chrono::{DateTime, Utc};

/// One log call, fully rendered and ready for the sinks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub timestamp: DateTime<Utc>,
    pub level: String,
    /// Verbosity rank of `level`; a sink with threshold `t` takes it iff `rank <= t`
    pub rank: usize,
    pub tags: Vec<String>,
    pub content: String,
    pub plain_content: String,
    pub call_site: Option<String>,
}

impl Message {
    pub fn new(level: impl Into<String>, rank: usize, content: Content) -> Self {
        Self {
            timestamp: Utc::now(),
            level: level.into(),
            rank,
            tags: Vec::new(),
            content: content.styled,
            plain_content: content.plain,
            call_site: None,
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn with_call_site(mut self, call_site: Option<String>) -> Self {
        self.call_site = call_site.filter(|site| !site.is_empty());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Dotted tag path, e.g. `server.requests`
    pub fn tag_path(&self) -> String {
        self.tags.join(".")
    }

    /// Whether a sink with `threshold` accepts this message
    pub fn passes(&self, threshold: usize) -> bool {
        self.rank <= threshold
    }
}
