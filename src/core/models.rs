use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder title for entries that arrive without one.
pub const UNTITLED: &str = "No title";

/// A named feed endpoint from the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// One entry as handed back by the feed collaborator.
///
/// Every field is optional; callers must default explicitly. `published` is
/// already normalized to UTC so nothing downstream re-parses time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

/// One feed entry tracked through a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub feed_name: String,
    pub title: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
}

impl ArticleRecord {
    #[must_use]
    pub fn from_entry(feed_name: &str, entry: FeedEntry) -> Self {
        Self {
            feed_name: feed_name.to_string(),
            title: entry
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| UNTITLED.to_string()),
            link: entry.link.unwrap_or_default(),
            published_at: entry.published,
            description: entry.description.unwrap_or_default(),
            summary: None,
            error: None,
            processed_at: None,
        }
    }

    pub fn mark_summarized(&mut self, summary: String, at: DateTime<Utc>) {
        self.summary = Some(summary);
        self.error = None;
        self.processed_at = Some(at);
    }

    pub fn mark_failed(&mut self, error: String, at: DateTime<Utc>) {
        self.summary = None;
        self.error = Some(error);
        self.processed_at = Some(at);
    }

    #[must_use]
    pub fn is_processed(&self) -> bool {
        self.processed_at.is_some()
    }

    #[must_use]
    pub fn is_summarized(&self) -> bool {
        self.summary.is_some()
    }
}

/// Body of an audit snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub total_count: usize,
    pub articles: Vec<ArticleRecord>,
}

impl Snapshot {
    #[must_use]
    pub fn new(articles: &[ArticleRecord], timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            total_count: articles.len(),
            articles: articles.to_vec(),
        }
    }
}
