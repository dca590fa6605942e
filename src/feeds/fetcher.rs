//! HTTP feed fetcher backed by `feed-rs`.

use std::time::Duration;

use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;

use super::FeedClient;
use crate::core::models::FeedEntry;
use crate::errors::DigestError;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

const USER_AGENT: &str = concat!("newsbrief/", env!("CARGO_PKG_VERSION"), " (RSS Reader)");

pub struct HttpFeedClient {
    client: Client,
}

impl HttpFeedClient {
    pub fn new(timeout: Duration) -> Result<Self, DigestError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DigestError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn fetch_entries(&self, url: &str) -> Result<Vec<FeedEntry>, DigestError> {
        let url = url::Url::parse(url)
            .map_err(|e| DigestError::Http(format!("invalid feed URL {url}: {e}")))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DigestError::Http(format!("failed to fetch feed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DigestError::Http(format!("HTTP error: {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DigestError::Http(format!("failed to read response: {e}")))?;

        parse_entries(&bytes)
    }
}

/// Parse a feed body into entries, keeping every field optional.
pub fn parse_entries(bytes: &[u8]) -> Result<Vec<FeedEntry>, DigestError> {
    let feed = parser::parse(bytes).map_err(|e| DigestError::FeedParse(e.to_string()))?;

    let entries = feed
        .entries
        .into_iter()
        .map(|entry| FeedEntry {
            title: entry.title.map(|t| t.content),
            link: entry.links.first().map(|l| l.href.clone()),
            published: entry.published,
            description: entry
                .summary
                .map(|t| t.content)
                .or(entry.content.and_then(|c| c.body)),
        })
        .collect();

    Ok(entries)
}
