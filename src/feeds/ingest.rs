use tracing::{info, warn};

use super::FeedClient;
use crate::core::models::{ArticleRecord, FeedSource};

/// Fetch every configured source in order and normalize its entries.
///
/// A source that fails, whether malformed or unreachable, contributes nothing
/// and does not stop the remaining sources. Entries syndicated by several
/// feeds are kept once per feed.
pub async fn ingest_feeds(client: &dyn FeedClient, feeds: &[FeedSource]) -> Vec<ArticleRecord> {
    info!("Checking {} RSS feeds", feeds.len());

    let mut articles = Vec::new();
    for feed in feeds {
        info!("Checking feed: {}", feed.name);

        match client.fetch_entries(&feed.url).await {
            Ok(entries) => {
                info!("  Found {} articles in {}", entries.len(), feed.name);
                articles.extend(
                    entries
                        .into_iter()
                        .map(|entry| ArticleRecord::from_entry(&feed.name, entry)),
                );
            }
            Err(e) if e.is_malformed_feed() => {
                warn!("  Skipping {}: feed parsing issue - {}", feed.name, e);
            }
            Err(e) => {
                warn!("  Skipping {}: error fetching feed - {}", feed.name, e);
            }
        }
    }

    info!("Fetched {} articles in total", articles.len());
    articles
}
