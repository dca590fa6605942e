//! Feed collaborator seam and the ingestion stage

pub mod fetcher;
pub mod ingest;

use async_trait::async_trait;

use crate::core::models::FeedEntry;
use crate::errors::DigestError;

/// Source of normalized feed entries.
///
/// Implementations report a body that could not be parsed as
/// [`DigestError::FeedParse`] and every transport problem as another variant.
#[async_trait]
pub trait FeedClient: Send + Sync {
    async fn fetch_entries(&self, url: &str) -> Result<Vec<FeedEntry>, DigestError>;
}

pub use fetcher::HttpFeedClient;
pub use ingest::ingest_feeds;
