//! Write-only audit snapshots of each run

pub mod snapshot;

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::core::models::ArticleRecord;
use crate::errors::DigestError;

/// Checkpoint persistence. Nothing written here is ever read back by a run.
pub trait AuditSink: Send + Sync {
    /// Persist every record the ingestor produced, dated or not.
    fn save_fetched(
        &self,
        articles: &[ArticleRecord],
        at: DateTime<Utc>,
    ) -> Result<PathBuf, DigestError>;

    /// Persist every record that went through the summarization loop.
    fn save_processed(
        &self,
        articles: &[ArticleRecord],
        at: DateTime<Utc>,
    ) -> Result<PathBuf, DigestError>;
}

pub use snapshot::JsonSnapshotStore;
