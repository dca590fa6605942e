use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use super::AuditSink;
use crate::core::models::{ArticleRecord, Snapshot};
use crate::errors::DigestError;

pub const FETCHED_PREFIX: &str = "fetched_articles";
pub const PROCESSED_PREFIX: &str = "summaries";

/// Stores snapshots as pretty-printed JSON files in one directory.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    dir: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<prefix>_<YYYY-mm-dd_HH-MM-SS>.json`
    #[must_use]
    pub fn snapshot_path(&self, prefix: &str, at: DateTime<Utc>) -> PathBuf {
        self.dir
            .join(format!("{prefix}_{}.json", at.format("%Y-%m-%d_%H-%M-%S")))
    }

    fn write(
        &self,
        prefix: &str,
        articles: &[ArticleRecord],
        at: DateTime<Utc>,
    ) -> Result<PathBuf, DigestError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            DigestError::Storage(format!("failed to create {}: {e}", self.dir.display()))
        })?;

        let path = self.snapshot_path(prefix, at);
        let body = serde_json::to_string_pretty(&Snapshot::new(articles, at))?;
        fs::write(&path, body).map_err(|e| {
            DigestError::Storage(format!("failed to write {}: {e}", path.display()))
        })?;

        Ok(path)
    }
}

impl AuditSink for JsonSnapshotStore {
    fn save_fetched(
        &self,
        articles: &[ArticleRecord],
        at: DateTime<Utc>,
    ) -> Result<PathBuf, DigestError> {
        let path = self.write(FETCHED_PREFIX, articles, at)?;
        info!(
            "Saved {} fetched articles to {}",
            articles.len(),
            path.display()
        );
        Ok(path)
    }

    fn save_processed(
        &self,
        articles: &[ArticleRecord],
        at: DateTime<Utc>,
    ) -> Result<PathBuf, DigestError> {
        let path = self.write(PROCESSED_PREFIX, articles, at)?;
        info!("Saved {} summaries to {}", articles.len(), path.display());
        Ok(path)
    }
}
