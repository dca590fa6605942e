use chrono::{DateTime, Utc};
use tracing::info;

use super::overview::{OverviewStatus, synthesize_overview};
use super::select::{SelectionWindow, select_recent};
use super::summarize::summarize_articles;
use crate::ai::CompletionService;
use crate::core::config::DigestConfig;
use crate::errors::DigestError;
use crate::feeds::{FeedClient, ingest_feeds};
use crate::storage::AuditSink;
use crate::telegram::MessagingSink;

/// The four collaborators a run talks to.
pub struct Services<'a> {
    pub feeds: &'a dyn FeedClient,
    pub completion: &'a dyn CompletionService,
    pub messenger: &'a dyn MessagingSink,
    pub audit: &'a dyn AuditSink,
}

/// Where a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    NoArticles,
    NoRecentArticles,
    NoSuccesses,
    OverviewAttempted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub fetched: usize,
    pub selected: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub delivery_failures: usize,
    pub overview: OverviewStatus,
}

impl RunReport {
    fn stopped(outcome: RunOutcome, fetched: usize) -> Self {
        Self {
            outcome,
            fetched,
            selected: 0,
            succeeded: 0,
            failed: 0,
            delivery_failures: 0,
            overview: OverviewStatus::Skipped,
        }
    }
}

/// Run one full digest: ingest, snapshot, select, summarize, snapshot, overview.
///
/// `now` is the run start; it fixes the selection cutoff and the overview date.
///
/// # Errors
///
/// Only audit snapshot failures propagate. Every per-feed and per-article
/// problem is absorbed into the report.
pub async fn run_digest(
    services: &Services<'_>,
    config: &DigestConfig,
    now: DateTime<Utc>,
) -> Result<RunReport, DigestError> {
    let articles = ingest_feeds(services.feeds, &config.feeds).await;
    let fetched = articles.len();

    if articles.is_empty() {
        info!("No articles found in any RSS feeds.");
        return Ok(RunReport::stopped(RunOutcome::NoArticles, fetched));
    }

    services.audit.save_fetched(&articles, Utc::now())?;

    let selection = select_recent(articles, now, &SelectionWindow::from(config));

    if selection.is_empty() {
        info!(
            "No articles found in the last {} hours. All fetched articles were saved to {}.",
            config.hours_lookback,
            config.storage_dir.display()
        );
        return Ok(RunReport::stopped(RunOutcome::NoRecentArticles, fetched));
    }

    let selected = selection.selected.len();
    let output = summarize_articles(
        services.completion,
        services.messenger,
        selection.selected,
        config.completion.article_max_tokens,
    )
    .await;

    if !output.processed.is_empty() {
        services.audit.save_processed(&output.processed, Utc::now())?;
    }

    let overview = synthesize_overview(
        services.completion,
        services.messenger,
        &output.summaries,
        now.date_naive(),
        config.completion.overview_max_tokens,
    )
    .await;

    let outcome = if overview.was_attempted() {
        RunOutcome::OverviewAttempted
    } else {
        RunOutcome::NoSuccesses
    };

    info!(
        "Done. Processed {} articles successfully.",
        output.succeeded()
    );

    Ok(RunReport {
        outcome,
        fetched,
        selected,
        succeeded: output.succeeded(),
        failed: output.failed(),
        delivery_failures: output.delivery_failures,
        overview,
    })
}
