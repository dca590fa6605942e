use chrono::{DateTime, TimeDelta, Utc};
use tracing::info;

use crate::core::config::DigestConfig;
use crate::core::models::ArticleRecord;

/// Number of too-old articles echoed to the log before going quiet.
const SKIP_LOG_LIMIT: usize = 3;

/// Width at which titles are cut in skip lines.
const SKIP_TITLE_WIDTH: usize = 50;

/// Budget and lookback applied by [`select_recent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionWindow {
    pub max_articles: usize,
    pub hours_lookback: i64,
}

impl From<&DigestConfig> for SelectionWindow {
    fn from(config: &DigestConfig) -> Self {
        Self {
            max_articles: config.max_articles,
            hours_lookback: config.hours_lookback,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Selection {
    /// Newest first, at most `max_articles` long.
    pub selected: Vec<ArticleRecord>,
    /// Records inside the window before the budget cut.
    pub in_window: usize,
    /// Records dropped for being too old or undated.
    pub skipped: usize,
    pub cutoff: DateTime<Utc>,
}

impl Selection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Keep records published at or after `now - hours_lookback`, newest first,
/// truncated to the budget.
///
/// `now` is taken once by the caller so the whole pool is judged against the
/// same cutoff. Records with equal timestamps keep their input order.
#[must_use]
pub fn select_recent(
    articles: Vec<ArticleRecord>,
    now: DateTime<Utc>,
    window: &SelectionWindow,
) -> Selection {
    // an out-of-range lookback reaches back to the earliest representable instant
    let cutoff = TimeDelta::try_hours(window.hours_lookback)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    info!("Current time (UTC): {}", now.to_rfc3339());
    info!(
        "Cutoff time (UTC): {} (last {} hours)",
        cutoff.to_rfc3339(),
        window.hours_lookback
    );

    let mut skipped = 0usize;
    let mut too_old_logged = 0usize;
    let mut recent: Vec<(DateTime<Utc>, ArticleRecord)> = Vec::new();

    for article in articles {
        match article.published_at {
            Some(published) if published >= cutoff => recent.push((published, article)),
            Some(published) => {
                skipped += 1;
                if too_old_logged < SKIP_LOG_LIMIT {
                    too_old_logged += 1;
                    let hours_ago = (now - published).num_minutes() as f64 / 60.0;
                    info!(
                        "  Skipped (too old): '{}...' - {:.1} hours ago",
                        truncate_title(&article.title),
                        hours_ago
                    );
                }
            }
            None => skipped += 1,
        }
    }

    // sort_by is stable, so equal timestamps stay in feed order
    recent.sort_by(|a, b| b.0.cmp(&a.0));

    let in_window = recent.len();
    let selected: Vec<ArticleRecord> = recent
        .into_iter()
        .take(window.max_articles)
        .map(|(_, article)| article)
        .collect();

    info!(
        "Found {} articles in the last {} hours",
        in_window, window.hours_lookback
    );
    info!("Skipped {} articles (too old or invalid date)", skipped);
    info!(
        "Processing top {} articles (budget limit: {})",
        selected.len(),
        window.max_articles
    );

    Selection {
        selected,
        in_window,
        skipped,
        cutoff,
    }
}

fn truncate_title(title: &str) -> String {
    title.chars().take(SKIP_TITLE_WIDTH).collect()
}
