use chrono::NaiveDate;
use tracing::{error, info};

use crate::ai::CompletionService;
use crate::prompt::overview_prompt;
use crate::telegram::{MessagingSink, format_overview_message};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverviewStatus {
    /// No article was summarized, so nothing was requested.
    Skipped,
    Sent,
    CompletionFailed(String),
    DeliveryFailed(String),
}

impl OverviewStatus {
    #[must_use]
    pub fn was_attempted(&self) -> bool {
        !matches!(self, OverviewStatus::Skipped)
    }
}

/// Roll every successful summary into one overview and post it.
///
/// Never fails the run: problems come back as a status.
pub async fn synthesize_overview(
    completion: &dyn CompletionService,
    messenger: &dyn MessagingSink,
    summaries: &[String],
    run_date: NaiveDate,
    max_tokens: u32,
) -> OverviewStatus {
    if summaries.is_empty() {
        return OverviewStatus::Skipped;
    }

    info!(
        "Generating final overview summary from {} summaries",
        summaries.len()
    );

    let overview = match completion
        .complete(&overview_prompt(summaries), max_tokens)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            error!("Error generating final summary: {}", e);
            return OverviewStatus::CompletionFailed(e.to_string());
        }
    };

    match messenger
        .send(&format_overview_message(&overview, run_date))
        .await
    {
        Ok(()) => {
            info!("Sent final overview summary");
            OverviewStatus::Sent
        }
        Err(e) => {
            error!("Error sending final summary: {}", e);
            OverviewStatus::DeliveryFailed(e.to_string())
        }
    }
}
