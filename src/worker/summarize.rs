use chrono::Utc;
use tracing::{error, info, warn};

use crate::ai::CompletionService;
use crate::core::models::ArticleRecord;
use crate::errors::DigestError;
use crate::prompt::article_prompt;
use crate::telegram::{MessagingSink, format_article_message};

/// What the per-article loop hands to the audit and overview stages.
#[derive(Debug, Default)]
pub struct PipelineOutput {
    /// Every record that went through the loop, succeeded or not, in order.
    pub processed: Vec<ArticleRecord>,
    /// Summaries of succeeded records, in order. Feeds the overview.
    pub summaries: Vec<String>,
    pub delivered: usize,
    pub delivery_failures: usize,
}

impl PipelineOutput {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.summaries.len()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.processed.len() - self.summaries.len()
    }
}

/// Ask the completion service for one article's summary.
///
/// # Errors
///
/// Any completion failure: transport, timeout, non-2xx or an unexpected body.
pub async fn summarize_article(
    completion: &dyn CompletionService,
    article: &ArticleRecord,
    max_tokens: u32,
) -> Result<String, DigestError> {
    completion
        .complete(&article_prompt(&article.title, &article.link), max_tokens)
        .await
}

/// Summarize and deliver each article strictly in the given order.
///
/// A failed summary is recorded on the article and the loop moves on. A failed
/// delivery is only logged: the article stays summarized and its summary still
/// counts toward the overview.
pub async fn summarize_articles(
    completion: &dyn CompletionService,
    messenger: &dyn MessagingSink,
    articles: Vec<ArticleRecord>,
    max_tokens: u32,
) -> PipelineOutput {
    let total = articles.len();
    let mut output = PipelineOutput::default();

    for (i, mut article) in articles.into_iter().enumerate() {
        info!("[{}/{}] Processing article: {}", i + 1, total, article.title);

        match summarize_article(completion, &article, max_tokens).await {
            Ok(summary) => {
                article.mark_summarized(summary.clone(), Utc::now());

                let message = format_article_message(
                    &article.feed_name,
                    &article.title,
                    &summary,
                    &article.link,
                );
                match messenger.send(&message).await {
                    Ok(()) => {
                        output.delivered += 1;
                        info!("Sent: {}", article.title);
                    }
                    Err(e) => {
                        output.delivery_failures += 1;
                        warn!(
                            "Summary for '{}' kept but not delivered: {}",
                            article.title, e
                        );
                    }
                }

                output.summaries.push(summary);
            }
            Err(e) => {
                error!("Error processing '{}': {}", article.title, e);
                article.mark_failed(e.to_string(), Utc::now());
            }
        }

        output.processed.push(article);
    }

    output
}
