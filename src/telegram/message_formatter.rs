use chrono::NaiveDate;
use html_escape::encode_text;

use super::{OutgoingMessage, ParseMode};

/// Telegram rejects `sendMessage` text longer than this many characters.
pub const TELEGRAM_TEXT_LIMIT: usize = 4096;

fn clamp(text: String) -> String {
    if text.chars().count() <= TELEGRAM_TEXT_LIMIT {
        text
    } else {
        text.chars().take(TELEGRAM_TEXT_LIMIT).collect()
    }
}

/// Clamp escaped HTML text without leaving a half-written entity at the end.
///
/// Every `&` in escaped text opens an entity, so a trailing `&` with no `;`
/// after it marks a cut entity.
fn clamp_html(text: String) -> String {
    let mut cut = clamp(text);
    if let Some(amp) = cut.rfind('&')
        && !cut[amp..].contains(';')
    {
        cut.truncate(amp);
    }
    cut
}

/// Per-article message: source, headline, summary, link.
#[must_use]
pub fn format_article_message(
    feed_name: &str,
    title: &str,
    summary: &str,
    link: &str,
) -> OutgoingMessage {
    let text = format!(
        "Source: {}\n\nHeadline: {}\n\nSummary: {}\n\nLink: {}",
        encode_text(feed_name),
        encode_text(title),
        encode_text(summary),
        encode_text(link)
    );

    OutgoingMessage {
        text: clamp_html(text),
        parse_mode: ParseMode::Html,
    }
}

/// The once-per-run rollup, labelled with the run date.
#[must_use]
pub fn format_overview_message(overview: &str, run_date: NaiveDate) -> OutgoingMessage {
    let text = format!(
        "📊 **Daily AI News Overview** ({})\n\n{}",
        run_date.format("%Y-%m-%d"),
        overview
    );

    OutgoingMessage {
        text: clamp(text),
        parse_mode: ParseMode::Markdown,
    }
}
