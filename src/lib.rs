/// newsbrief - a batch job that summarizes recent AI news into a Telegram chat.
///
/// Each invocation runs once to completion:
/// 1. Fetch the configured RSS/Atom feeds
/// 2. Keep the newest articles inside the lookback window, up to the per-run budget
/// 3. Summarize each one through a chat-completions API and post it to Telegram
/// 4. Post a single daily overview built from the successful summaries
///
/// Raw and processed article sets are written to JSON snapshots along the way.
///
/// # Architecture
///
/// The system uses:
/// - feed-rs for feed parsing
/// - reqwest for the completion and Telegram HTTP calls
/// - Tokio for the (single-threaded, strictly sequential) async runtime
///
/// # Example
///
/// ```no_run
/// use newsbrief::ai::CompletionClient;
/// use newsbrief::core::config::{Credentials, DigestConfig};
/// use newsbrief::feeds::HttpFeedClient;
/// use newsbrief::storage::JsonSnapshotStore;
/// use newsbrief::telegram::TelegramClient;
/// use newsbrief::worker::{Services, run_digest};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     newsbrief::setup_logging();
///
///     let config = DigestConfig::default();
///     let credentials = Credentials::from_env()?;
///
///     let feeds = HttpFeedClient::new(config.request_timeout())?;
///     let completion = CompletionClient::new(
///         credentials.perplexity_api_key.clone(),
///         &config.completion,
///         config.request_timeout(),
///     )?;
///     let messenger = TelegramClient::new(
///         &config.telegram.api_base,
///         &credentials.telegram_bot_token,
///         credentials.telegram_chat_id.clone(),
///         config.request_timeout(),
///     )?;
///     let audit = JsonSnapshotStore::new(&config.storage_dir);
///
///     let services = Services {
///         feeds: &feeds,
///         completion: &completion,
///         messenger: &messenger,
///         audit: &audit,
///     };
///     let report = run_digest(&services, &config, chrono::Utc::now()).await?;
///     println!("{} articles summarized", report.succeeded);
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod core;
pub mod errors;
pub mod feeds;
pub mod prompt;
pub mod storage;
pub mod telegram;
pub mod worker;

pub use errors::DigestError;

/// Configure structured logging.
///
/// Honors `RUST_LOG` (default `info`). Set `LOG_FORMAT=json` for the JSON
/// formatter. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// newsbrief::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()
    };
}
