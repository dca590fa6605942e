use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use newsbrief::ai::CompletionClient;
use newsbrief::core::config::{Credentials, DigestConfig};
use newsbrief::feeds::HttpFeedClient;
use newsbrief::storage::JsonSnapshotStore;
use newsbrief::telegram::TelegramClient;
use newsbrief::worker::{Services, run_digest};
use tracing::{error, info};

/// Config file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "newsbrief.toml";

/// Configuration or credential problem; nothing was fetched.
const EXIT_CONFIG: u8 = 2;

/// Fetch recent AI news, summarize it and post it to Telegram.
#[derive(Debug, Parser)]
#[command(name = "newsbrief", version, about)]
struct Args {
    /// TOML config file (defaults to ./newsbrief.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the directory audit snapshots are written to
    #[arg(long)]
    storage_dir: Option<PathBuf>,
}

fn load_config(args: &Args) -> anyhow::Result<DigestConfig> {
    let path = args.config.clone().or_else(|| {
        let default = Path::new(DEFAULT_CONFIG_FILE);
        default.exists().then(|| default.to_path_buf())
    });

    let mut config = DigestConfig::load(path.as_deref()).context("Loading configuration")?;
    if let Some(dir) = &args.storage_dir {
        config.storage_dir = dir.clone();
    }
    Ok(config)
}

async fn run(config: &DigestConfig, credentials: Credentials) -> anyhow::Result<()> {
    let timeout = config.request_timeout();
    let feeds = HttpFeedClient::new(timeout)?;
    let completion =
        CompletionClient::new(credentials.perplexity_api_key, &config.completion, timeout)?;
    let messenger = TelegramClient::new(
        &config.telegram.api_base,
        &credentials.telegram_bot_token,
        credentials.telegram_chat_id,
        timeout,
    )?;
    let audit = JsonSnapshotStore::new(&config.storage_dir);

    let services = Services {
        feeds: &feeds,
        completion: &completion,
        messenger: &messenger,
        audit: &audit,
    };

    let report = run_digest(&services, config, chrono::Utc::now())
        .await
        .context("Digest run aborted")?;

    info!(
        "Run finished: {:?} (fetched={}, selected={}, succeeded={}, failed={}, delivery_failures={}, overview={:?})",
        report.outcome,
        report.fetched,
        report.selected,
        report.succeeded,
        report.failed,
        report.delivery_failures,
        report.overview
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();
    newsbrief::setup_logging();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("Fatal error: {}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    info!("Loaded configuration: {} feeds", config.feeds.len());

    match run(&config, credentials).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
