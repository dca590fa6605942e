use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::models::FeedSource;
use crate::errors::DigestError;

pub const PERPLEXITY_API_KEY: &str = "PERPLEXITY_API_KEY";
pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Longest accepted lookback: ten years of hours.
pub const MAX_HOURS_LOOKBACK: i64 = 24 * 365 * 10;

/// Secrets required before any network I/O happens.
#[derive(Clone)]
pub struct Credentials {
    pub perplexity_api_key: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("perplexity_api_key", &"<redacted>")
            .field("telegram_bot_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, DigestError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve credentials through an arbitrary lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DigestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    DigestError::Config(format!("{name} not found in environment or .env file"))
                })
        };

        Ok(Self {
            perplexity_api_key: require(PERPLEXITY_API_KEY)?,
            telegram_bot_token: require(TELEGRAM_BOT_TOKEN)?,
            telegram_chat_id: require(TELEGRAM_CHAT_ID)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    pub endpoint: String,
    pub model: String,
    pub article_max_tokens: u32,
    pub overview_max_tokens: u32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.perplexity.ai/chat/completions".to_string(),
            model: "sonar".to_string(),
            article_max_tokens: 250,
            overview_max_tokens: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TelegramSettings {
    pub api_base: String,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
        }
    }
}

/// Static run configuration, loaded once and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Maximum number of articles summarized per run.
    pub max_articles: usize,
    /// How far back, in hours, an article still counts as recent.
    pub hours_lookback: i64,
    pub feeds: Vec<FeedSource>,
    pub storage_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub completion: CompletionSettings,
    pub telegram: TelegramSettings,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            max_articles: 5,
            hours_lookback: 48,
            feeds: default_feeds(),
            storage_dir: PathBuf::from("storage"),
            request_timeout_secs: 30,
            completion: CompletionSettings::default(),
            telegram: TelegramSettings::default(),
        }
    }
}

impl DigestConfig {
    /// Load from a TOML file, or fall back to the built-in defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, DigestError> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    DigestError::Config(format!("failed to read {}: {e}", path.display()))
                })?;
                Self::from_toml(&raw)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, DigestError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<(), DigestError> {
        if self.max_articles == 0 {
            return Err(DigestError::Config(
                "max_articles must be at least 1".to_string(),
            ));
        }
        if self.hours_lookback <= 0 || self.hours_lookback > MAX_HOURS_LOOKBACK {
            return Err(DigestError::Config(format!(
                "hours_lookback must be between 1 and {MAX_HOURS_LOOKBACK}, got {}",
                self.hours_lookback
            )));
        }
        if self.feeds.is_empty() {
            return Err(DigestError::Config("no feeds configured".to_string()));
        }
        if let Some(feed) = self
            .feeds
            .iter()
            .find(|f| f.name.trim().is_empty() || f.url.trim().is_empty())
        {
            return Err(DigestError::Config(format!(
                "feed entry is missing a name or url: {feed:?}"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(DigestError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_feeds() -> Vec<FeedSource> {
    vec![
        FeedSource::new(
            "The Verge - AI",
            "https://www.theverge.com/ai-artificial-intelligence/rss/index.xml",
        ),
        FeedSource::new(
            "TechCrunch - AI",
            "https://techcrunch.com/tag/artificial-intelligence/feed/",
        ),
        FeedSource::new(
            "Ars Technica - AI",
            "https://feeds.arstechnica.com/arstechnica/index",
        ),
        FeedSource::new(
            "MIT Technology Review - AI",
            "https://www.technologyreview.com/topic/artificial-intelligence/feed/",
        ),
        FeedSource::new(
            "Wired - AI",
            "https://www.wired.com/feed/tag/artificial-intelligence/latest/rss",
        ),
    ]
}
