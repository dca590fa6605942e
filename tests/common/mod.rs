#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use newsbrief::ai::CompletionService;
use newsbrief::core::models::{ArticleRecord, FeedEntry};
use newsbrief::errors::DigestError;
use newsbrief::feeds::FeedClient;
use newsbrief::storage::AuditSink;
use newsbrief::telegram::{MessagingSink, OutgoingMessage};

pub fn run_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 2, 12, 0, 0).unwrap()
}

pub fn hours_ago(hours: i64) -> DateTime<Utc> {
    run_start() - Duration::hours(hours)
}

pub fn entry(title: &str, published: Option<DateTime<Utc>>) -> FeedEntry {
    FeedEntry {
        title: Some(title.to_string()),
        link: Some(format!(
            "https://example.com/{}",
            title.to_lowercase().replace(' ', "-")
        )),
        published,
        description: Some(format!("<p>{title}</p>")),
    }
}

pub fn article(feed: &str, title: &str, published: Option<DateTime<Utc>>) -> ArticleRecord {
    ArticleRecord::from_entry(feed, entry(title, published))
}

pub enum FeedBehavior {
    Entries(Vec<FeedEntry>),
    Malformed,
    Unreachable,
}

/// Feed client keyed by URL.
#[derive(Default)]
pub struct FakeFeeds {
    feeds: HashMap<String, FeedBehavior>,
    pub requested: Mutex<Vec<String>>,
}

impl FakeFeeds {
    pub fn with(mut self, url: &str, behavior: FeedBehavior) -> Self {
        self.feeds.insert(url.to_string(), behavior);
        self
    }
}

#[async_trait]
impl FeedClient for FakeFeeds {
    async fn fetch_entries(&self, url: &str) -> Result<Vec<FeedEntry>, DigestError> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.feeds.get(url) {
            Some(FeedBehavior::Entries(entries)) => Ok(entries.clone()),
            Some(FeedBehavior::Malformed) => Err(DigestError::FeedParse(
                "unexpected end of document".to_string(),
            )),
            Some(FeedBehavior::Unreachable) | None => {
                Err(DigestError::Http("connection refused".to_string()))
            }
        }
    }
}

/// Completion service that answers per-article prompts with numbered summaries
/// and the overview prompt with a fixed text.
#[derive(Default)]
pub struct ScriptedCompletion {
    /// Prompts containing any of these fail with a timeout.
    pub fail_when_contains: Vec<String>,
    pub fail_overview: bool,
    pub calls: Mutex<Vec<(String, u32)>>,
}

pub const OVERVIEW_TEXT: &str = "- models shipped\n- funding rounds";

impl ScriptedCompletion {
    pub fn failing_on(needles: &[&str]) -> Self {
        Self {
            fail_when_contains: needles.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn overview_calls(&self) -> Vec<(String, u32)> {
        self.calls()
            .into_iter()
            .filter(|(p, _)| is_overview_prompt(p))
            .collect()
    }

    pub fn article_calls(&self) -> Vec<(String, u32)> {
        self.calls()
            .into_iter()
            .filter(|(p, _)| !is_overview_prompt(p))
            .collect()
    }
}

pub fn is_overview_prompt(prompt: &str) -> bool {
    prompt.starts_with("Create a concise bullet-point overview")
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, DigestError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((prompt.to_string(), max_tokens));
            calls.len()
        };

        if is_overview_prompt(prompt) {
            return if self.fail_overview {
                Err(DigestError::Completion("status 500".to_string()))
            } else {
                Ok(OVERVIEW_TEXT.to_string())
            };
        }

        if self
            .fail_when_contains
            .iter()
            .any(|needle| prompt.contains(needle.as_str()))
        {
            return Err(DigestError::Completion(
                "completion request failed: timed out".to_string(),
            ));
        }

        Ok(format!("Summary number {n}."))
    }
}

/// Messaging sink that remembers everything it was asked to send.
#[derive(Default)]
pub struct RecordingSink {
    pub fail_when_contains: Vec<String>,
    pub sent: Mutex<Vec<OutgoingMessage>>,
}

impl RecordingSink {
    pub fn failing_on(needles: &[&str]) -> Self {
        Self {
            fail_when_contains: needles.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingSink for RecordingSink {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), DigestError> {
        self.sent.lock().unwrap().push(message.clone());
        if self
            .fail_when_contains
            .iter()
            .any(|needle| message.text.contains(needle.as_str()))
        {
            return Err(DigestError::Delivery("status 400".to_string()));
        }
        Ok(())
    }
}

/// Audit sink that keeps snapshots in memory.
#[derive(Default)]
pub struct MemoryAudit {
    pub fail: bool,
    pub fetched: Mutex<Vec<Vec<ArticleRecord>>>,
    pub processed: Mutex<Vec<Vec<ArticleRecord>>>,
}

impl MemoryAudit {
    pub fn fetched(&self) -> Vec<Vec<ArticleRecord>> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn processed(&self) -> Vec<Vec<ArticleRecord>> {
        self.processed.lock().unwrap().clone()
    }
}

impl AuditSink for MemoryAudit {
    fn save_fetched(
        &self,
        articles: &[ArticleRecord],
        _at: DateTime<Utc>,
    ) -> Result<PathBuf, DigestError> {
        if self.fail {
            return Err(DigestError::Storage("disk full".to_string()));
        }
        self.fetched.lock().unwrap().push(articles.to_vec());
        Ok(PathBuf::from("memory/fetched.json"))
    }

    fn save_processed(
        &self,
        articles: &[ArticleRecord],
        _at: DateTime<Utc>,
    ) -> Result<PathBuf, DigestError> {
        if self.fail {
            return Err(DigestError::Storage("disk full".to_string()));
        }
        self.processed.lock().unwrap().push(articles.to_vec());
        Ok(PathBuf::from("memory/summaries.json"))
    }
}

/// In-memory writer for capturing formatted log output.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Install a thread-local subscriber writing plain text into the returned capture.
pub fn capture_logs() -> (LogCapture, tracing::subscriber::DefaultGuard) {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
