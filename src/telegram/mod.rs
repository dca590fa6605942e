//! All Telegram-specific functionality

pub mod client;
pub mod message_formatter;

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::DigestError;

/// Telegram's `parse_mode` values used by the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    Markdown,
}

/// A fully formatted chat message ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub parse_mode: ParseMode,
}

/// Chat delivery endpoint.
#[async_trait]
pub trait MessagingSink: Send + Sync {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), DigestError>;
}

// Re-export main types for convenience
pub use client::TelegramClient;
pub use message_formatter::{format_article_message, format_overview_message};
