//! Telegram Bot API client module
//!
//! Posts to `sendMessage` on a single configured chat. One attempt per message.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::error;

use super::{MessagingSink, OutgoingMessage, ParseMode};
use crate::errors::DigestError;

#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: ParseMode,
}

pub struct TelegramClient {
    http: Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        api_base: &str,
        bot_token: &str,
        chat_id: String,
        timeout: Duration,
    ) -> Result<Self, DigestError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            DigestError::Http(format!("Failed to build Telegram HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            endpoint: send_message_url(api_base, bot_token),
            chat_id,
        })
    }
}

/// `{api_base}/bot{token}/sendMessage`, tolerating a trailing slash on the base.
#[must_use]
pub fn send_message_url(api_base: &str, bot_token: &str) -> String {
    format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), bot_token)
}

#[async_trait]
impl MessagingSink for TelegramClient {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), DigestError> {
        let payload = SendMessagePayload {
            chat_id: &self.chat_id,
            text: &message.text,
            parse_mode: message.parse_mode,
        };

        // reqwest errors can echo the URL, which carries the bot token
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    "request timed out"
                } else {
                    "request failed"
                };
                DigestError::Delivery(format!("Telegram {reason}: {}", e.without_url()))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            error!("sendMessage failed: status={} body={}", status, body_text);
            return Err(DigestError::Delivery(format!(
                "Telegram API error (status {status}): {body_text}"
            )));
        }

        Ok(())
    }
}
