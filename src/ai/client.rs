//! Chat-completions API client module
//!
//! Speaks the OpenAI-compatible `chat/completions` contract that Perplexity exposes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::CompletionService;
use crate::core::config::CompletionSettings;
use crate::errors::DigestError;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

/// Client for the completion endpoint; one request per call, no retries.
pub struct CompletionClient {
    http: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl CompletionClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        api_key: String,
        settings: &CompletionSettings,
        timeout: Duration,
    ) -> Result<Self, DigestError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            DigestError::Http(format!("Failed to build completion HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            api_key,
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
        })
    }

    fn headers(&self) -> Result<HeaderMap, DigestError> {
        let mut headers = HeaderMap::new();
        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| DigestError::Http(format!("Invalid Authorization header: {e}")))?;
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl CompletionService for CompletionClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, DigestError> {
        #[cfg(feature = "debug-logs")]
        info!("Using completion prompt:\n{}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            "Requesting completion ({} chars, max_tokens={})",
            prompt.chars().count(),
            max_tokens
        );

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DigestError::Completion(format!("completion request failed: {}", describe(&e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(DigestError::Completion(format!(
                "completion API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            DigestError::Completion(format!("Failed to parse completion response: {e}"))
        })?;

        let text = extract_first_choice(&response_json)?;
        debug!("Completion returned {} chars", text.chars().count());
        Ok(text)
    }
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("timed out: {error}")
    } else {
        error.to_string()
    }
}

/// Pull `choices[0].message.content` out of a response body, trimmed.
///
/// # Errors
///
/// Returns [`DigestError::Completion`] when the field is missing, not a string, or blank.
pub fn extract_first_choice(response: &Value) -> Result<String, DigestError> {
    let content = response
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            DigestError::Completion(
                "malformed response: missing choices[0].message.content".to_string(),
            )
        })?;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(DigestError::Completion(
            "completion returned empty content".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
