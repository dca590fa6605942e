//! Completion service access

pub mod client;

use async_trait::async_trait;

use crate::errors::DigestError;

/// A one-shot text completion endpoint.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send `prompt` as a single user message and return the first choice's text.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, DigestError>;
}

// Re-export main types for convenience
pub use client::CompletionClient;
