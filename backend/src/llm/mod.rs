//! Upstream chat-completion provider
//!
//! The relay only sees the [`CompletionProvider`] trait; [`OpenAiClient`] is
//! the production implementation and tests substitute a recording fake.

pub mod client;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

use crate::chat::models::ChatTurn;

pub use client::{call_chat_completion, OpenAiClient};

/// Errors from the upstream completion API
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API key configured
    #[error("API key is not configured")]
    MissingApiKey,

    /// Transport failure (connect, timeout, TLS, body read)
    #[error("HTTP request to chat-completion API failed: {0}")]
    Request(#[from] reqwest::Error),

    /// HTTP 429
    #[error("Chat-completion API rate limit exceeded: {0}")]
    RateLimited(String),

    /// Any other non-2xx status
    #[error("Chat-completion API returned error status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message or raw body
        message: String,
    },

    /// Body was not the expected JSON
    #[error("Failed to parse JSON response from chat-completion API: {0}")]
    Decode(String),

    /// Response contained no choices
    #[error("Chat-completion API response contains no choices")]
    NoChoices,

    /// Model refused to answer
    #[error("Chat-completion API refused the request: {0}")]
    Refused(String),

    /// First choice had no text
    #[error("Chat-completion API response text is empty (finish_reason: {finish_reason:?})")]
    EmptyContent {
        /// Reported finish reason, if any
        finish_reason: Option<String>,
    },
}

/// Something that can turn a message list into a reply
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete a conversation; `messages` starts with the system prompt
    async fn complete(&self, messages: &[ChatTurn]) -> Result<String, LlmError>;
}
