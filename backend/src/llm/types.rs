//! Chat-completion API wire types
//!
//! Structs that mirror the OpenAI-compatible `/chat/completions` JSON format.

use serde::{Deserialize, Serialize};

use crate::chat::models::ChatTurn;

/// Request body for `/chat/completions`
#[derive(Serialize, Debug)]
pub struct ChatCompletionRequest<'a> {
    /// Model name
    pub model: &'a str,
    /// Full message list, system prompt first
    pub messages: &'a [ChatTurn],
    /// Completion length cap
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

/// Top-level response
#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponse {
    /// Candidate completions; the relay only reads the first
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One candidate completion
#[derive(Deserialize, Debug)]
pub struct Choice {
    /// The generated message
    pub message: ResponseMessage,
    /// Why generation stopped (e.g. "stop", "length", "content_filter")
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message inside a choice
#[derive(Deserialize, Debug)]
pub struct ResponseMessage {
    /// Text content (absent on refusals and tool calls)
    #[serde(default)]
    pub content: Option<String>,
    /// Refusal text, if the model declined
    #[serde(default)]
    pub refusal: Option<String>,
}

/// Error envelope returned with non-2xx statuses
#[derive(Deserialize, Debug)]
pub struct ApiErrorEnvelope {
    /// Error details
    pub error: ApiErrorDetail,
}

/// Error details
#[derive(Deserialize, Debug)]
pub struct ApiErrorDetail {
    /// Human-readable message
    pub message: String,
}
