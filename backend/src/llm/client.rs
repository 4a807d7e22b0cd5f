//! Chat-completion API client
//!
//! Direct HTTP client for an OpenAI-compatible `/chat/completions` endpoint.
//! Both the impact analysis and the reply go through [`call_chat_completion`].

use std::time::Duration;

use async_trait::async_trait;

use crate::chat::models::ChatTurn;
use crate::config::LlmConfig;
use crate::llm::types::{ApiErrorEnvelope, ChatCompletionRequest, ChatCompletionResponse};
use crate::llm::{CompletionProvider, LlmError};

/// Call the chat-completion API with a full message list
///
/// # Arguments
/// * `client` - Shared HTTP client (connection pooling)
/// * `config` - Upstream settings; `base_url` is overridable for tests
/// * `messages` - System prompt followed by the turns to send
///
/// # Returns
/// * `Ok(String)` - Trimmed text of the first choice
/// * `Err(LlmError)` - Missing key, transport failure, error status, or an unusable body
pub async fn call_chat_completion(
    client: &reqwest::Client,
    config: &LlmConfig,
    messages: &[ChatTurn],
) -> Result<String, LlmError> {
    let api_key = config
        .api_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or(LlmError::MissingApiKey)?;

    let url = format!("{}/chat/completions", config.base_url);
    let request_body = ChatCompletionRequest {
        model: &config.model,
        messages,
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    };

    tracing::debug!(
        url = %url,
        model = %config.model,
        message_count = messages.len(),
        "Calling chat-completion API"
    );

    let response = client
        .post(&url)
        .bearer_auth(api_key)
        .json(&request_body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let status_code = status.as_u16();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());
        let message = serde_json::from_str::<ApiErrorEnvelope>(&error_body)
            .map(|envelope| envelope.error.message)
            .unwrap_or(error_body);

        tracing::error!(
            status_code = status_code,
            error_body = %message,
            "Chat-completion API returned error status"
        );

        if status_code == 429 {
            return Err(LlmError::RateLimited(message));
        }
        return Err(LlmError::Status {
            status: status_code,
            message,
        });
    }

    let response_body = response.text().await?;
    let parsed: ChatCompletionResponse = serde_json::from_str(&response_body)
        .map_err(|e| LlmError::Decode(format!("{} - Response body: {}", e, response_body)))?;

    let choice = parsed.choices.into_iter().next().ok_or(LlmError::NoChoices)?;

    if let Some(refusal) = choice.message.refusal {
        return Err(LlmError::Refused(refusal));
    }

    let text = choice
        .message
        .content
        .map(|content| content.trim().to_string())
        .unwrap_or_default();
    if text.is_empty() {
        return Err(LlmError::EmptyContent {
            finish_reason: choice.finish_reason,
        });
    }

    tracing::debug!(
        response_len = text.len(),
        "Received chat-completion response"
    );

    Ok(text)
}

/// [`CompletionProvider`] backed by the real API
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl OpenAiClient {
    /// Build a client with the configured request timeout
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_http_client(http, config))
    }

    /// Wrap an existing HTTP client
    pub fn with_http_client(http: reqwest::Client, config: LlmConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, messages: &[ChatTurn]) -> Result<String, LlmError> {
        call_chat_completion(&self.http, &self.config, messages).await
    }
}
