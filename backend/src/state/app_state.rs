// Application state shared by the HTTP handlers
// Owns the chat relay (and through it the conversation store)

use std::sync::Arc;

use crate::chat::{ChatRelay, ConversationStore};
use crate::config::Config;
use crate::llm::{CompletionProvider, LlmError, OpenAiClient};

/// Router state
///
/// Cheap to clone: every field is a handle to shared data. Created once at
/// startup and dropped at shutdown, taking the conversations with it.
#[derive(Clone)]
pub struct AppState {
    /// Relay for `/api/chat`
    pub relay: ChatRelay,
}

impl AppState {
    /// Build state around any completion provider
    pub fn new(provider: Arc<dyn CompletionProvider>, config: &Config) -> Self {
        Self {
            relay: ChatRelay::new(ConversationStore::new(), provider, &config.chat),
        }
    }

    /// Build state that talks to the configured upstream API
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let client = OpenAiClient::new(config.llm.clone())?;
        Ok(Self::new(Arc::new(client), config))
    }

    /// Number of live conversations
    pub async fn conversation_count(&self) -> usize {
        self.relay.store().len().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatTurn;
    use async_trait::async_trait;

    struct Silent;

    #[async_trait]
    impl CompletionProvider for Silent {
        async fn complete(&self, _messages: &[ChatTurn]) -> Result<String, LlmError> {
            Err(LlmError::NoChoices)
        }
    }

    fn config() -> Config {
        Config {
            server: crate::config::ServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
                session_secret: None,
            },
            llm: crate::config::LlmConfig::default(),
            chat: crate::config::ChatConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_state_starts_empty() {
        let state = AppState::new(Arc::new(Silent), &config());
        assert_eq!(state.conversation_count().await, 0);
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let state = AppState::new(Arc::new(Silent), &config());
        let clone = state.clone();
        state.relay.handle("hello", None).await;
        assert_eq!(clone.conversation_count().await, 1);
    }

    #[test]
    fn test_from_config_without_key() {
        // missing key is not a construction error; the relay answers offline
        assert!(AppState::from_config(&config()).is_ok());
    }
}
