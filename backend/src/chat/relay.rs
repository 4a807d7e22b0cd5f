//! Chat relay
//!
//! One user message in, one reply out:
//! record the user turn -> rate its emotional impact -> move the emotion
//! state -> ask for a reply in that mood -> record the reply -> draw the face.
//!
//! Upstream failures never fail the request. A failed impact analysis leaves
//! the state where it was; a failed reply becomes a fixed apology.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::chat::models::{ChatTurn, MessageRole};
use crate::chat::store::ConversationStore;
use crate::config::ChatConfig;
use crate::emotion::prompts::{analysis_user_prompt, reply_system_prompt, ANALYSIS_SYSTEM_PROMPT};
use crate::emotion::{generate_svg_face, parse_impact, EmotionImpact, EmotionState};
use crate::llm::{CompletionProvider, LlmError};

/// Reply used when the upstream call fails
pub const APOLOGY_REPLY: &str =
    "I'm... having trouble processing that right now. Can you try again?";

/// Reply used when no API key is configured
pub const OFFLINE_REPLY: &str =
    "I'm having trouble connecting to my emotional core right now. Can you try again?";

/// Result of relaying one message
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    /// Assistant text (or a fixed apology)
    pub response: String,
    /// Conversation the message was recorded in
    pub conversation_id: String,
    /// Emotion state after this message
    pub emotion_state: EmotionState,
    /// Face for `emotion_state`
    pub svg_face: String,
}

/// Relays messages between the conversation store and the completion provider
#[derive(Clone)]
pub struct ChatRelay {
    store: ConversationStore,
    provider: Arc<dyn CompletionProvider>,
    history_limit: usize,
}

impl ChatRelay {
    /// Create a relay over an existing store
    pub fn new(
        store: ConversationStore,
        provider: Arc<dyn CompletionProvider>,
        config: &ChatConfig,
    ) -> Self {
        Self {
            store,
            provider,
            history_limit: config.history_limit.max(1),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Relay one user message
    pub async fn handle(&self, message: &str, conversation_id: Option<&str>) -> ChatReply {
        let turn = self.store.begin_turn(conversation_id, message).await;
        if turn.created {
            info!(conversation_id = %turn.conversation_id, "Started new conversation");
        }

        let impact = self.analyze_impact(message).await;
        let emotion_state = turn.emotion_state.apply_impact(&impact);

        let response = self.generate_reply(&turn.history, &emotion_state).await;

        if !self
            .store
            .commit_turn(
                &turn.conversation_id,
                &response,
                emotion_state.clone(),
                self.history_limit,
            )
            .await
        {
            warn!(
                conversation_id = %turn.conversation_id,
                "Conversation vanished before reply was stored"
            );
        }

        info!(
            conversation_id = %turn.conversation_id,
            primary_emotion = %emotion_state.primary_emotion,
            response_len = response.len(),
            "Chat turn completed"
        );

        ChatReply {
            svg_face: generate_svg_face(&emotion_state),
            response,
            conversation_id: turn.conversation_id,
            emotion_state,
        }
    }

    async fn analyze_impact(&self, message: &str) -> EmotionImpact {
        let messages = [
            ChatTurn::new(MessageRole::System, ANALYSIS_SYSTEM_PROMPT),
            ChatTurn::new(MessageRole::User, analysis_user_prompt(message)),
        ];

        let reply = match self.provider.complete(&messages).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Emotion analysis failed; keeping previous state");
                return EmotionImpact::default();
            }
        };

        parse_impact(&reply).unwrap_or_else(|e| {
            warn!(
                error = %e,
                reply = %reply,
                "Unparseable emotion analysis; keeping previous state"
            );
            EmotionImpact::default()
        })
    }

    async fn generate_reply(&self, history: &[ChatTurn], state: &EmotionState) -> String {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatTurn::new(MessageRole::System, reply_system_prompt(state)));
        messages.extend_from_slice(history);

        match self.provider.complete(&messages).await {
            Ok(reply) => reply,
            Err(LlmError::MissingApiKey) => {
                warn!("No API key configured; answering offline");
                OFFLINE_REPLY.to_string()
            }
            Err(e) => {
                tracing::error!(error = %e, "Completion API error");
                APOLOGY_REPLY.to_string()
            }
        }
    }
}
