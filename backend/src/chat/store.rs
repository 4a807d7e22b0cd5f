//! In-memory conversation store
//!
//! Process-lifetime map from conversation id to [`Conversation`]. Nothing is
//! persisted; a restart forgets every conversation. The lock is only held for
//! map bookkeeping, never across an upstream call.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::chat::models::{ChatTurn, Conversation, MessageRole};
use crate::emotion::EmotionState;

/// Snapshot taken when a user turn is recorded
#[derive(Debug, Clone)]
pub struct TurnContext {
    /// Conversation the turn belongs to (possibly freshly minted)
    pub conversation_id: String,
    /// Whether the conversation was created by this turn
    pub created: bool,
    /// History including the new user turn
    pub history: Vec<ChatTurn>,
    /// Emotion state before this turn
    pub emotion_state: EmotionState,
}

/// Shared handle to the conversation map
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    conversations: Arc<RwLock<HashMap<String, Conversation>>>,
}

impl ConversationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new conversation id
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Record a user message
    ///
    /// An absent, empty or unknown `conversation_id` starts a new conversation
    /// under a freshly minted id.
    pub async fn begin_turn(&self, conversation_id: Option<&str>, message: &str) -> TurnContext {
        let mut conversations = self.conversations.write().await;

        let known_id = conversation_id
            .filter(|id| !id.is_empty())
            .filter(|id| conversations.contains_key(*id))
            .map(str::to_string);
        let created = known_id.is_none();
        let id = known_id.unwrap_or_else(Self::generate_id);

        let conversation = conversations
            .entry(id.clone())
            .or_insert_with(|| Conversation::new(id.clone()));
        conversation.push_turn(ChatTurn::new(MessageRole::User, message));

        TurnContext {
            conversation_id: id,
            created,
            history: conversation.turns.clone(),
            emotion_state: conversation.emotion_state.clone(),
        }
    }

    /// Record the assistant reply and the new emotion state, then trim history
    ///
    /// Returns false if the conversation no longer exists.
    pub async fn commit_turn(
        &self,
        conversation_id: &str,
        reply: &str,
        emotion_state: EmotionState,
        history_limit: usize,
    ) -> bool {
        let mut conversations = self.conversations.write().await;
        match conversations.get_mut(conversation_id) {
            Some(conversation) => {
                conversation.emotion_state = emotion_state;
                conversation.push_turn(ChatTurn::new(MessageRole::Assistant, reply));
                conversation.trim_history(history_limit);
                true
            }
            None => false,
        }
    }

    /// Get a copy of a conversation
    pub async fn get(&self, conversation_id: &str) -> Option<Conversation> {
        self.conversations.read().await.get(conversation_id).cloned()
    }

    /// Number of live conversations
    pub async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }

    /// Whether the store holds no conversations
    pub async fn is_empty(&self) -> bool {
        self.conversations.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_begin_turn_mints_id() {
        let store = ConversationStore::new();
        let ctx = store.begin_turn(None, "hello").await;
        assert!(ctx.created);
        assert!(!ctx.conversation_id.is_empty());
        assert_eq!(ctx.history, vec![ChatTurn::new(MessageRole::User, "hello")]);
        assert_eq!(ctx.emotion_state, EmotionState::neutral());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_id_starts_new_conversation() {
        let store = ConversationStore::new();
        let ctx = store.begin_turn(Some("does-not-exist"), "hello").await;
        assert!(ctx.created);
        assert_ne!(ctx.conversation_id, "does-not-exist");

        let empty = store.begin_turn(Some(""), "hello").await;
        assert!(empty.created);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_known_id_appends() {
        let store = ConversationStore::new();
        let first = store.begin_turn(None, "hello").await;
        assert!(
            store
                .commit_turn(&first.conversation_id, "hi!", EmotionState::neutral(), 10)
                .await
        );

        let second = store
            .begin_turn(Some(&first.conversation_id), "again")
            .await;
        assert!(!second.created);
        assert_eq!(second.conversation_id, first.conversation_id);
        let contents: Vec<&str> = second.history.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["hello", "hi!", "again"]);
    }

    #[tokio::test]
    async fn test_commit_stores_state_and_trims() {
        let store = ConversationStore::new();
        let ctx = store.begin_turn(None, "one").await;
        let id = ctx.conversation_id;
        let happy = EmotionState::from_levels(80.0, 50.0, 50.0, 50.0);
        store.commit_turn(&id, "two", happy.clone(), 10).await;
        store.begin_turn(Some(&id), "three").await;
        store.commit_turn(&id, "four", happy.clone(), 3).await;

        let conversation = store.get(&id).await.unwrap();
        assert_eq!(conversation.emotion_state, happy);
        let contents: Vec<&str> = conversation.turns.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["two", "three", "four"]);
    }

    #[tokio::test]
    async fn test_commit_unknown_conversation() {
        let store = ConversationStore::new();
        assert!(!store.commit_turn("missing", "x", EmotionState::neutral(), 10).await);
        assert!(store.is_empty().await);
    }
}
