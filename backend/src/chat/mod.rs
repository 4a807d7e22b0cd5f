//! Chat module
//!
//! In-memory conversations and the relay that drives one chat turn.

pub mod models;
pub mod relay;
pub mod store;

pub use models::{ChatTurn, Conversation, MessageRole};
pub use relay::{ChatRelay, ChatReply, APOLOGY_REPLY, OFFLINE_REPLY};
pub use store::{ConversationStore, TurnContext};
