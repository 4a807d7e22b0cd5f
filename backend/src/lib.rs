//! EmotiBot Backend Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
/// In-memory conversations and the chat relay
pub mod chat;
pub mod config;
/// Emotion state, impact parsing and the SVG face
pub mod emotion;
pub mod error;
/// Upstream chat-completion client
pub mod llm;
/// Shared router state
pub mod state;
