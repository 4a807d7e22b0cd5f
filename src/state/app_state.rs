// Application state management
// The chat orchestrator: input, busy flag, conversation id, and the two views

use crate::client::{ChatRequest, ChatResponse, ClientError};
use crate::state::emotion_display::EmotionDisplay;
use crate::state::transcript::{Sender, Transcript};

/// Bot bubble shown when a request fails for any reason
pub const FALLBACK_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// Main application state
///
/// One request at a time: `begin_submit` flips the busy flag and hands back
/// the request to send, `finish_submit` dispatches the outcome and always
/// re-enables the controls.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Text in the input box
    pub input: String,
    /// Chat bubbles
    pub transcript: Transcript,
    /// Face and bars
    pub emotion: EmotionDisplay,
    /// Conversation to continue, once the server has assigned one
    pub conversation_id: Option<String>,
    busy: bool,
    /// Image-cache keys of faces no longer on screen
    retired_faces: Vec<String>,
    /// UI state preferences
    pub ui_state: UiState,
}

/// UI-specific state
#[derive(Debug, Clone)]
pub struct UiState {
    /// Whether the emotion panel is visible
    pub emotion_panel_visible: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            emotion_panel_visible: true,
        }
    }
}

impl AppState {
    /// Create a new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request is in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether the input box and send button accept interaction
    pub fn controls_enabled(&self) -> bool {
        !self.busy
    }

    /// Start sending the current input
    ///
    /// Returns `None` (and changes nothing) if the input is blank or a request
    /// is already in flight. Otherwise records the user bubble, clears the
    /// input, disables the controls and returns the request to send.
    pub fn begin_submit(&mut self) -> Option<ChatRequest> {
        if self.busy {
            return None;
        }
        let message = self.input.trim().to_string();
        if message.is_empty() {
            return None;
        }

        self.transcript.push(Sender::User, message.clone());
        self.input.clear();
        self.busy = true;

        Some(ChatRequest {
            message,
            conversation_id: self.conversation_id.clone(),
        })
    }

    /// Dispatch the outcome of a request to the transcript and emotion views
    pub fn finish_submit(&mut self, outcome: Result<ChatResponse, ClientError>) {
        match outcome {
            Ok(reply) => {
                self.conversation_id = Some(reply.conversation_id.clone());
                self.transcript.push(Sender::Bot, reply.response.clone());
                if let Some(uri) = self.emotion.apply(&reply.emotion_update()) {
                    self.retired_faces.push(uri);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Showing fallback message");
                self.transcript.push(Sender::Bot, FALLBACK_MESSAGE);
            }
        }
        self.busy = false;
    }

    /// Forget the conversation and start over (ignored while busy)
    pub fn reset_conversation(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.conversation_id = None;
        self.transcript.clear();
        self.retired_faces.extend(self.emotion.reset());
        true
    }

    /// Drain the cache keys of faces that were replaced or cleared
    pub fn take_retired_faces(&mut self) -> Vec<String> {
        std::mem::take(&mut self.retired_faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::EmotionPayload;

    fn reply(id: &str, text: &str, svg: Option<&str>) -> ChatResponse {
        ChatResponse {
            response: text.to_string(),
            conversation_id: id.to_string(),
            emotion_state: Some(EmotionPayload {
                happiness: Some(140.0),
                primary_emotion: Some("happy".to_string()),
                ..EmotionPayload::default()
            }),
            svg_face: svg.map(str::to_string),
        }
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut state = AppState::new();
        state.input = "   ".to_string();
        assert!(state.begin_submit().is_none());
        assert!(state.controls_enabled());
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn test_submit_disables_controls() {
        let mut state = AppState::new();
        state.input = " hello ".to_string();
        let request = state.begin_submit().unwrap();

        assert_eq!(request.message, "hello");
        assert_eq!(request.conversation_id, None);
        assert!(state.is_busy());
        assert!(!state.controls_enabled());
        assert!(state.input.is_empty());
        assert_eq!(state.transcript.messages().last().unwrap().sender, Sender::User);
    }

    #[test]
    fn test_second_submit_while_busy_is_refused() {
        let mut state = AppState::new();
        state.input = "one".to_string();
        state.begin_submit().unwrap();
        state.input = "two".to_string();
        assert!(state.begin_submit().is_none());
        assert_eq!(state.input, "two");
        assert_eq!(state.transcript.messages().len(), 1);
    }

    #[test]
    fn test_success_updates_both_views() {
        let mut state = AppState::new();
        state.input = "hello".to_string();
        state.begin_submit().unwrap();
        state.finish_submit(Ok(reply("abc123", "Hi!", Some("<svg/>"))));

        assert!(state.controls_enabled());
        assert_eq!(state.conversation_id.as_deref(), Some("abc123"));
        assert_eq!(state.transcript.messages().last().unwrap().text, "Hi!");
        assert_eq!(state.transcript.messages().last().unwrap().sender, Sender::Bot);
        assert_eq!(state.emotion.bars[0].level, 100.0);
        assert_eq!(state.emotion.primary_emotion, "happy");
        assert_eq!(state.emotion.face_svg(), Some("<svg/>"));

        // the id is reused on the next message
        state.input = "again".to_string();
        let next = state.begin_submit().unwrap();
        assert_eq!(next.conversation_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_failure_shows_fallback_and_reenables() {
        let mut state = AppState::new();
        state.input = "hello".to_string();
        state.begin_submit().unwrap();
        state.finish_submit(Err(ClientError::Status(502)));

        assert!(state.controls_enabled());
        assert_eq!(state.transcript.messages().last().unwrap().text, FALLBACK_MESSAGE);
        assert_eq!(state.conversation_id, None);
    }

    #[test]
    fn test_malformed_face_does_not_block_reply() {
        let mut state = AppState::new();
        state.input = "hello".to_string();
        state.begin_submit().unwrap();
        state.finish_submit(Ok(reply("c", "Hi!", Some("<svg><oops></svg>"))));

        assert!(state.controls_enabled());
        assert_eq!(state.transcript.messages().last().unwrap().text, "Hi!");
        assert_eq!(state.emotion.face_svg(), None);
    }

    #[test]
    fn test_reset_conversation() {
        let mut state = AppState::new();
        state.input = "hello".to_string();
        state.begin_submit().unwrap();
        assert!(!state.reset_conversation());

        state.finish_submit(Ok(reply("c", "Hi!", None)));
        assert!(state.reset_conversation());
        assert!(state.transcript.is_empty());
        assert_eq!(state.conversation_id, None);
        assert_eq!(state.emotion.bars[0].level, 50.0);
    }

    #[test]
    fn test_replaced_and_cleared_faces_are_retired() {
        let mut state = AppState::new();
        for (turn, svg) in ["<svg/>", "<svg></svg>"].into_iter().enumerate() {
            state.input = format!("message {}", turn);
            state.begin_submit().unwrap();
            state.finish_submit(Ok(reply("c", "Hi!", Some(svg))));
        }
        let current = state.emotion.face_uri().unwrap();

        let retired = state.take_retired_faces();
        assert_eq!(retired.len(), 1);
        assert_ne!(retired[0], current);
        assert!(state.take_retired_faces().is_empty());

        assert!(state.reset_conversation());
        assert_eq!(state.take_retired_faces(), vec![current]);
    }
}
