// Chat transcript
// Append-only list of timestamped bubbles

use chrono::{DateTime, Local};

/// Who wrote a bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The person at the keyboard
    User,
    /// EmotiBot (including fallback messages)
    Bot,
}

/// A single chat bubble
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Who wrote it
    pub sender: Sender,
    /// Message text
    pub text: String,
    /// When it was added to the transcript
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    /// Timestamp as shown under the bubble
    pub fn display_time(&self) -> String {
        self.sent_at.format("%H:%M").to_string()
    }
}

/// Scrollable list of bubbles, oldest first
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Append a bubble stamped with the given time
    pub fn push_at(&mut self, sender: Sender, text: impl Into<String>, sent_at: DateTime<Local>) {
        self.messages.push(ChatMessage {
            sender,
            text: text.into(),
            sent_at,
        });
    }

    /// Append a bubble stamped now
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) {
        self.push_at(sender, text, Local::now());
    }

    /// All bubbles, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether there are no bubbles
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Remove every bubble
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_append_order() {
        let mut transcript = Transcript::default();
        transcript.push(Sender::User, "hello");
        transcript.push(Sender::Bot, "hi");
        assert_eq!(transcript.messages().len(), 2);
        assert_eq!(transcript.messages()[0].sender, Sender::User);
        assert_eq!(transcript.messages().last().unwrap().text, "hi");
    }

    #[test]
    fn test_display_time() {
        let mut transcript = Transcript::default();
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 7, 30).unwrap();
        transcript.push_at(Sender::Bot, "hi", at);
        assert_eq!(transcript.messages().last().unwrap().display_time(), "09:07");
    }

    #[test]
    fn test_clear() {
        let mut transcript = Transcript::default();
        transcript.push(Sender::User, "hello");
        transcript.clear();
        assert!(transcript.is_empty());
    }
}
