// State management module
// Chat orchestrator state plus the transcript and emotion views it drives

pub mod app_state;
pub mod emotion_display;
pub mod transcript;

pub use app_state::AppState;
pub use emotion_display::{BarTier, EmotionBar, EmotionDisplay, EmotionUpdate};
pub use transcript::{ChatMessage, Sender};
