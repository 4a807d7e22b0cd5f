// Relay client
// Blocking HTTP calls to the backend's /api/chat, run off the UI thread

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::EmotionUpdate;

/// Backend used when EMOTIBOT_URL is not set
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// User text
    pub message: String,
    /// Conversation to continue (`null` on the first message)
    pub conversation_id: Option<String>,
}

/// Emotion fields of a reply; every field may be absent
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EmotionPayload {
    #[serde(default)]
    pub happiness: Option<f64>,
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default)]
    pub calmness: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub primary_emotion: Option<String>,
}

/// Successful reply from `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    /// Bot text
    pub response: String,
    /// Conversation to send with the next message
    pub conversation_id: String,
    /// Emotion fields
    #[serde(default)]
    pub emotion_state: Option<EmotionPayload>,
    /// Face markup
    #[serde(default)]
    pub svg_face: Option<String>,
}

impl ChatResponse {
    /// Emotion panel update carried by this reply
    pub fn emotion_update(&self) -> EmotionUpdate {
        let emotion = self.emotion_state.clone().unwrap_or_default();
        EmotionUpdate {
            svg: self.svg_face.clone(),
            happiness: emotion.happiness,
            energy: emotion.energy,
            calmness: emotion.calmness,
            confidence: emotion.confidence,
            primary_emotion: emotion.primary_emotion,
        }
    }
}

/// Anything that stops a reply from reaching the transcript
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, timeout or body-read failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Non-2xx status
    #[error("server returned HTTP {0}")]
    Status(u16),
    /// Body was not a chat reply
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// Worker thread went away without answering
    #[error("request worker stopped")]
    Disconnected,
}

/// Talks to one backend
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl ChatClient {
    /// Client for the backend at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        })
    }

    /// Full URL of the chat endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one message and wait for the reply
    pub fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        let response = self.http.post(&self.endpoint).json(request).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send on a worker thread; the outcome arrives on the returned channel
    pub fn spawn(&self, request: ChatRequest) -> Receiver<Result<ChatResponse, ClientError>> {
        let (tx, rx) = mpsc::channel();
        let client = self.clone();
        thread::spawn(move || {
            let outcome = client.send(&request);
            if let Err(e) = &outcome {
                tracing::error!(error = %e, "Chat request failed");
            }
            // receiver gone means the app is closing
            let _ = tx.send(outcome);
        });
        rx
    }
}
