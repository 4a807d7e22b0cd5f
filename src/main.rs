// EmotiBot GUI - Main Entry Point
// Native chat client for the EmotiBot relay

mod client;
mod state;
mod ui;

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use client::{ChatClient, ChatResponse, ClientError, DEFAULT_BACKEND_URL};
use eframe::egui;
use state::AppState;
use ui::render_app_layout;

type PendingReply = Receiver<Result<ChatResponse, ClientError>>;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let backend_url =
        std::env::var("EMOTIBOT_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
    let client = match ChatClient::new(&backend_url) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Could not build HTTP client");
            std::process::exit(1);
        }
    };
    tracing::info!(endpoint = %client.endpoint(), "Using chat relay");

    // Configure window options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("EmotiBot")
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "EmotiBot",
        options,
        Box::new(move |cc| {
            // svg faces are rasterized by egui_extras
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Box::new(EmotiBotApp::new(client))
        }),
    )
}

/// Main application struct
/// Owns the chat state and at most one in-flight request
struct EmotiBotApp {
    /// Chat state (transcript, emotion display, input)
    state: AppState,
    /// Relay client
    client: ChatClient,
    /// Reply channel of the in-flight request
    pending: Option<PendingReply>,
}

impl EmotiBotApp {
    /// Create a new application instance
    fn new(client: ChatClient) -> Self {
        Self {
            state: AppState::new(),
            client,
            pending: None,
        }
    }

    /// Start a request if the state allows one
    fn submit(&mut self) {
        if let Some(request) = self.state.begin_submit() {
            self.pending = Some(self.client.spawn(request));
        }
    }

    /// Hand a finished request's outcome to the state
    fn poll_pending(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(ClientError::Disconnected),
        };
        self.pending = None;
        self.state.finish_submit(outcome);
    }

    /// Drop cached images of faces that are no longer shown
    fn release_retired_faces(&mut self, ctx: &egui::Context) {
        for uri in self.state.take_retired_faces() {
            tracing::debug!(uri = %uri, "Releasing face image");
            ctx.forget_image(&uri);
        }
    }

    /// One UI pass
    fn frame(&mut self, ctx: &egui::Context) {
        self.poll_pending();

        let actions = render_app_layout(ctx, &mut self.state);
        if actions.submit {
            self.submit();
        }
        self.release_retired_faces(ctx);

        // keep polling while the worker runs
        if self.pending.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl eframe::App for EmotiBotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.frame(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client::{ChatRequest, EmotionPayload};
    use std::sync::mpsc;

    fn app() -> EmotiBotApp {
        EmotiBotApp::new(ChatClient::new("http://127.0.0.1:9").unwrap())
    }

    /// Same length for every turn so each cached face costs the same
    fn face(turn: u32) -> String {
        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 200"><circle cx="100" cy="100" r="60" fill="#{:06x}"/></svg>"##,
            turn * 0x0a0a0a
        )
    }

    fn deliver_reply(app: &mut EmotiBotApp, turn: u32) {
        app.state.input = format!("message {}", turn);
        app.state.begin_submit().unwrap();
        let (tx, rx) = mpsc::channel();
        tx.send(Ok(ChatResponse {
            response: format!("reply {}", turn),
            conversation_id: "c".to_string(),
            emotion_state: Some(EmotionPayload::default()),
            svg_face: Some(face(turn)),
        }))
        .unwrap();
        app.pending = Some(rx);
    }

    fn run_frame(app: &mut EmotiBotApp, ctx: &egui::Context) {
        let _ = ctx.run(egui::RawInput::default(), |ctx| app.frame(ctx));
    }

    fn cached_image_bytes(ctx: &egui::Context) -> usize {
        let loaders = ctx.loaders();
        let bytes: usize = loaders.bytes.lock().iter().map(|l| l.byte_size()).sum();
        let images: usize = loaders.image.lock().iter().map(|l| l.byte_size()).sum();
        let textures: usize = loaders.texture.lock().iter().map(|l| l.byte_size()).sum();
        bytes + images + textures
    }

    #[test]
    fn test_app_creation() {
        let app = app();
        assert!(app.state.transcript.is_empty());
        assert!(app.pending.is_none());
    }

    #[test]
    fn test_dropped_worker_reenables_controls() {
        let mut app = app();
        app.state.input = "hello".to_string();
        let _request: ChatRequest = app.state.begin_submit().unwrap();
        let (tx, rx) = mpsc::channel();
        drop(tx);
        app.pending = Some(rx);

        app.poll_pending();

        assert!(app.pending.is_none());
        assert!(app.state.controls_enabled());
        assert_eq!(
            app.state.transcript.messages().last().unwrap().text,
            state::app_state::FALLBACK_MESSAGE
        );
    }

    #[test]
    fn test_empty_channel_keeps_waiting() {
        let mut app = app();
        app.state.input = "hello".to_string();
        app.state.begin_submit().unwrap();
        let (_tx, rx) = mpsc::channel();
        app.pending = Some(rx);

        app.poll_pending();

        assert!(app.pending.is_some());
        assert!(app.state.is_busy());
    }

    #[test]
    fn test_face_cache_stays_flat_across_turns() {
        let ctx = egui::Context::default();
        egui_extras::install_image_loaders(&ctx);
        let mut app = app();

        deliver_reply(&mut app, 1);
        run_frame(&mut app, &ctx);
        let one_face = cached_image_bytes(&ctx);
        assert!(one_face > 0);

        for turn in 2..=10 {
            deliver_reply(&mut app, turn);
            run_frame(&mut app, &ctx);
        }
        assert_eq!(cached_image_bytes(&ctx), one_face);
    }

    #[test]
    fn test_new_conversation_releases_face() {
        let ctx = egui::Context::default();
        egui_extras::install_image_loaders(&ctx);
        let mut app = app();
        let empty = cached_image_bytes(&ctx);

        deliver_reply(&mut app, 1);
        run_frame(&mut app, &ctx);
        assert!(cached_image_bytes(&ctx) > empty);

        assert!(app.state.reset_conversation());
        run_frame(&mut app, &ctx);
        assert_eq!(cached_image_bytes(&ctx), empty);
    }
}
