// Main application layout
// Menu bar, emotion panel, transcript and composer

use eframe::egui;
use crate::state::AppState;
use crate::ui::components::*;

/// What the user asked for during this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiActions {
    /// Send the current input
    pub submit: bool,
}

/// Render the main application layout
pub fn render_app_layout(ctx: &egui::Context, state: &mut AppState) -> UiActions {
    let mut actions = UiActions::default();

    render_menu_bar(ctx, state);

    if state.ui_state.emotion_panel_visible {
        render_emotion_panel(ctx, state);
    }

    egui::TopBottomPanel::bottom("composer").show(ctx, |ui| {
        ui.add_space(8.0);
        if state.is_busy() {
            typing_indicator(ui);
            ui.add_space(4.0);
        }
        actions.submit = render_composer(ui, state);
        ui.add_space(8.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        render_transcript(ui, state);
    });

    actions
}

/// Render the top menu bar
fn render_menu_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            // File menu
            ui.menu_button("File", |ui| {
                if ui
                    .add_enabled(state.controls_enabled(), egui::Button::new("New Conversation"))
                    .clicked()
                {
                    state.reset_conversation();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            // View menu
            ui.menu_button("View", |ui| {
                let mut dark_mode = ctx.style().visuals.dark_mode;
                if ui.checkbox(&mut dark_mode, "Dark Mode").changed() {
                    ctx.set_visuals(if dark_mode {
                        egui::Visuals::dark()
                    } else {
                        egui::Visuals::light()
                    });
                }
                ui.checkbox(&mut state.ui_state.emotion_panel_visible, "Emotion Panel");
            });
        });
    });
}

/// Render the right-hand emotion panel
fn render_emotion_panel(ctx: &egui::Context, state: &AppState) {
    egui::SidePanel::right("emotion_panel")
        .resizable(false)
        .exact_width(240.0)
        .show(ctx, |ui| {
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                face_view(ui, &state.emotion);
                ui.add_space(4.0);
                ui.heading(&state.emotion.primary_emotion);
            });
            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);
            for bar in &state.emotion.bars {
                emotion_bar(ui, bar);
            }
        });
}

/// Render the scrollable transcript
fn render_transcript(ui: &mut egui::Ui, state: &AppState) {
    egui::ScrollArea::vertical()
        .id_source("transcript_scroll")
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if state.transcript.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(80.0);
                    ui.heading(egui::RichText::new("Say hello to EmotiBot").size(22.0));
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new("Its mood follows the conversation").weak());
                });
                return;
            }
            ui.add_space(8.0);
            for message in state.transcript.messages() {
                message_bubble(ui, message);
            }
        });
}

/// Render the input row; returns true when the user submits
fn render_composer(ui: &mut egui::Ui, state: &mut AppState) -> bool {
    let enabled = state.controls_enabled();
    let mut submit = false;

    ui.horizontal(|ui| {
        ui.add_space(8.0);
        let send_width = 80.0;
        let input = ui.add_enabled(
            enabled,
            egui::TextEdit::singleline(&mut state.input)
                .hint_text("Say something…")
                .desired_width(ui.available_width() - send_width - 16.0),
        );
        if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
            input.request_focus();
        }
        if ui
            .add_enabled(
                enabled,
                egui::Button::new("Send").min_size(egui::vec2(send_width, 0.0)),
            )
            .clicked()
        {
            submit = true;
        }
    });

    submit
}
