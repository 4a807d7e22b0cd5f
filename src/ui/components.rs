// Reusable UI components
// Chat bubbles, emotion bars and the face view

use eframe::egui;
use crate::state::{BarTier, ChatMessage, EmotionBar, EmotionDisplay, Sender};

/// Fill colour for a bar tier
pub fn tier_color(tier: BarTier) -> egui::Color32 {
    match tier {
        BarTier::Green => egui::Color32::from_rgb(76, 175, 80),
        BarTier::Orange => egui::Color32::from_rgb(255, 152, 0),
        BarTier::Red => egui::Color32::from_rgb(244, 67, 54),
    }
}

/// Render one chat bubble, user bubbles right-aligned
pub fn message_bubble(ui: &mut egui::Ui, message: &ChatMessage) {
    let (layout, fill, text_color) = match message.sender {
        Sender::User => (
            egui::Layout::right_to_left(egui::Align::TOP),
            egui::Color32::from_rgb(47, 111, 237),
            egui::Color32::WHITE,
        ),
        Sender::Bot => (
            egui::Layout::left_to_right(egui::Align::TOP),
            ui.visuals().faint_bg_color,
            ui.visuals().text_color(),
        ),
    };

    ui.with_layout(layout, |ui| {
        ui.add_space(8.0);
        let max_width = ui.available_width() * 0.75;
        egui::Frame::none()
            .fill(fill)
            .rounding(egui::Rounding::same(10.0))
            .inner_margin(egui::Margin::symmetric(12.0, 8.0))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&message.text).color(text_color));
                    ui.label(
                        egui::RichText::new(message.display_time())
                            .size(10.0)
                            .color(text_color.gamma_multiply(0.7)),
                    );
                });
            });
    });
    ui.add_space(6.0);
}

/// Render a labelled percentage bar
pub fn emotion_bar(ui: &mut egui::Ui, bar: &EmotionBar) {
    ui.horizontal(|ui| {
        ui.label(bar.label);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(format!("{:.0}%", bar.level)).weak());
        });
    });
    ui.add(egui::ProgressBar::new(bar.fraction()).fill(tier_color(bar.tier())));
    ui.add_space(6.0);
}

/// Render the face, or a placeholder before the first reply
pub fn face_view(ui: &mut egui::Ui, display: &EmotionDisplay) {
    let size = egui::vec2(200.0, 200.0);
    match (display.face_uri(), display.face_svg()) {
        (Some(uri), Some(svg)) => {
            ui.add(
                egui::Image::from_bytes(uri, svg.as_bytes().to_vec()).fit_to_exact_size(size),
            );
        }
        _ => {
            ui.allocate_ui(size, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("🙂").size(96.0));
                });
            });
        }
    }
}

/// Busy indicator shown while a request is in flight
pub fn typing_indicator(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.add_space(8.0);
        ui.add(egui::Spinner::new());
        ui.label(egui::RichText::new("EmotiBot is thinking…").italics().weak());
    });
}
