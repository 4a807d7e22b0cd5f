//! SVG face generation
//!
//! Maps an [`EmotionState`] onto a 200x200 cartoon face. Each percentage is
//! first normalized to [-2, 2] around the neutral midpoint.

use crate::emotion::state::{clamp_percent, EmotionState, NEUTRAL_LEVEL};

const BASE_SKIN: [f64; 3] = [255.0, 224.0, 178.0];

/// Normalized emotion axes, each in [-2, 2]
#[derive(Debug, Clone, Copy, PartialEq)]
struct FaceAxes {
    happy_sad: f64,
    energy_tired: f64,
    calm_angry: f64,
    confident_nervous: f64,
}

impl FaceAxes {
    fn from_state(state: &EmotionState) -> Self {
        let normalize = |v: f64| (clamp_percent(v) - NEUTRAL_LEVEL) / 25.0;
        Self {
            happy_sad: normalize(state.happiness),
            energy_tired: normalize(state.energy),
            calm_angry: -normalize(state.calmness),
            confident_nervous: normalize(state.confidence),
        }
    }

    fn flushed(&self) -> bool {
        self.calm_angry.abs() > 1.0 || self.confident_nervous < -1.0
    }

    fn blushing(&self) -> bool {
        self.calm_angry.abs() > 1.0 || self.confident_nervous.abs() > 1.0
    }

    fn sweating(&self) -> bool {
        self.confident_nervous < -1.0
    }
}

fn skin_color(axes: &FaceAxes) -> String {
    let mut base = BASE_SKIN;
    if axes.flushed() {
        base[0] = (base[0] + 20.0).min(255.0);
        base[1] = (base[1] - 10.0).max(180.0);
    }

    let fade = 1.0 - (axes.energy_tired + 2.0) / 4.0;
    let channel = |value: f64| (value.round().clamp(0.0, 255.0)) as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(base[0] - fade * 20.0),
        channel(base[1] - fade * 10.0),
        channel(base[2] - fade * 5.0),
    )
}

fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // avoid "-0"
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

/// Render the face for an emotion state as a standalone SVG document
pub fn generate_svg_face(state: &EmotionState) -> String {
    let axes = FaceAxes::from_state(state);

    let mouth_curve = (axes.happy_sad * 15.0 - axes.calm_angry.abs() * 5.0).clamp(-20.0, 15.0);
    let eyebrow_angle =
        axes.calm_angry * 15.0 - axes.happy_sad * 5.0 + axes.confident_nervous * 5.0;
    let eye_height = 5.0 + axes.calm_angry.abs() + (-axes.confident_nervous).max(0.0);
    let eye_width = 10.0 + axes.confident_nervous.abs() * 2.0;
    let stroke_width = 1.0 + axes.confident_nervous.abs() * 0.5;

    let mut svg = String::with_capacity(1024);
    svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    svg.push('\n');
    svg.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 200">"#);
    svg.push('\n');
    svg.push_str(&format!(
        "  <circle cx=\"100\" cy=\"100\" r=\"60\" fill=\"{}\" stroke=\"#000\" stroke-width=\"{}\"/>\n",
        skin_color(&axes),
        num(stroke_width)
    ));
    for cx in [80, 120] {
        svg.push_str(&format!(
            "  <ellipse cx=\"{}\" cy=\"90\" rx=\"{}\" ry=\"{}\" fill=\"#000\"/>\n",
            cx,
            num(eye_width),
            num(eye_height)
        ));
    }
    svg.push_str(&format!(
        "  <line x1=\"70\" y1=\"{}\" x2=\"90\" y2=\"75\" stroke=\"#000\" stroke-width=\"2\"/>\n",
        num(75.0 + eyebrow_angle)
    ));
    svg.push_str(&format!(
        "  <line x1=\"110\" y1=\"75\" x2=\"130\" y2=\"{}\" stroke=\"#000\" stroke-width=\"2\"/>\n",
        num(75.0 + eyebrow_angle)
    ));
    svg.push_str(&format!(
        "  <path d=\"M70,120 Q100,{} 130,120\" fill=\"none\" stroke=\"#000\" stroke-width=\"2\"/>\n",
        num(120.0 + mouth_curve)
    ));
    if axes.blushing() {
        for cx in [75, 125] {
            svg.push_str(&format!(
                "  <circle cx=\"{}\" cy=\"105\" r=\"10\" fill=\"rgba(255,182,193,0.3)\"/>\n",
                cx
            ));
        }
    }
    if axes.sweating() {
        for cx in [70, 130] {
            svg.push_str(&format!(
                "  <circle cx=\"{}\" cy=\"75\" r=\"3\" fill=\"#87CEEB\" opacity=\"0.6\"/>\n",
                cx
            ));
        }
    }
    svg.push_str("</svg>\n");
    svg
}
