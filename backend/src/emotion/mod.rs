//! Emotion engine
//!
//! Impact parsing, state transitions, prompt context and the SVG face.

pub mod face;
pub mod impact;
pub mod prompts;
pub mod state;

pub use face::generate_svg_face;
pub use impact::{parse_impact, EmotionImpact, ImpactParseError};
pub use state::{Dimension, EmotionState};
