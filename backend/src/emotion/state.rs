//! Emotion state model
//!
//! Four bounded percentages plus a primary-emotion label. A conversation starts
//! at the neutral midpoint and moves halfway towards each message's target.

use serde::{Deserialize, Serialize};

use crate::emotion::impact::EmotionImpact;

/// Neutral midpoint for every dimension
pub const NEUTRAL_LEVEL: f64 = 50.0;

/// Percentage points per unit of impact
const IMPACT_SCALE: f64 = 25.0;

/// Fraction of the distance to the target covered per message
const SMOOTHING: f64 = 0.5;

/// Clamp a percentage into [0, 100]; NaN counts as missing and maps to neutral
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        NEUTRAL_LEVEL
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Describe a percentage in words for the reply prompt
pub fn describe_level(value: f64) -> &'static str {
    match value {
        v if v >= 75.0 => "very high",
        v if v >= 60.0 => "high",
        v if v >= 40.0 => "moderate",
        v if v >= 25.0 => "low",
        _ => "very low",
    }
}

/// One of the four displayed dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Happy (high) vs sad (low)
    Happiness,
    /// Energetic (high) vs tired (low)
    Energy,
    /// Calm (high) vs agitated (low)
    Calmness,
    /// Confident (high) vs nervous (low)
    Confidence,
}

impl Dimension {
    /// All dimensions in display order; earlier entries win dominance ties
    pub const ALL: [Dimension; 4] = [
        Dimension::Happiness,
        Dimension::Energy,
        Dimension::Calmness,
        Dimension::Confidence,
    ];

    /// Field name as serialized
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Happiness => "happiness",
            Dimension::Energy => "energy",
            Dimension::Calmness => "calmness",
            Dimension::Confidence => "confidence",
        }
    }

    /// Emotion word for this dimension leaning high or low
    pub fn label(&self, high: bool) -> &'static str {
        match (self, high) {
            (Dimension::Happiness, true) => "happy",
            (Dimension::Happiness, false) => "sad",
            (Dimension::Energy, true) => "energetic",
            (Dimension::Energy, false) => "tired",
            (Dimension::Calmness, true) => "calm",
            (Dimension::Calmness, false) => "agitated",
            (Dimension::Confidence, true) => "confident",
            (Dimension::Confidence, false) => "nervous",
        }
    }
}

/// Current emotional state of one conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionState {
    /// Happiness percentage
    pub happiness: f64,
    /// Energy percentage
    pub energy: f64,
    /// Calmness percentage
    pub calmness: f64,
    /// Confidence percentage
    pub confidence: f64,
    /// Label of the dimension furthest from neutral
    pub primary_emotion: String,
}

impl Default for EmotionState {
    fn default() -> Self {
        Self::neutral()
    }
}

impl EmotionState {
    /// All dimensions at the midpoint
    pub fn neutral() -> Self {
        Self::from_levels(NEUTRAL_LEVEL, NEUTRAL_LEVEL, NEUTRAL_LEVEL, NEUTRAL_LEVEL)
    }

    /// Build a state from raw levels, clamping each and deriving the label
    pub fn from_levels(happiness: f64, energy: f64, calmness: f64, confidence: f64) -> Self {
        let mut state = Self {
            happiness: clamp_percent(happiness),
            energy: clamp_percent(energy),
            calmness: clamp_percent(calmness),
            confidence: clamp_percent(confidence),
            primary_emotion: String::new(),
        };
        state.primary_emotion = state.primary_label().to_string();
        state
    }

    /// Level of a single dimension
    pub fn level(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Happiness => self.happiness,
            Dimension::Energy => self.energy,
            Dimension::Calmness => self.calmness,
            Dimension::Confidence => self.confidence,
        }
    }

    /// Dimension furthest from neutral (first in display order on ties)
    pub fn dominant_dimension(&self) -> Dimension {
        let mut dominant = Dimension::Happiness;
        let mut best = -1.0;
        for dimension in Dimension::ALL {
            let deviation = (self.level(dimension) - NEUTRAL_LEVEL).abs();
            if deviation > best {
                best = deviation;
                dominant = dimension;
            }
        }
        dominant
    }

    fn primary_label(&self) -> &'static str {
        let dominant = self.dominant_dimension();
        let level = self.level(dominant);
        if level == NEUTRAL_LEVEL {
            "neutral"
        } else {
            dominant.label(level > NEUTRAL_LEVEL)
        }
    }

    /// Move towards the targets implied by a message's impact
    ///
    /// Each unit of impact shifts the target by 25 points; the state then
    /// covers half the distance. Anger lowers calmness, so `calm_angry` is
    /// applied negated.
    pub fn apply_impact(&self, impact: &EmotionImpact) -> EmotionState {
        let step = |current: f64, delta: f64| {
            let target = clamp_percent(current + delta * IMPACT_SCALE);
            current + (target - current) * SMOOTHING
        };

        EmotionState::from_levels(
            step(self.happiness, impact.happy_sad),
            step(self.energy, impact.energy_tired),
            step(self.calmness, -impact.calm_angry),
            step(self.confidence, impact.confident_nervous),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_state() {
        let state = EmotionState::neutral();
        assert_eq!(state.happiness, 50.0);
        assert_eq!(state.confidence, 50.0);
        assert_eq!(state.primary_emotion, "neutral");
    }

    #[test]
    fn test_from_levels_clamps() {
        let state = EmotionState::from_levels(150.0, -20.0, f64::NAN, 100.0);
        assert_eq!(state.happiness, 100.0);
        assert_eq!(state.energy, 0.0);
        assert_eq!(state.calmness, 50.0);
        assert_eq!(state.confidence, 100.0);
    }

    #[test]
    fn test_apply_impact_moves_halfway() {
        let impact = EmotionImpact {
            happy_sad: 2.0,
            energy_tired: -1.0,
            calm_angry: 0.0,
            confident_nervous: 0.0,
        };
        let next = EmotionState::neutral().apply_impact(&impact);
        // target 100 -> halfway is 75
        assert_eq!(next.happiness, 75.0);
        // target 25 -> halfway is 37.5
        assert_eq!(next.energy, 37.5);
        assert_eq!(next.calmness, 50.0);
        assert_eq!(next.primary_emotion, "happy");
    }

    #[test]
    fn test_anger_lowers_calmness() {
        let impact = EmotionImpact {
            calm_angry: 2.0,
            ..EmotionImpact::default()
        };
        let next = EmotionState::neutral().apply_impact(&impact);
        assert_eq!(next.calmness, 25.0);
        assert_eq!(next.primary_emotion, "agitated");
    }

    #[test]
    fn test_target_is_clamped_before_smoothing() {
        let start = EmotionState::from_levels(90.0, 50.0, 50.0, 50.0);
        let impact = EmotionImpact {
            happy_sad: 2.0,
            ..EmotionImpact::default()
        };
        // target would be 140, clamped to 100 -> 95
        assert_eq!(start.apply_impact(&impact).happiness, 95.0);
    }

    #[test]
    fn test_dominance_tie_prefers_display_order() {
        let state = EmotionState::from_levels(50.0, 30.0, 70.0, 50.0);
        assert_eq!(state.dominant_dimension(), Dimension::Energy);
        assert_eq!(state.primary_emotion, "tired");
    }

    #[test]
    fn test_describe_level_bands() {
        assert_eq!(describe_level(80.0), "very high");
        assert_eq!(describe_level(75.0), "very high");
        assert_eq!(describe_level(60.0), "high");
        assert_eq!(describe_level(50.0), "moderate");
        assert_eq!(describe_level(25.0), "low");
        assert_eq!(describe_level(10.0), "very low");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(EmotionState::neutral()).unwrap();
        for key in ["happiness", "energy", "calmness", "confidence", "primary_emotion"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }
}
