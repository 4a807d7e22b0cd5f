//! Message impact parsing
//!
//! The analysis call asks the model for a bare JSON object with four signed
//! deltas. Replies wrapped in Markdown code fences are accepted; absent keys
//! count as zero and values are clamped to [-2, 2]. Anything else is an error
//! and the caller falls back to [`EmotionImpact::default`].

use serde::Deserialize;
use thiserror::Error;

/// Largest magnitude of a single impact value
pub const MAX_IMPACT: f64 = 2.0;

/// Per-message emotional deltas, each in [-2, 2]
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct EmotionImpact {
    /// -2 very sad .. +2 very happy
    #[serde(default)]
    pub happy_sad: f64,
    /// -2 very tired .. +2 very energetic
    #[serde(default)]
    pub energy_tired: f64,
    /// -2 very calm .. +2 very angry
    #[serde(default)]
    pub calm_angry: f64,
    /// -2 very nervous .. +2 very confident
    #[serde(default)]
    pub confident_nervous: f64,
}

impl EmotionImpact {
    fn clamped(self) -> Self {
        let clamp = |v: f64| v.clamp(-MAX_IMPACT, MAX_IMPACT);
        Self {
            happy_sad: clamp(self.happy_sad),
            energy_tired: clamp(self.energy_tired),
            calm_angry: clamp(self.calm_angry),
            confident_nervous: clamp(self.confident_nervous),
        }
    }
}

/// Errors from parsing an analysis reply
#[derive(Error, Debug)]
pub enum ImpactParseError {
    /// Reply is not JSON, or a field is not a number
    #[error("Impact reply is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reply is JSON but not an object
    #[error("Impact reply is not a JSON object")]
    NotAnObject,
}

/// Parse the model's analysis reply into a clamped impact
pub fn parse_impact(reply: &str) -> Result<EmotionImpact, ImpactParseError> {
    let cleaned = reply.replace("```json", "").replace("```", "");
    let value: serde_json::Value = serde_json::from_str(cleaned.trim())?;
    if !value.is_object() {
        return Err(ImpactParseError::NotAnObject);
    }
    let impact: EmotionImpact = serde_json::from_value(value)?;
    Ok(impact.clamped())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_object() {
        let impact = parse_impact(
            r#"{"happy_sad": 1.5, "energy_tired": -1, "calm_angry": 0, "confident_nervous": 0.5}"#,
        )
        .unwrap();
        assert_eq!(impact.happy_sad, 1.5);
        assert_eq!(impact.energy_tired, -1.0);
        assert_eq!(impact.confident_nervous, 0.5);
    }

    #[test]
    fn test_parse_fenced_reply() {
        let reply = "```json\n{\"happy_sad\": 2}\n```";
        let impact = parse_impact(reply).unwrap();
        assert_eq!(impact.happy_sad, 2.0);
        assert_eq!(impact.calm_angry, 0.0);
    }

    #[test]
    fn test_values_are_clamped() {
        let impact = parse_impact(r#"{"happy_sad": 9, "calm_angry": -7.5}"#).unwrap();
        assert_eq!(impact.happy_sad, 2.0);
        assert_eq!(impact.calm_angry, -2.0);
    }

    #[test]
    fn test_rejects_prose() {
        assert!(matches!(
            parse_impact("The user seems happy."),
            Err(ImpactParseError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(
            parse_impact("[1, 2, 3, 4]"),
            Err(ImpactParseError::NotAnObject)
        ));
    }

    #[test]
    fn test_rejects_non_numeric_field() {
        assert!(parse_impact(r#"{"happy_sad": "very"}"#).is_err());
    }
}
