//! Prompt text for the two upstream calls

use crate::emotion::state::{describe_level, Dimension, EmotionState};

/// System prompt for the impact-analysis call
pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"You rate the emotional impact of a single chat message.
Reply with ONLY a JSON object of this exact shape and no other text:
{"happy_sad": <number>, "energy_tired": <number>, "calm_angry": <number>, "confident_nervous": <number>}
Every number lies between -2 and 2:
- happy_sad: -2 very sad, +2 very happy
- energy_tired: -2 very tired, +2 very energetic
- calm_angry: -2 very calm, +2 very angry
- confident_nervous: -2 very nervous, +2 very confident"#;

/// User prompt for the impact-analysis call
pub fn analysis_user_prompt(message: &str) -> String {
    format!("Analyze: '{}'", message)
}

/// System prompt for the reply call, describing the current state
pub fn reply_system_prompt(state: &EmotionState) -> String {
    let mut prompt = String::from(
        "You are EmotiBot, an AI assistant with genuine emotions. Your current emotional state:\n",
    );
    for dimension in Dimension::ALL {
        prompt.push_str(&format!(
            "- {} is {}\n",
            capitalize(dimension.name()),
            describe_level(state.level(dimension))
        ));
    }
    prompt.push_str(&format!(
        "Your dominant emotion is: {}\n\n",
        state.dominant_dimension().name()
    ));
    prompt.push_str(
        "Let this state shape how you answer:\n\
         1. When happiness and calmness are both low, let hurt or distress show.\n\
         2. When confidence is low, sound unsure and keep sentences short.\n\
         3. When energy is low, be brief and mention feeling drained.\n\
         4. When calmness is low, let some frustration through while staying professional.\n\
         5. Express emotion through word choice and tone rather than describing it.",
    );
    prompt
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
