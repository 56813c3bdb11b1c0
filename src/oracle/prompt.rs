//! Prompt construction and response parsing for the remote oracle.
//!
//! The wire contract with the model: the system prompt pins the closed label
//! set and demands a bare JSON object `{"emotion": "<label>"}`; the user
//! message carries the chunk plus optional trailing context. Models
//! occasionally wrap their JSON in markdown code fences anyway, so parsing
//! strips those before deserializing.

use serde::Deserialize;

use crate::emotion::Emotion;
use crate::oracle::classifier::OracleError;

// ---------------------------------------------------------------------------
// System prompt
// ---------------------------------------------------------------------------

/// System instruction sent with every classification request.
pub const SYSTEM_PROMPT: &str = "\
You are an advanced emotion analysis engine for the 'TONUS' app.
Your task is to map the input text to EXACTLY ONE of these emotions:
neutral, anger, joy, sad, fear, disgust, embarrassment, anxiety, ennui, envy, sarcasm, burnout, crashout.

\"Crashout\" means extreme intensity, ranting, or losing control.
\"Burnout\" implies exhaustion or being overwhelmed by work/life.

Rules:
1. You MUST output valid JSON only.
2. The JSON must look like: { \"emotion\": \"joy\" }
3. Do not add markdown code blocks or explanation.
4. Consider the context of previous sentences if provided.";

// ---------------------------------------------------------------------------
// User message
// ---------------------------------------------------------------------------

/// Build the user message for one classification request.
///
/// With context:
/// ```text
/// Context from previous sentences: "<context>"
///
/// Text to analyze: "<text>"
/// ```
/// Without context the message is the bare text.
pub fn build_user_message(text: &str, prior_context: &str) -> String {
    if prior_context.is_empty() {
        text.to_string()
    } else {
        format!(
            "Context from previous sentences: \"{prior_context}\"\n\nText to analyze: \"{text}\""
        )
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct EmotionResponse {
    emotion: String,
}

/// Parse the model's text output into an [`Emotion`].
///
/// Strips markdown code fences (```json … ```), deserializes the
/// `{"emotion": …}` object, and validates the label against the closed set.
///
/// # Errors
///
/// [`OracleError::Parse`] for malformed JSON and
/// [`OracleError::UnknownLabel`] for labels outside the set.
pub fn parse_emotion_response(raw: &str) -> Result<Emotion, OracleError> {
    let cleaned = raw
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string();

    let parsed: EmotionResponse =
        serde_json::from_str(&cleaned).map_err(|e| OracleError::Parse(e.to_string()))?;

    Emotion::from_label(&parsed.emotion).ok_or(OracleError::UnknownLabel(parsed.emotion))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- build_user_message ---

    #[test]
    fn message_without_context_is_bare_text() {
        assert_eq!(build_user_message("I feel fine", ""), "I feel fine");
    }

    #[test]
    fn message_with_context_embeds_both() {
        let msg = build_user_message("not good at all", "I said I was fine.");
        assert!(msg.contains("Context from previous sentences: \"I said I was fine.\""));
        assert!(msg.contains("Text to analyze: \"not good at all\""));
    }

    // ---- parse_emotion_response ---

    #[test]
    fn parses_plain_json() {
        let emotion = parse_emotion_response("{ \"emotion\": \"joy\" }").unwrap();
        assert_eq!(emotion, Emotion::Joy);
    }

    #[test]
    fn strips_markdown_code_fences() {
        let raw = "```json\n{ \"emotion\": \"burnout\" }\n```";
        assert_eq!(parse_emotion_response(raw).unwrap(), Emotion::Burnout);
    }

    #[test]
    fn parses_sad_wire_label() {
        assert_eq!(
            parse_emotion_response("{\"emotion\":\"sad\"}").unwrap(),
            Emotion::Sadness
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_emotion_response("the emotion is joy").unwrap_err();
        assert!(matches!(err, OracleError::Parse(_)));
    }

    #[test]
    fn empty_response_is_a_parse_error() {
        let err = parse_emotion_response("").unwrap_err();
        assert!(matches!(err, OracleError::Parse(_)));
    }

    #[test]
    fn label_outside_set_is_rejected() {
        let err = parse_emotion_response("{\"emotion\":\"bliss\"}").unwrap_err();
        assert!(matches!(err, OracleError::UnknownLabel(l) if l == "bliss"));
    }

    #[test]
    fn system_prompt_names_every_wire_label() {
        for emotion in Emotion::ALL {
            assert!(
                SYSTEM_PROMPT.contains(emotion.as_label()),
                "missing label {}",
                emotion.as_label()
            );
        }
    }
}
