//! The closed set of emotion labels driving the TONUS pipeline.
//!
//! [`Emotion`] is the single currency exchanged between the oracle, the
//! escalation detector, the reward state, and every UI consumer. Exactly one
//! label is "current" at any time.
//!
//! [`Emotion::Crashout`] is not an ordinary member of the set: it is the
//! escalation label forced by sustained high loudness
//! (see [`crate::audio::EscalationDetector`]) and it suppresses oracle
//! results while active.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Emotion
// ---------------------------------------------------------------------------

/// A discrete emotion label.
///
/// Wire labels (serde and oracle responses) are lowercase; note that
/// [`Emotion::Sadness`] serializes as `"sad"`.
///
/// # Example
/// ```rust
/// use tonus::emotion::Emotion;
///
/// assert_eq!(Emotion::from_label("joy"), Some(Emotion::Joy));
/// assert_eq!(Emotion::Sadness.as_label(), "sad");
/// assert_eq!(Emotion::from_label("bliss"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    /// The safe default; every failure path resolves here.
    Neutral,
    Anger,
    Joy,
    #[serde(rename = "sad")]
    Sadness,
    Fear,
    Disgust,
    Embarrassment,
    Anxiety,
    Ennui,
    Envy,
    Sarcasm,
    Burnout,
    /// Escalation label — extreme intensity, ranting, losing control.
    /// Forced by the loudness hysteresis counter, never by ordinary
    /// classification flow.
    Crashout,
}

impl Emotion {
    /// Every member of the closed set, in declaration order.
    pub const ALL: [Emotion; 13] = [
        Emotion::Neutral,
        Emotion::Anger,
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Fear,
        Emotion::Disgust,
        Emotion::Embarrassment,
        Emotion::Anxiety,
        Emotion::Ennui,
        Emotion::Envy,
        Emotion::Sarcasm,
        Emotion::Burnout,
        Emotion::Crashout,
    ];

    /// The lowercase wire label for this emotion.
    pub fn as_label(&self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Anger => "anger",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sad",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
            Emotion::Embarrassment => "embarrassment",
            Emotion::Anxiety => "anxiety",
            Emotion::Ennui => "ennui",
            Emotion::Envy => "envy",
            Emotion::Sarcasm => "sarcasm",
            Emotion::Burnout => "burnout",
            Emotion::Crashout => "crashout",
        }
    }

    /// Parse a wire label; `None` for anything outside the closed set.
    ///
    /// Labels are matched case-insensitively so a slightly sloppy oracle
    /// response ("Joy") still lands inside the set.
    pub fn from_label(label: &str) -> Option<Emotion> {
        let label = label.trim().to_ascii_lowercase();
        Emotion::ALL.iter().copied().find(|e| e.as_label() == label)
    }

    /// Returns `true` for the distinguished escalation label.
    pub fn is_escalation(&self) -> bool {
        matches!(self, Emotion::Crashout)
    }

    /// Display color (hex) for visualizer consumers.
    pub fn color(&self) -> &'static str {
        match self {
            Emotion::Neutral => "#9ca3af",
            Emotion::Anger => "#ef4444",
            Emotion::Joy => "#eab308",
            Emotion::Sadness => "#3b82f6",
            Emotion::Fear => "#a855f7",
            Emotion::Disgust => "#22c55e",
            Emotion::Embarrassment => "#ec4899",
            Emotion::Anxiety => "#f97316",
            Emotion::Ennui => "#6366f1",
            Emotion::Envy => "#2dd4bf",
            Emotion::Sarcasm => "#78350f",
            Emotion::Burnout => "#c2410c",
            Emotion::Crashout => "#ff0000",
        }
    }
}

impl Default for Emotion {
    fn default() -> Self {
        Emotion::Neutral
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_round_trip_for_every_member() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_label(emotion.as_label()), Some(emotion));
        }
    }

    #[test]
    fn sadness_uses_sad_wire_label() {
        assert_eq!(Emotion::Sadness.as_label(), "sad");
        assert_eq!(Emotion::from_label("sad"), Some(Emotion::Sadness));
        // The long form is NOT part of the wire vocabulary.
        assert_eq!(Emotion::from_label("sadness"), None);
    }

    #[test]
    fn parsing_is_case_insensitive_and_trims() {
        assert_eq!(Emotion::from_label("  JOY "), Some(Emotion::Joy));
        assert_eq!(Emotion::from_label("Crashout"), Some(Emotion::Crashout));
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert_eq!(Emotion::from_label("bliss"), None);
        assert_eq!(Emotion::from_label(""), None);
    }

    #[test]
    fn only_crashout_is_escalation() {
        for emotion in Emotion::ALL {
            assert_eq!(emotion.is_escalation(), emotion == Emotion::Crashout);
        }
    }

    #[test]
    fn default_is_neutral() {
        assert_eq!(Emotion::default(), Emotion::Neutral);
    }

    #[test]
    fn serde_matches_wire_labels() {
        for emotion in Emotion::ALL {
            let json = serde_json::to_string(&emotion).unwrap();
            assert_eq!(json, format!("\"{}\"", emotion.as_label()));
            let back: Emotion = serde_json::from_str(&json).unwrap();
            assert_eq!(back, emotion);
        }
    }

    #[test]
    fn every_member_has_a_color() {
        for emotion in Emotion::ALL {
            assert!(emotion.color().starts_with('#'));
        }
    }
}
