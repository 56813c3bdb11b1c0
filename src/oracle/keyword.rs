//! Keyword-based heuristic emotion classification.
//!
//! [`KeywordClassifier`] scans a text chunk for per-emotion keyword lists
//! and returns the emotion with the most matches. It is the offline stand-in
//! for the remote oracle: deterministic, instant, and requiring no API key.
//! It cannot understand negation or sarcasm, which is exactly why the remote
//! oracle exists.

use async_trait::async_trait;

use crate::emotion::Emotion;
use crate::oracle::classifier::{EmotionClassifier, OracleError};

// ---------------------------------------------------------------------------
// Keyword tables
// ---------------------------------------------------------------------------

struct KeywordSet {
    emotion: Emotion,
    keywords: &'static [&'static str],
}

static KEYWORD_SETS: &[KeywordSet] = &[
    KeywordSet {
        emotion: Emotion::Joy,
        keywords: &[
            "happy", "great", "love", "amazing", "wonderful", "excited", "good", "best",
            "fantastic", "fun", "smile", "laugh", "blessed", "glad", "yay", "delighted",
        ],
    },
    KeywordSet {
        emotion: Emotion::Anger,
        keywords: &[
            "hate", "furious", "mad", "angry", "stupid", "idiot", "annoying", "rage", "upset",
            "worst", "hell", "shut up", "damn", "pissed", "hostile",
        ],
    },
    KeywordSet {
        emotion: Emotion::Sadness,
        keywords: &[
            "sad", "cry", "depressed", "lonely", "miss", "heartbroken", "down", "blue",
            "unhappy", "sorry", "grief", "lost", "fail", "bad", "hurt", "pain",
        ],
    },
    KeywordSet {
        emotion: Emotion::Fear,
        keywords: &[
            "scared", "afraid", "terrified", "horror", "spooky", "creepy", "nightmare",
            "danger", "panic", "nervous", "shaking", "trembling", "run",
        ],
    },
    KeywordSet {
        emotion: Emotion::Anxiety,
        keywords: &[
            "anxious", "stress", "worried", "nervous", "panic", "pressure", "overwhelmed",
            "tense", "tight", "deadline", "rush", "doubt",
        ],
    },
    KeywordSet {
        emotion: Emotion::Burnout,
        keywords: &[
            "tired", "exhausted", "drained", "done", "finished", "over it", "too much",
            "can't", "sleep", "fatigue", "heavy", "weak", "depleted", "overwork", "workload",
        ],
    },
    KeywordSet {
        emotion: Emotion::Crashout,
        keywords: &[
            "insane", "crazy", "destroy", "break", "explode", "can't take it", "freaking",
            "aaaa", "kill", "end", "snap", "lose it", "done with this",
        ],
    },
];

// ---------------------------------------------------------------------------
// KeywordClassifier
// ---------------------------------------------------------------------------

/// Most-matches-wins keyword classifier; neutral when nothing matches.
///
/// Matching is case-insensitive substring containment over the chunk text
/// (context is ignored — the heuristic has no model of sentence history).
///
/// # Example
/// ```rust
/// use tonus::emotion::Emotion;
/// use tonus::oracle::KeywordClassifier;
///
/// let classifier = KeywordClassifier::new();
/// assert_eq!(
///     classifier.detect("I am so happy and excited"),
///     Emotion::Joy
/// );
/// assert_eq!(classifier.detect("the meeting is at noon"), Emotion::Neutral);
/// ```
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous heuristic detection.
    pub fn detect(&self, text: &str) -> Emotion {
        let lowered = text.to_lowercase();

        KEYWORD_SETS
            .iter()
            .filter_map(|set| {
                let count = set
                    .keywords
                    .iter()
                    .filter(|kw| lowered.contains(**kw))
                    .count();
                if count > 0 {
                    Some((set.emotion, count))
                } else {
                    None
                }
            })
            .max_by_key(|(_, count)| *count)
            .map(|(emotion, _)| emotion)
            .unwrap_or(Emotion::Neutral)
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmotionClassifier for KeywordClassifier {
    /// Heuristic classification; never errors.
    async fn classify(&self, text: &str, _prior_context: &str) -> Result<Emotion, OracleError> {
        Ok(self.detect(text))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_joy() {
        let c = KeywordClassifier::new();
        assert_eq!(c.detect("what a wonderful amazing day"), Emotion::Joy);
    }

    #[test]
    fn detects_burnout() {
        let c = KeywordClassifier::new();
        assert_eq!(
            c.detect("I'm exhausted and drained from the workload"),
            Emotion::Burnout
        );
    }

    #[test]
    fn detection_is_case_insensitive() {
        let c = KeywordClassifier::new();
        assert_eq!(c.detect("I HATE this, I'm FURIOUS"), Emotion::Anger);
    }

    #[test]
    fn most_matches_wins() {
        let c = KeywordClassifier::new();
        // Three anxiety keywords vs one joy keyword.
        let text = "happy but so worried, the pressure and the deadline";
        assert_eq!(c.detect(text), Emotion::Anxiety);
    }

    #[test]
    fn no_match_is_neutral() {
        let c = KeywordClassifier::new();
        assert_eq!(c.detect("the meeting is at noon"), Emotion::Neutral);
        assert_eq!(c.detect(""), Emotion::Neutral);
    }

    #[tokio::test]
    async fn classify_never_errors() {
        let c = KeywordClassifier::new();
        let result = c.classify("I feel scared and terrified", "ignored").await;
        assert_eq!(result.unwrap(), Emotion::Fear);
    }

    /// Usable as a drop-in `dyn EmotionClassifier`.
    #[test]
    fn classifier_is_object_safe() {
        let _: Box<dyn EmotionClassifier> = Box::new(KeywordClassifier::new());
    }
}
