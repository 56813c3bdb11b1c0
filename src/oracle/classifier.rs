//! Core `EmotionClassifier` trait and its error type.
//!
//! The emotion oracle is a narrow interface: one async `classify` capability
//! mapping a text chunk (plus trailing committed context) to exactly one
//! [`Emotion`]. Production uses [`ApiClassifier`](crate::oracle::ApiClassifier)
//! over HTTPS; tests and offline operation substitute deterministic
//! implementations.

use async_trait::async_trait;
use thiserror::Error;

use crate::emotion::Emotion;

// ---------------------------------------------------------------------------
// OracleError
// ---------------------------------------------------------------------------

/// Errors that can occur during a classification call.
///
/// None of these cross the pipeline boundary: the
/// [`NeutralFallback`](crate::oracle::NeutralFallback) wrapper resolves
/// every failure to [`Emotion::Neutral`].
#[derive(Debug, Error)]
pub enum OracleError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status code.
    #[error("classification endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse classification response: {0}")]
    Parse(String),

    /// The response named a label outside the closed emotion set.
    #[error("label outside the closed emotion set: {0:?}")]
    UnknownLabel(String),
}

impl From<reqwest::Error> for OracleError {
    fn from(e: reqwest::Error) -> Self {
        OracleError::Request(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// EmotionClassifier trait
// ---------------------------------------------------------------------------

/// Async trait for emotion classification.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn EmotionClassifier>`). Concurrent outstanding
/// calls are allowed and completion order is not guaranteed to match issue
/// order; callers treat the latest *completed* result as authoritative.
///
/// # Arguments
/// * `text`          – Non-empty chunk to classify.
/// * `prior_context` – Trailing committed transcript (≤ 300 chars, may be
///                     empty), letting the oracle disambiguate negation and
///                     sarcasm using recent history.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn classify(&self, text: &str, prior_context: &str) -> Result<Emotion, OracleError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal impl proving the trait is object-safe.
    struct Fixed(Emotion);

    #[async_trait]
    impl EmotionClassifier for Fixed {
        async fn classify(&self, _text: &str, _ctx: &str) -> Result<Emotion, OracleError> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn trait_object_is_usable() {
        let oracle: Box<dyn EmotionClassifier> = Box::new(Fixed(Emotion::Joy));
        let result = oracle.classify("what a day", "").await.unwrap();
        assert_eq!(result, Emotion::Joy);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = OracleError::Status {
            status: 429,
            body: "rate limited".into(),
        };
        assert!(err.to_string().contains("429"));

        let err = OracleError::UnknownLabel("bliss".into());
        assert!(err.to_string().contains("bliss"));
    }
}
