//! `ApiClassifier` — HTTPS adapter over the remote messages endpoint.
//!
//! Sends one POST per chunk to `{base_url}/v1/messages` with the system
//! prompt from [`crate::oracle::prompt`] and parses the JSON emotion label
//! out of the first `text` content block. All connection details come from
//! [`OracleConfig`]; nothing is hardcoded.
//!
//! The pipeline deliberately imposes no request timeout: a hung call never
//! resolves and the pipeline simply continues without it.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::OracleConfig;
use crate::emotion::Emotion;
use crate::oracle::classifier::{EmotionClassifier, OracleError};
use crate::oracle::prompt::{build_user_message, parse_emotion_response, SYSTEM_PROMPT};

/// API version header value required by the messages endpoint.
const API_VERSION: &str = "2023-06-01";

/// Chunks shorter than this many non-whitespace characters are resolved to
/// neutral without a network call.
const MIN_TEXT_CHARS: usize = 2;

// ---------------------------------------------------------------------------
// ApiClassifier
// ---------------------------------------------------------------------------

/// Calls the configured messages endpoint for each classification.
///
/// # Errors never cross the pipeline
/// This type reports transport/parse failures as [`OracleError`]; wrap it in
/// [`NeutralFallback`](crate::oracle::NeutralFallback) so the pipeline only
/// ever sees an [`Emotion`].
pub struct ApiClassifier {
    client: reqwest::Client,
    config: OracleConfig,
}

impl ApiClassifier {
    /// Build an `ApiClassifier` from oracle config.
    ///
    /// The HTTP client carries no per-request timeout — completion-order and
    /// hang behavior are the pipeline's concern, not the transport's.
    pub fn from_config(config: &OracleConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: config.clone(),
        }
    }
}

#[async_trait]
impl EmotionClassifier for ApiClassifier {
    /// Classify `text` against the closed emotion set.
    ///
    /// Near-empty text short-circuits to [`Emotion::Neutral`] without
    /// touching the network.
    async fn classify(&self, text: &str, prior_context: &str) -> Result<Emotion, OracleError> {
        if text.trim().chars().count() < MIN_TEXT_CHARS {
            return Ok(Emotion::Neutral);
        }

        let url = format!("{}/v1/messages", self.config.base_url);
        let api_key = self.config.api_key.as_deref().unwrap_or("");

        let body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": SYSTEM_PROMPT,
            "messages": [
                { "role": "user", "content": build_user_message(text, prior_context) }
            ]
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| OracleError::Parse(e.to_string()))?;

        // First content block of type "text" holds the model's JSON answer.
        let text_block = json["content"]
            .as_array()
            .and_then(|blocks| {
                blocks
                    .iter()
                    .find(|b| b["type"].as_str() == Some("text"))
            })
            .and_then(|b| b["text"].as_str())
            .ok_or_else(|| OracleError::Parse("no text content block in response".into()))?;

        parse_emotion_response(text_block)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(api_key: Option<&str>) -> OracleConfig {
        OracleConfig {
            base_url: "https://api.example.com".into(),
            api_key: api_key.map(|s| s.to_string()),
            model: "test-model".into(),
            max_tokens: 150,
        }
    }

    #[test]
    fn from_config_builds_without_panic() {
        let _classifier = ApiClassifier::from_config(&make_config(None));
        let _classifier = ApiClassifier::from_config(&make_config(Some("sk-test")));
    }

    /// Verify that `ApiClassifier` is usable as `dyn EmotionClassifier`.
    #[test]
    fn classifier_is_object_safe() {
        let classifier: Box<dyn EmotionClassifier> =
            Box::new(ApiClassifier::from_config(&make_config(None)));
        drop(classifier);
    }

    /// Near-empty text must resolve to neutral without any network access
    /// (the base_url above is unreachable, so reaching the network would
    /// error instead).
    #[tokio::test]
    async fn near_empty_text_short_circuits_to_neutral() {
        let classifier = ApiClassifier::from_config(&make_config(None));
        assert_eq!(classifier.classify("", "").await.unwrap(), Emotion::Neutral);
        assert_eq!(
            classifier.classify("   ", "ctx").await.unwrap(),
            Emotion::Neutral
        );
        assert_eq!(
            classifier.classify("a", "").await.unwrap(),
            Emotion::Neutral
        );
    }
}
