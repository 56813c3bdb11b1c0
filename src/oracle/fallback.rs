//! Fallback wrapper — resolves every classification failure to neutral.
//!
//! When the underlying oracle call fails for any reason (`Request`,
//! `Status`, `Parse`, `UnknownLabel`) [`NeutralFallback`] logs the failure
//! and resolves to [`Emotion::Neutral`] instead of propagating the error.
//! This keeps the pipeline functional when the endpoint is unreachable or
//! misbehaving: the system always has a safe default rather than a failure
//! mode.

use async_trait::async_trait;

use crate::emotion::Emotion;
use crate::oracle::classifier::{EmotionClassifier, OracleError};

// ---------------------------------------------------------------------------
// NeutralFallback
// ---------------------------------------------------------------------------

/// A transparent wrapper around any [`EmotionClassifier`] that never returns
/// an error — on failure it resolves to [`Emotion::Neutral`].
///
/// # Example
/// ```rust
/// use tonus::config::OracleConfig;
/// use tonus::oracle::{ApiClassifier, NeutralFallback};
///
/// let inner = ApiClassifier::from_config(&OracleConfig::default());
/// let oracle = NeutralFallback::new(inner);
/// // `oracle` implements EmotionClassifier and is safe to use even when
/// // the endpoint is unavailable.
/// ```
pub struct NeutralFallback<C: EmotionClassifier> {
    inner: C,
}

impl<C: EmotionClassifier> NeutralFallback<C> {
    /// Wrap `inner` with neutral-on-failure behaviour.
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// Return a reference to the wrapped classifier.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: EmotionClassifier + Send + Sync> EmotionClassifier for NeutralFallback<C> {
    /// Attempt classification; resolve to neutral if any error occurs.
    ///
    /// This implementation **never** returns `Err(_)`.
    async fn classify(&self, text: &str, prior_context: &str) -> Result<Emotion, OracleError> {
        match self.inner.classify(text, prior_context).await {
            Ok(emotion) => Ok(emotion),
            Err(err) => {
                log::warn!("classification failed — resolving to neutral: {err}");
                Ok(Emotion::Neutral)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Always succeeds with a fixed emotion.
    struct AlwaysOk(Emotion);

    #[async_trait]
    impl EmotionClassifier for AlwaysOk {
        async fn classify(&self, _text: &str, _ctx: &str) -> Result<Emotion, OracleError> {
            Ok(self.0)
        }
    }

    /// Always returns the given error kind.
    struct AlwaysFails(OracleErrorKind);

    enum OracleErrorKind {
        Request,
        Status,
        Parse,
        UnknownLabel,
    }

    #[async_trait]
    impl EmotionClassifier for AlwaysFails {
        async fn classify(&self, _text: &str, _ctx: &str) -> Result<Emotion, OracleError> {
            let err = match self.0 {
                OracleErrorKind::Request => OracleError::Request("connection refused".into()),
                OracleErrorKind::Status => OracleError::Status {
                    status: 500,
                    body: "server error".into(),
                },
                OracleErrorKind::Parse => OracleError::Parse("bad json".into()),
                OracleErrorKind::UnknownLabel => OracleError::UnknownLabel("bliss".into()),
            };
            Err(err)
        }
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn passes_through_success() {
        let oracle = NeutralFallback::new(AlwaysOk(Emotion::Joy));
        assert_eq!(oracle.classify("great", "").await.unwrap(), Emotion::Joy);
    }

    #[tokio::test]
    async fn request_error_resolves_to_neutral() {
        let oracle = NeutralFallback::new(AlwaysFails(OracleErrorKind::Request));
        assert_eq!(oracle.classify("text", "").await.unwrap(), Emotion::Neutral);
    }

    #[tokio::test]
    async fn status_error_resolves_to_neutral() {
        let oracle = NeutralFallback::new(AlwaysFails(OracleErrorKind::Status));
        assert_eq!(oracle.classify("text", "").await.unwrap(), Emotion::Neutral);
    }

    #[tokio::test]
    async fn parse_error_resolves_to_neutral() {
        let oracle = NeutralFallback::new(AlwaysFails(OracleErrorKind::Parse));
        assert_eq!(oracle.classify("text", "").await.unwrap(), Emotion::Neutral);
    }

    #[tokio::test]
    async fn unknown_label_resolves_to_neutral() {
        let oracle = NeutralFallback::new(AlwaysFails(OracleErrorKind::UnknownLabel));
        assert_eq!(oracle.classify("text", "").await.unwrap(), Emotion::Neutral);
    }

    #[tokio::test]
    async fn never_returns_err() {
        let oracle = NeutralFallback::new(AlwaysFails(OracleErrorKind::Request));
        assert!(oracle.classify("text", "").await.is_ok());
    }

    /// NeutralFallback<C> must itself be a valid EmotionClassifier.
    #[test]
    fn fallback_is_object_safe() {
        let inner = AlwaysOk(Emotion::Neutral);
        let _: Box<dyn EmotionClassifier> = Box::new(NeutralFallback::new(inner));
    }
}
