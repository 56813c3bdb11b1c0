//! Emotion oracle — classification of transcript chunks.
//!
//! This module provides:
//! * [`EmotionClassifier`] — async trait implemented by all oracle backends.
//! * [`ApiClassifier`] — HTTPS messages-endpoint adapter (production backend).
//! * [`KeywordClassifier`] — offline heuristic backend (no API key needed).
//! * [`NeutralFallback`] — wraps any backend; resolves failures to neutral.
//! * [`SYSTEM_PROMPT`] / prompt helpers — the wire contract with the model.
//! * [`OracleError`] — error variants for classification calls.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use tonus::config::AppConfig;
//! use tonus::oracle::{ApiClassifier, EmotionClassifier, NeutralFallback};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!
//!     // Build an oracle that never fails (degrades to neutral).
//!     let oracle = NeutralFallback::new(ApiClassifier::from_config(&config.oracle));
//!
//!     let emotion = oracle
//!         .classify("I am completely drained", "long week at work")
//!         .await
//!         .unwrap();
//!     println!("{emotion}");
//! }
//! ```

pub mod api;
pub mod classifier;
pub mod fallback;
pub mod keyword;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use api::ApiClassifier;
pub use classifier::{EmotionClassifier, OracleError};
pub use fallback::NeutralFallback;
pub use keyword::KeywordClassifier;
pub use prompt::{build_user_message, parse_emotion_response, SYSTEM_PROMPT};
