//! TONUS — real-time mood journaling engine.
//!
//! Listens to speech, segments the live transcript into classifiable chunks,
//! asks an emotion oracle to label each one, and turns the labels into
//! unlocks and points. A parallel loudness monitor watches for sustained
//! shouting and escalates the session to crashout while it lasts.
//!
//! # Architecture
//!
//! ```text
//! microphone ──▶ audio::SpectrumFrame ──▶ LoudnessMonitor ──▶ volume
//!                                              └─▶ EscalationDetector
//!
//! recognizer ──▶ speech::SpeechEvent ──▶ TranscriptSegmenter ──▶ Chunk
//!                                              └─▶ oracle::EmotionClassifier
//!                                                       └─▶ Emotion
//!
//! pipeline::PipelineOrchestrator ties the above to session::RewardState
//! over a single tokio mpsc channel.
//! ```
//!
//! # Modules
//!
//! - [`emotion`]  — the closed set of 13 emotion labels
//! - [`config`]   — TOML settings (sensitivity, oracle credentials, paths)
//! - [`audio`]    — capture, spectrum frames, loudness, escalation detection
//! - [`speech`]   — recognizer events and transcript segmentation
//! - [`oracle`]   — classifier trait, HTTP and keyword backends, fallback
//! - [`session`]  — recording sessions, points, and emotion unlocks
//! - [`pipeline`] — the orchestrator and shared application state

pub mod audio;
pub mod config;
pub mod emotion;
pub mod oracle;
pub mod pipeline;
pub mod session;
pub mod speech;
