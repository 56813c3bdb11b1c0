//! Recording state machine and shared application state.
//!
//! [`RecordingState`] drives the session lifecycle. UI consumers (the orb
//! visualizer, garden, dashboard) read everything they need via
//! [`SharedState`]: current pipeline phase, displayed emotion, live volume,
//! transcript snapshots, reward state, and any user-facing notice.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<AppState>>` — cheap to
//! clone and safe to share across threads. Only the pipeline orchestrator
//! mutates it; consumers take read snapshots.

use std::sync::{Arc, Mutex};

use crate::config::AppConfig;
use crate::emotion::Emotion;
use crate::session::RewardState;

// ---------------------------------------------------------------------------
// RecordingState
// ---------------------------------------------------------------------------

/// Phases of a recording session.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──start──▶ Recording ──pause──▶ Paused ──resume──▶ Recording
///                 Recording/Paused ──stop──▶ Review
///                 Review ──save / discard(confirmed)──▶ Idle  (via reset)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    /// No session in progress.
    Idle,

    /// Microphone and recognizer are live; the transcript is growing.
    Recording,

    /// Session suspended; audio released, transcript retained.
    Paused,

    /// Session stopped; awaiting a save or discard decision.
    Review,
}

impl RecordingState {
    /// Returns `true` while audio and speech input are actively consumed.
    ///
    /// Loudness samples taken outside this state count as quiet, so the
    /// escalation counter decays across pauses.
    pub fn is_capturing(&self) -> bool {
        matches!(self, RecordingState::Recording)
    }

    /// A short human-readable label suitable for a status display.
    pub fn label(&self) -> &'static str {
        match self {
            RecordingState::Idle => "Idle",
            RecordingState::Recording => "Recording",
            RecordingState::Paused => "Paused",
            RecordingState::Review => "Review",
        }
    }
}

impl Default for RecordingState {
    fn default() -> Self {
        RecordingState::Idle
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Shared application state — the single source of truth for consumers.
///
/// Held behind [`SharedState`] (`Arc<Mutex<AppState>>`). The pipeline
/// orchestrator mutates it; UI consumers read it per frame.
pub struct AppState {
    /// Current phase of the recording session.
    pub recording: RecordingState,

    /// The emotion currently displayed by the visualizer.
    pub current_emotion: Emotion,

    /// Latest normalized loudness in `[0.0, 1.0]`; `0.0` while not capturing.
    pub volume: f32,

    /// Whether crashout escalation is currently overriding classification.
    pub escalated: bool,

    /// Snapshot of the committed (durable) transcript.
    pub committed: String,

    /// Snapshot of the interim (provisional) transcript preview.
    pub interim: String,

    /// Points, unlocked emotions, and saved sessions.
    pub rewards: RewardState,

    /// User-facing notice ("Nothing to save", "Saved (+100)", …).
    ///
    /// Cleared when the next session starts.
    pub notice: Option<String>,

    /// Current application configuration.
    pub config: AppConfig,

    /// Epoch-millis start of the in-progress session, if any.
    pub session_started_ms: Option<u64>,
}

impl AppState {
    /// Create a new `AppState` with sensible defaults.
    pub fn new(config: AppConfig) -> Self {
        Self {
            recording: RecordingState::Idle,
            current_emotion: Emotion::Neutral,
            volume: 0.0,
            escalated: false,
            committed: String::new(),
            interim: String::new(),
            rewards: RewardState::new(),
            notice: None,
            config,
            session_started_ms: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`AppState`].
///
/// Cheap to clone (`Arc` clone). Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<AppState>>;

/// Construct a new [`SharedState`] wrapping a default [`AppState`].
pub fn new_shared_state(config: AppConfig) -> SharedState {
    Arc::new(Mutex::new(AppState::new(config)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- RecordingState ---

    #[test]
    fn only_recording_is_capturing() {
        assert!(!RecordingState::Idle.is_capturing());
        assert!(RecordingState::Recording.is_capturing());
        assert!(!RecordingState::Paused.is_capturing());
        assert!(!RecordingState::Review.is_capturing());
    }

    #[test]
    fn labels() {
        assert_eq!(RecordingState::Idle.label(), "Idle");
        assert_eq!(RecordingState::Recording.label(), "Recording");
        assert_eq!(RecordingState::Paused.label(), "Paused");
        assert_eq!(RecordingState::Review.label(), "Review");
    }

    #[test]
    fn default_recording_state_is_idle() {
        assert_eq!(RecordingState::default(), RecordingState::Idle);
    }

    // ---- AppState / SharedState ---

    #[test]
    fn app_state_defaults_are_safe() {
        let state = AppState::default();
        assert_eq!(state.recording, RecordingState::Idle);
        assert_eq!(state.current_emotion, Emotion::Neutral);
        assert_eq!(state.volume, 0.0);
        assert!(!state.escalated);
        assert!(state.committed.is_empty());
        assert!(state.interim.is_empty());
        assert!(state.notice.is_none());
        assert!(state.session_started_ms.is_none());
    }

    #[test]
    fn shared_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedState>();
    }

    #[test]
    fn shared_state_can_be_cloned_and_mutated() {
        let state = new_shared_state(AppConfig::default());
        let state2 = Arc::clone(&state);

        state.lock().unwrap().recording = RecordingState::Recording;
        assert_eq!(
            state2.lock().unwrap().recording,
            RecordingState::Recording
        );
    }
}
