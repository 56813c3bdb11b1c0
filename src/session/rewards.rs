//! Reward state — points, unlocked emotions, and saved sessions.
//!
//! [`RewardState`] is the gamification ledger the garden and dashboard
//! consumers read. It outlives any single recording session: resetting a
//! session never touches points or saved sessions.
//!
//! Point rules:
//! * first classification of a label → [`NEW_EMOTION_POINTS`] and the label
//!   joins the unlocked set (which only grows);
//! * repeat classification → [`REPEAT_EMOTION_POINTS`];
//! * saving a session → [`SAVE_BONUS_POINTS`] flat.
//!
//! Classification points are awarded only for finalized chunks; the
//! orchestrator enforces that.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::emotion::Emotion;

// ---------------------------------------------------------------------------
// Point constants
// ---------------------------------------------------------------------------

/// Awarded the first time a label is ever classified.
pub const NEW_EMOTION_POINTS: u64 = 50;

/// Awarded for classifying an already-unlocked label.
pub const REPEAT_EMOTION_POINTS: u64 = 5;

/// Flat bonus for saving a recording session.
pub const SAVE_BONUS_POINTS: u64 = 100;

// ---------------------------------------------------------------------------
// RecordingSession
// ---------------------------------------------------------------------------

/// One completed, saved recording. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingSession {
    /// Identifier derived from the session's epoch-millis start timestamp.
    pub id: String,
    /// Session start, milliseconds since the Unix epoch.
    pub started_at_ms: u64,
    /// The full committed transcript at save time.
    pub transcript: String,
    /// The emotion displayed when the session was saved.
    pub dominant_emotion: Emotion,
    /// Wall-clock session length in milliseconds.
    pub duration_ms: u64,
}

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Errors surfaced by reward-state operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Saving was attempted with an empty/whitespace-only transcript.
    #[error("nothing to save")]
    NothingToSave,
}

// ---------------------------------------------------------------------------
// RewardState
// ---------------------------------------------------------------------------

/// Points, unlocked emotions, and the saved-session log.
///
/// # Example
/// ```rust
/// use tonus::emotion::Emotion;
/// use tonus::session::RewardState;
///
/// let mut rewards = RewardState::new();
/// assert_eq!(rewards.record_classification(Emotion::Joy), 50); // new
/// assert_eq!(rewards.record_classification(Emotion::Joy), 5);  // repeat
/// assert_eq!(rewards.points(), 55);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardState {
    points: u64,
    /// Unlock order is preserved for display; membership only ever grows.
    unlocked: Vec<Emotion>,
    sessions: Vec<RecordingSession>,
}

impl RewardState {
    /// Fresh state: zero points, neutral pre-unlocked, no sessions.
    pub fn new() -> Self {
        Self {
            points: 0,
            unlocked: vec![Emotion::Neutral],
            sessions: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Record one finalized-chunk classification result.
    ///
    /// Returns the points awarded: [`NEW_EMOTION_POINTS`] if `emotion` was
    /// not yet unlocked (it is added exactly once), otherwise
    /// [`REPEAT_EMOTION_POINTS`].
    pub fn record_classification(&mut self, emotion: Emotion) -> u64 {
        let awarded = if self.unlocked.contains(&emotion) {
            REPEAT_EMOTION_POINTS
        } else {
            self.unlocked.push(emotion);
            NEW_EMOTION_POINTS
        };
        self.points += awarded;
        awarded
    }

    /// Append a new immutable [`RecordingSession`] and award the save bonus.
    ///
    /// # Errors
    ///
    /// [`SessionError::NothingToSave`] when `transcript` is empty or
    /// whitespace-only; reward state is left unchanged.
    pub fn save_session(
        &mut self,
        transcript: &str,
        dominant_emotion: Emotion,
        started_at_ms: u64,
        duration_ms: u64,
    ) -> Result<&RecordingSession, SessionError> {
        if transcript.trim().is_empty() {
            return Err(SessionError::NothingToSave);
        }

        self.sessions.push(RecordingSession {
            id: started_at_ms.to_string(),
            started_at_ms,
            transcript: transcript.to_string(),
            dominant_emotion,
            duration_ms,
        });
        self.points += SAVE_BONUS_POINTS;

        // Just pushed, so last() is the new session.
        Ok(self.sessions.last().unwrap())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Total accumulated points.
    pub fn points(&self) -> u64 {
        self.points
    }

    /// Emotions unlocked so far, in unlock order.
    pub fn unlocked(&self) -> &[Emotion] {
        &self.unlocked
    }

    /// Whether `emotion` has been unlocked.
    pub fn is_unlocked(&self, emotion: Emotion) -> bool {
        self.unlocked.contains(&emotion)
    }

    /// All saved sessions, oldest first.
    pub fn sessions(&self) -> &[RecordingSession] {
        &self.sessions
    }
}

impl Default for RewardState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_has_neutral_unlocked() {
        let rewards = RewardState::new();
        assert_eq!(rewards.points(), 0);
        assert_eq!(rewards.unlocked(), &[Emotion::Neutral]);
        assert!(rewards.sessions().is_empty());
    }

    #[test]
    fn new_label_awards_50_and_unlocks_once() {
        let mut rewards = RewardState::new();
        assert_eq!(rewards.record_classification(Emotion::Anger), 50);
        assert!(rewards.is_unlocked(Emotion::Anger));

        // Idempotent unlocking: classifying again awards only 5 and does not
        // duplicate the set entry.
        assert_eq!(rewards.record_classification(Emotion::Anger), 5);
        let anger_count = rewards
            .unlocked()
            .iter()
            .filter(|&&e| e == Emotion::Anger)
            .count();
        assert_eq!(anger_count, 1);
        assert_eq!(rewards.points(), 55);
    }

    #[test]
    fn preunlocked_neutral_awards_repeat_points() {
        let mut rewards = RewardState::new();
        assert_eq!(rewards.record_classification(Emotion::Neutral), 5);
    }

    #[test]
    fn unlocked_set_only_grows() {
        let mut rewards = RewardState::new();
        for emotion in Emotion::ALL {
            rewards.record_classification(emotion);
        }
        assert_eq!(rewards.unlocked().len(), Emotion::ALL.len());
        for emotion in Emotion::ALL {
            rewards.record_classification(emotion);
        }
        assert_eq!(rewards.unlocked().len(), Emotion::ALL.len());
    }

    #[test]
    fn save_session_appends_and_awards_100() {
        let mut rewards = RewardState::new();
        let session = rewards
            .save_session("hello", Emotion::Joy, 1_700_000_000_000, 42_000)
            .expect("save should succeed")
            .clone();

        assert_eq!(session.id, "1700000000000");
        assert_eq!(session.transcript, "hello");
        assert_eq!(session.dominant_emotion, Emotion::Joy);
        assert_eq!(session.duration_ms, 42_000);
        assert_eq!(rewards.sessions().len(), 1);
        assert_eq!(rewards.points(), 100);
    }

    #[test]
    fn save_empty_transcript_is_rejected_and_state_unchanged() {
        let mut rewards = RewardState::new();
        rewards.record_classification(Emotion::Joy);
        let points_before = rewards.points();

        let err = rewards
            .save_session("", Emotion::Joy, 0, 0)
            .expect_err("empty save must be rejected");
        assert_eq!(err, SessionError::NothingToSave);

        let err = rewards
            .save_session("   \t ", Emotion::Joy, 0, 0)
            .expect_err("whitespace save must be rejected");
        assert_eq!(err, SessionError::NothingToSave);

        assert_eq!(rewards.points(), points_before);
        assert!(rewards.sessions().is_empty());
    }

    #[test]
    fn saved_sessions_accumulate_in_order() {
        let mut rewards = RewardState::new();
        rewards.save_session("first", Emotion::Neutral, 1, 10).unwrap();
        rewards.save_session("second", Emotion::Sadness, 2, 20).unwrap();

        let ids: Vec<&str> = rewards.sessions().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(rewards.points(), 200);
    }

    #[test]
    fn reward_state_serializes_for_consumers() {
        let mut rewards = RewardState::new();
        rewards.record_classification(Emotion::Burnout);
        rewards.save_session("log entry", Emotion::Burnout, 5, 50).unwrap();

        let json = serde_json::to_string(&rewards).unwrap();
        let back: RewardState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.points(), rewards.points());
        assert_eq!(back.unlocked(), rewards.unlocked());
        assert_eq!(back.sessions(), rewards.sessions());
    }
}
