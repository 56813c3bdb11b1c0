//! Session and reward state shared with gamification/dashboard consumers.

pub mod rewards;

pub use rewards::{
    RecordingSession, RewardState, SessionError, NEW_EMOTION_POINTS, REPEAT_EMOTION_POINTS,
    SAVE_BONUS_POINTS,
};
