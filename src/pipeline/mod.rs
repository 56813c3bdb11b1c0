//! Pipeline orchestration connecting audio, speech, and the emotion oracle.
//!
//! The [`PipelineOrchestrator`] consumes [`PipelineEvent`]s over an async
//! channel and updates the [`SharedState`] that UI consumers read. All state
//! mutation happens on the orchestrator loop; classification completions
//! re-enter the same channel rather than touching state from spawned tasks.

mod runner;
mod state;

pub use runner::{PipelineEvent, PipelineOrchestrator, SessionCommand};
pub use state::{new_shared_state, AppState, RecordingState, SharedState};
