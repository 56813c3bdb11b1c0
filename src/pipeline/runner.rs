//! Pipeline orchestrator — drives the speech → oracle → reward loop.
//!
//! [`PipelineOrchestrator`] owns the [`SharedState`] and responds to
//! [`PipelineEvent`]s received over a `tokio::sync::mpsc` channel: session
//! commands, speech-event batches, loudness samples, and classification
//! completions.
//!
//! # Event flow
//!
//! ```text
//! Loudness(v)   ──▶ EscalationDetector ──▶ (force Crashout / suppress)
//! Speech(batch) ──▶ TranscriptSegmenter ──▶ Chunks
//!                       └─▶ tokio::spawn(oracle.classify) per chunk
//!                             └─▶ Classified { emotion, is_final } ──▶ back
//!                                 into the same channel
//! ```
//!
//! Because classification completions re-enter the channel, every mutation
//! of shared state happens on the single orchestrator loop — there is no
//! locking discipline beyond short read/write critical sections.
//!
//! # Completion ordering
//!
//! Multiple oracle calls may be in flight at once and may complete out of
//! issue order. The displayed emotion follows **last-completed-wins**: a
//! slow response landing after a newer one overwrites it. This mirrors the
//! upstream behavior and is a known limitation; there is no staleness guard.
//! Stopping a session does not cancel in-flight calls, so a late completion
//! can still change the displayed emotion after recording has stopped.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;

use crate::audio::EscalationDetector;
use crate::emotion::Emotion;
use crate::oracle::EmotionClassifier;
use crate::session::SAVE_BONUS_POINTS;
use crate::speech::{Chunk, SpeechEvent, TranscriptSegmenter};

use super::state::{RecordingState, SharedState};

// ---------------------------------------------------------------------------
// SessionCommand
// ---------------------------------------------------------------------------

/// User-driven session lifecycle commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Begin a fresh recording session (valid from Idle).
    Start,
    /// Suspend capture, keep the transcript (valid from Recording).
    Pause,
    /// Continue a paused session; resets the interim chunk mark.
    Resume,
    /// End capture and enter review (valid from Recording or Paused).
    Stop,
    /// Persist the session to the reward log (valid from Review).
    Save,
    /// Throw the session away. Requires `confirmed: true`; the transcript is
    /// unrecoverable once discarded.
    Discard { confirmed: bool },
}

// ---------------------------------------------------------------------------
// PipelineEvent
// ---------------------------------------------------------------------------

/// Everything the orchestrator reacts to.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// A session lifecycle command from the UI.
    Command(SessionCommand),
    /// One batch of recognizer results, in arrival order.
    Speech(Vec<SpeechEvent>),
    /// One normalized loudness sample from the monitor.
    Loudness(f32),
    /// A completed oracle call re-entering the loop.
    Classified { emotion: Emotion, is_final: bool },
    /// Stop the orchestrator loop.
    Shutdown,
}

// ---------------------------------------------------------------------------
// PipelineOrchestrator
// ---------------------------------------------------------------------------

/// Drives the complete emotion pipeline.
///
/// Create with [`PipelineOrchestrator::new`], then call [`run`](Self::run)
/// inside a tokio task.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use tonus::config::AppConfig;
/// use tonus::oracle::KeywordClassifier;
/// use tonus::pipeline::{new_shared_state, PipelineOrchestrator};
///
/// # async fn example() {
/// let state = new_shared_state(AppConfig::default());
/// let (tx, rx) = tokio::sync::mpsc::channel(64);
///
/// let orchestrator = PipelineOrchestrator::new(
///     state,
///     Arc::new(KeywordClassifier::new()),
///     tx.clone(),
/// );
/// tokio::spawn(async move { orchestrator.run(rx).await });
/// // feed `tx` with PipelineEvents from audio / speech / UI sources
/// # }
/// ```
pub struct PipelineOrchestrator {
    state: SharedState,
    segmenter: TranscriptSegmenter,
    detector: EscalationDetector,
    oracle: Arc<dyn EmotionClassifier>,
    /// Sender into the orchestrator's own channel; cloned into every spawned
    /// classification task so completions re-enter the loop.
    self_tx: mpsc::Sender<PipelineEvent>,
}

impl PipelineOrchestrator {
    /// Create a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `state`   — shared application state (also read by UI consumers).
    /// * `oracle`  — emotion classifier (e.g. `NeutralFallback<ApiClassifier>`).
    /// * `self_tx` — sender side of the channel whose receiver is passed to
    ///   [`run`](Self::run).
    pub fn new(
        state: SharedState,
        oracle: Arc<dyn EmotionClassifier>,
        self_tx: mpsc::Sender<PipelineEvent>,
    ) -> Self {
        Self {
            state,
            segmenter: TranscriptSegmenter::new(),
            detector: EscalationDetector::new(),
            oracle,
            self_tx,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the orchestrator until a [`PipelineEvent::Shutdown`] arrives or
    /// `rx` is closed.
    ///
    /// This is an `async fn` and should be spawned as a tokio task.
    pub async fn run(mut self, mut rx: mpsc::Receiver<PipelineEvent>) {
        while let Some(event) = rx.recv().await {
            match event {
                PipelineEvent::Command(cmd) => self.handle_command(cmd),
                PipelineEvent::Speech(events) => self.handle_speech(&events),
                PipelineEvent::Loudness(volume) => self.handle_loudness(volume),
                PipelineEvent::Classified { emotion, is_final } => {
                    self.handle_classified(emotion, is_final)
                }
                PipelineEvent::Shutdown => break,
            }
        }

        log::info!("pipeline: orchestrator shutting down");
    }

    // -----------------------------------------------------------------------
    // Command handling
    // -----------------------------------------------------------------------

    fn handle_command(&mut self, cmd: SessionCommand) {
        let recording = self.state.lock().unwrap().recording;
        log::debug!("pipeline: {cmd:?} in state {}", recording.label());

        match (recording, cmd) {
            (RecordingState::Idle, SessionCommand::Start) => {
                self.segmenter.reset_mark();
                let mut st = self.state.lock().unwrap();
                st.recording = RecordingState::Recording;
                st.notice = None;
                st.session_started_ms = Some(now_ms());
            }

            (RecordingState::Recording, SessionCommand::Pause) => {
                let mut st = self.state.lock().unwrap();
                st.recording = RecordingState::Paused;
                st.volume = 0.0;
            }

            (RecordingState::Paused, SessionCommand::Resume) => {
                self.segmenter.reset_mark();
                self.state.lock().unwrap().recording = RecordingState::Recording;
            }

            (RecordingState::Recording | RecordingState::Paused, SessionCommand::Stop) => {
                self.segmenter.clear_interim();
                let mut st = self.state.lock().unwrap();
                st.recording = RecordingState::Review;
                st.volume = 0.0;
                st.interim.clear();
            }

            (RecordingState::Review, SessionCommand::Save) => self.save_session(),

            (RecordingState::Review, SessionCommand::Discard { confirmed }) => {
                if confirmed {
                    self.reset_session();
                    self.state.lock().unwrap().notice = Some("Recording discarded".into());
                } else {
                    log::debug!("pipeline: discard not confirmed — keeping session");
                }
            }

            (state, cmd) => {
                log::warn!("pipeline: ignoring {cmd:?} in state {}", state.label());
            }
        }
    }

    /// Persist the reviewed session, or surface "nothing to save".
    fn save_session(&mut self) {
        let transcript = self.segmenter.committed().to_string();
        let mut st = self.state.lock().unwrap();

        let started_at_ms = st.session_started_ms.unwrap_or_else(now_ms);
        let duration_ms = now_ms().saturating_sub(started_at_ms);
        let dominant = st.current_emotion;

        let saved = st
            .rewards
            .save_session(&transcript, dominant, started_at_ms, duration_ms)
            .map(|session| session.id.clone());

        match saved {
            Ok(id) => {
                log::info!(
                    "pipeline: saved session {id} ({} chars, dominant {})",
                    transcript.len(),
                    dominant
                );
                st.notice = Some(format!("Saved (+{SAVE_BONUS_POINTS})"));
                drop(st);
                self.reset_session();
            }
            Err(err) => {
                log::warn!("pipeline: save rejected: {err}");
                st.notice = Some("Nothing to save".into());
            }
        }
    }

    /// Wipe per-session state: transcript, interim mark, escalation counter,
    /// displayed emotion. Rewards and saved sessions are untouched.
    fn reset_session(&mut self) {
        self.segmenter.reset();
        self.detector.reset();

        let mut st = self.state.lock().unwrap();
        st.recording = RecordingState::Idle;
        st.current_emotion = Emotion::Neutral;
        st.escalated = false;
        st.volume = 0.0;
        st.committed.clear();
        st.interim.clear();
        st.session_started_ms = None;
    }

    // -----------------------------------------------------------------------
    // Speech handling
    // -----------------------------------------------------------------------

    fn handle_speech(&mut self, events: &[SpeechEvent]) {
        {
            let st = self.state.lock().unwrap();
            if !st.recording.is_capturing() {
                log::debug!(
                    "pipeline: dropping {} speech event(s) in state {}",
                    events.len(),
                    st.recording.label()
                );
                return;
            }
        }

        let chunks = self.segmenter.ingest(events);

        {
            let mut st = self.state.lock().unwrap();
            st.committed = self.segmenter.committed().to_string();
            st.interim = self.segmenter.interim().to_string();
        }

        for chunk in chunks {
            self.spawn_classification(chunk);
        }
    }

    /// Fire one oracle call without blocking the loop; the completion comes
    /// back as a [`PipelineEvent::Classified`].
    fn spawn_classification(&self, chunk: Chunk) {
        let oracle = Arc::clone(&self.oracle);
        let tx = self.self_tx.clone();

        tokio::spawn(async move {
            let emotion = match oracle.classify(&chunk.text, &chunk.context).await {
                Ok(emotion) => emotion,
                Err(err) => {
                    log::warn!("pipeline: oracle call failed ({err}), using neutral");
                    Emotion::Neutral
                }
            };

            // Receiver may already be gone on shutdown; nothing to do then.
            let _ = tx
                .send(PipelineEvent::Classified {
                    emotion,
                    is_final: chunk.is_final,
                })
                .await;
        });
    }

    // -----------------------------------------------------------------------
    // Loudness / escalation handling
    // -----------------------------------------------------------------------

    fn handle_loudness(&mut self, volume: f32) {
        let capturing = self.state.lock().unwrap().recording.is_capturing();

        // Samples outside active recording count as quiet so the counter
        // decays across pauses and stops.
        let effective = if capturing { volume } else { 0.0 };
        let active = self.detector.sample(effective);

        let mut st = self.state.lock().unwrap();
        st.volume = effective;
        st.escalated = active;

        if active && st.current_emotion != Emotion::Crashout {
            log::info!(
                "pipeline: sustained high loudness (counter {}) — escalating to crashout",
                self.detector.counter()
            );
            st.current_emotion = Emotion::Crashout;
        }
    }

    // -----------------------------------------------------------------------
    // Classification completions
    // -----------------------------------------------------------------------

    fn handle_classified(&mut self, emotion: Emotion, is_final: bool) {
        let mut st = self.state.lock().unwrap();

        // Finalized chunks always count toward rewards, escalated or not.
        if is_final {
            let awarded = st.rewards.record_classification(emotion);
            log::debug!("pipeline: {emotion} classified (+{awarded} points)");
        }

        // While escalation is active the displayed emotion is pinned.
        if self.detector.active() {
            log::debug!("pipeline: {emotion} suppressed by active escalation");
            return;
        }

        st.current_emotion = emotion;
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Milliseconds since the Unix epoch.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
