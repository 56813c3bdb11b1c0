//! Transcript segmenter — committed/interim transcript state and chunking.
//!
//! [`TranscriptSegmenter`] consumes batches of [`SpeechEvent`]s and maintains
//! the two halves of the transcript:
//!
//! * `committed` — append-only; grows by one space-separated segment per
//!   finalized result and is only ever cleared by an explicit
//!   [`reset`](TranscriptSegmenter::reset);
//! * `interim` — a live preview, fully replaced on every batch, since speech
//!   engines continually revise their best guess for the still-open
//!   utterance.
//!
//! Ingesting a batch can emit [`Chunk`]s for the emotion oracle under two
//! triggers: any non-empty finalized text is forwarded in full (even under
//! four words), and interim text is forwarded in four-word slices tracked by
//! a high-water mark so the pipeline gets low-latency feedback on long,
//! still-open utterances without waiting for finalization.

use crate::speech::SpeechEvent;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// New interim words required past the high-water mark before a non-final
/// chunk is emitted.
pub const INTERIM_CHUNK_WORDS: usize = 4;

/// Maximum characters of trailing committed transcript carried as prior
/// context on each chunk.
pub const CONTEXT_CHARS: usize = 300;

// ---------------------------------------------------------------------------
// Chunk
// ---------------------------------------------------------------------------

/// A unit of text bound for the emotion oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The text to classify; never empty or whitespace-only.
    pub text: String,
    /// `true` for finalized utterances — only these award points.
    pub is_final: bool,
    /// Trailing committed transcript at emission time (≤ [`CONTEXT_CHARS`]
    /// chars), captured before the chunk itself was appended.
    pub context: String,
}

// ---------------------------------------------------------------------------
// TranscriptSegmenter
// ---------------------------------------------------------------------------

/// Maintains transcript state and emits oracle-bound chunks.
///
/// # Example
/// ```rust
/// use tonus::speech::{SpeechEvent, TranscriptSegmenter};
///
/// let mut seg = TranscriptSegmenter::new();
/// let chunks = seg.ingest(&[SpeechEvent::final_text("I feel great", 0)]);
/// assert_eq!(chunks.len(), 1);
/// assert!(chunks[0].is_final);
/// assert_eq!(seg.committed(), "I feel great");
/// ```
#[derive(Debug, Default)]
pub struct TranscriptSegmenter {
    committed: String,
    interim: String,
    /// Count of interim words already forwarded to the oracle.
    word_mark: usize,
}

impl TranscriptSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Ingestion
    // -----------------------------------------------------------------------

    /// Process one batch of speech events in arrival order.
    ///
    /// Finalized and interim texts are concatenated into separate buckets.
    /// Non-empty finalized text is appended to the committed transcript
    /// (space-separated) and emitted as a final chunk; the interim preview is
    /// fully replaced and checked against the word high-water mark for a
    /// non-final chunk. Whitespace-only chunks are never emitted.
    pub fn ingest(&mut self, events: &[SpeechEvent]) -> Vec<Chunk> {
        let mut finalized = String::new();
        let mut interim = String::new();

        for event in events {
            if event.is_final {
                finalized.push_str(&event.text);
            } else {
                interim.push_str(&event.text);
            }
        }

        let mut chunks = Vec::new();

        let finalized = finalized.trim();
        if !finalized.is_empty() {
            // Context is captured before the chunk itself lands in committed.
            let context = self.tail_context();
            if !self.committed.is_empty() {
                self.committed.push(' ');
            }
            self.committed.push_str(finalized);
            chunks.push(Chunk {
                text: finalized.to_string(),
                is_final: true,
                context,
            });
        }

        // Interim is a live preview — always replaced, never appended.
        self.interim = interim;

        let words: Vec<&str> = self.interim.split_whitespace().collect();
        if words.len() >= self.word_mark + INTERIM_CHUNK_WORDS {
            let text = words[self.word_mark..].join(" ");
            if !text.trim().is_empty() {
                chunks.push(Chunk {
                    text,
                    is_final: false,
                    context: self.tail_context(),
                });
            }
            self.word_mark = words.len();
        }

        chunks
    }

    // -----------------------------------------------------------------------
    // Session lifecycle
    // -----------------------------------------------------------------------

    /// Reset the interim word high-water mark.
    ///
    /// Called when a recording session starts or resumes (not on pause).
    pub fn reset_mark(&mut self) {
        self.word_mark = 0;
    }

    /// Clear the interim preview (recording stopped; nothing is still open).
    pub fn clear_interim(&mut self) {
        self.interim.clear();
    }

    /// Wipe all transcript state: committed, interim, and the high-water
    /// mark. The only operation that ever shortens `committed`.
    pub fn reset(&mut self) {
        self.committed.clear();
        self.interim.clear();
        self.word_mark = 0;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The durable, append-only transcript.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// The current interim preview.
    pub fn interim(&self) -> &str {
        &self.interim
    }

    /// Current interim word high-water mark.
    pub fn word_mark(&self) -> usize {
        self.word_mark
    }

    /// The last [`CONTEXT_CHARS`] characters of the committed transcript,
    /// on char boundaries.
    pub fn tail_context(&self) -> String {
        let total = self.committed.chars().count();
        if total <= CONTEXT_CHARS {
            self.committed.clone()
        } else {
            self.committed.chars().skip(total - CONTEXT_CHARS).collect()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
