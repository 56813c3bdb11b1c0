//! Speech-recognition events consumed by the transcript segmenter.
//!
//! The recognizer itself is external to this crate: any continuous,
//! interim-enabled speech-to-text engine that emits [`SpeechEvent`]s in a
//! strictly increasing sequence can drive the pipeline. An event stream may
//! emit several interim revisions of the same logical utterance before a
//! final event closes it.

// ---------------------------------------------------------------------------
// SpeechEvent
// ---------------------------------------------------------------------------

/// One result from the external speech recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechEvent {
    /// `true` once the recognizer has settled on this text; finalized text
    /// is appended permanently to the committed transcript.
    pub is_final: bool,
    /// The recognized text for this result.
    pub text: String,
    /// Strictly increasing arrival index.
    pub sequence: u64,
}

impl SpeechEvent {
    /// A finalized (settled) result.
    pub fn final_text(text: impl Into<String>, sequence: u64) -> Self {
        Self {
            is_final: true,
            text: text.into(),
            sequence,
        }
    }

    /// An interim (provisional, fully-replaceable) result.
    pub fn interim(text: impl Into<String>, sequence: u64) -> Self {
        Self {
            is_final: false,
            text: text.into(),
            sequence,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
