//! Speech stream handling — recognizer events and transcript segmentation.
//!
//! ```text
//! external recognizer → SpeechEvent batches → TranscriptSegmenter
//!                                               ├─ committed transcript
//!                                               ├─ interim preview
//!                                               └─ Chunks → emotion oracle
//! ```

pub mod event;
pub mod segmenter;

pub use event::SpeechEvent;
pub use segmenter::{Chunk, TranscriptSegmenter, CONTEXT_CHARS, INTERIM_CHUNK_WORDS};
