//! Audio pipeline — microphone capture → spectrum frames → loudness → escalation.
//!
//! # Pipeline
//!
//! ```text
//! Microphone → cpal callback → AudioChunk (mpsc) → SpectrumFrame::compute
//!           → LoudnessMonitor::measure → EscalationDetector::sample
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::mpsc;
//! use tonus::audio::{AudioCapture, AudioChunk, LoudnessMonitor, SpectrumFrame};
//! use tonus::config::Sensitivity;
//!
//! let (tx, rx) = mpsc::channel::<AudioChunk>();
//! let capture = AudioCapture::new().unwrap();
//! let _handle = capture.start(tx).unwrap(); // drop handle → stops stream
//!
//! let monitor = LoudnessMonitor::new(Sensitivity::Normal);
//! while let Ok(chunk) = rx.recv() {
//!     let frame = SpectrumFrame::compute(&chunk.samples, 128);
//!     println!("volume = {:.2}", monitor.measure(&frame));
//! }
//! ```

pub mod capture;
pub mod escalation;
pub mod loudness;
pub mod spectrum;

pub use capture::{AudioCapture, AudioChunk, CaptureError, StreamHandle};
pub use escalation::{EscalationDetector, ESCALATION_TRIP, ESCALATION_VOLUME};
pub use loudness::LoudnessMonitor;
pub use spectrum::SpectrumFrame;
