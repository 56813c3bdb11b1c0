//! Loudness monitor — normalized volume from spectrum frames.
//!
//! [`LoudnessMonitor`] turns one [`SpectrumFrame`] per capture callback into
//! a volume value in `[0.0, 1.0]`:
//!
//! ```text
//! volume = min(mean(bins) / divisor, 1.0)
//! ```
//!
//! The divisor comes from the [`Sensitivity`] preset (quiet → 60,
//! normal → 100, loud → 160); a lower divisor means a quieter room reaches
//! full volume sooner.  A silent stream is not an error — it simply yields
//! `0.0`.

use crate::audio::SpectrumFrame;
use crate::config::Sensitivity;

// ---------------------------------------------------------------------------
// LoudnessMonitor
// ---------------------------------------------------------------------------

/// Computes normalized loudness from spectrum frames.
///
/// # Example
/// ```rust
/// use tonus::audio::{LoudnessMonitor, SpectrumFrame};
/// use tonus::config::Sensitivity;
///
/// let monitor = LoudnessMonitor::new(Sensitivity::Normal);
/// let silent = SpectrumFrame { bins: vec![0; 128] };
/// assert_eq!(monitor.measure(&silent), 0.0);
///
/// let loud = SpectrumFrame { bins: vec![255; 128] };
/// assert_eq!(monitor.measure(&loud), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct LoudnessMonitor {
    divisor: f32,
}

impl LoudnessMonitor {
    /// Create a monitor for the given sensitivity preset.
    pub fn new(sensitivity: Sensitivity) -> Self {
        Self {
            divisor: sensitivity.divisor(),
        }
    }

    /// Create a monitor with an explicit divisor (useful for tests).
    pub fn with_divisor(divisor: f32) -> Self {
        assert!(divisor > 0.0, "divisor must be > 0");
        Self { divisor }
    }

    /// Normalized loudness of one frame, clamped to `[0.0, 1.0]`.
    pub fn measure(&self, frame: &SpectrumFrame) -> f32 {
        (frame.mean_magnitude() / self.divisor).min(1.0)
    }

    /// The divisor currently in use.
    pub fn divisor(&self) -> f32 {
        self.divisor
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
