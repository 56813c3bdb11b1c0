//! Magnitude-bin snapshots of the live audio signal.
//!
//! [`SpectrumFrame`] is the input unit of the loudness monitor: a fixed
//! number of byte magnitudes in `[0, 255]`, one frame per capture callback.
//! The bins are band-energy estimates computed by chunking the raw sample
//! buffer and taking per-chunk RMS, which is cheap and good enough for a
//! loudness average — the monitor only ever looks at the mean across bins.
//!
//! # Example
//!
//! ```rust
//! use tonus::audio::SpectrumFrame;
//!
//! // Simulate a capture buffer at half amplitude
//! let samples = vec![0.5_f32; 2048];
//! let frame = SpectrumFrame::compute(&samples, 128);
//! assert_eq!(frame.bins.len(), 128);
//! assert!(frame.mean_magnitude() > 0.0);
//! ```

// ---------------------------------------------------------------------------
// SpectrumFrame
// ---------------------------------------------------------------------------

/// One magnitude snapshot of the live audio signal.
///
/// Each element of `bins` holds the RMS amplitude of an equal-width chunk of
/// the source buffer scaled to a byte (`0..=255`).
#[derive(Debug, Clone)]
pub struct SpectrumFrame {
    /// Byte magnitudes, one per band.
    pub bins: Vec<u8>,
}

impl SpectrumFrame {
    /// Compute `num_bins` byte magnitudes from `samples`.
    ///
    /// The samples are divided into `num_bins` equal-sized chunks; the RMS of
    /// each chunk, scaled by 255 and clamped, becomes one bin.  If `samples`
    /// is shorter than `num_bins` the remaining bins are padded with `0`.
    ///
    /// # Arguments
    ///
    /// * `samples` — interleaved `f32` PCM in `[-1.0, 1.0]`.
    /// * `num_bins` — number of bins to produce.  If `0`, an empty frame is
    ///   returned.
    pub fn compute(samples: &[f32], num_bins: usize) -> Self {
        if num_bins == 0 {
            return Self { bins: Vec::new() };
        }

        if samples.is_empty() {
            return Self {
                bins: vec![0; num_bins],
            };
        }

        let chunk_size = (samples.len() / num_bins).max(1);

        let mut bins: Vec<u8> = samples
            .chunks(chunk_size)
            .take(num_bins)
            .map(|chunk| {
                let mean_sq: f32 =
                    chunk.iter().map(|s| s * s).sum::<f32>() / chunk.len() as f32;
                (mean_sq.sqrt().min(1.0) * 255.0) as u8
            })
            .collect();

        // Pad any remaining bins with 0
        bins.resize(num_bins, 0);

        Self { bins }
    }

    /// Arithmetic mean magnitude across all bins.
    ///
    /// `0.0` for an empty frame.
    pub fn mean_magnitude(&self) -> f32 {
        if self.bins.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.bins.iter().map(|&b| b as u32).sum();
        sum as f32 / self.bins.len() as f32
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Returns `true` when there are no bins.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_number_of_bins() {
        let samples = vec![0.3_f32; 4096];
        let frame = SpectrumFrame::compute(&samples, 128);
        assert_eq!(frame.bins.len(), 128);
    }

    #[test]
    fn full_scale_signal_saturates_bins() {
        let samples = vec![1.0_f32; 1_280];
        let frame = SpectrumFrame::compute(&samples, 10);
        for &b in &frame.bins {
            assert_eq!(b, 255);
        }
        assert!((frame.mean_magnitude() - 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn silent_signal_yields_zero_bins() {
        let samples = vec![0.0_f32; 1_280];
        let frame = SpectrumFrame::compute(&samples, 10);
        for &b in &frame.bins {
            assert_eq!(b, 0);
        }
        assert_eq!(frame.mean_magnitude(), 0.0);
    }

    #[test]
    fn empty_input_returns_zero_bins() {
        let frame = SpectrumFrame::compute(&[], 10);
        assert_eq!(frame.bins.len(), 10);
        assert_eq!(frame.mean_magnitude(), 0.0);
    }

    #[test]
    fn zero_num_bins_returns_empty() {
        let frame = SpectrumFrame::compute(&[0.5_f32; 100], 0);
        assert!(frame.is_empty());
        assert_eq!(frame.mean_magnitude(), 0.0);
    }

    #[test]
    fn short_input_padded_with_zeros() {
        // One sample cannot fill 10 bins; the tail must be zero padding.
        let frame = SpectrumFrame::compute(&[0.5_f32; 1], 10);
        assert_eq!(frame.bins.len(), 10);
        assert!(frame.bins.iter().skip(1).all(|&b| b == 0));
    }

    #[test]
    fn mean_reflects_half_amplitude() {
        // Constant 0.5 amplitude → RMS 0.5 → bin value 127
        let samples = vec![0.5_f32; 1_280];
        let frame = SpectrumFrame::compute(&samples, 10);
        let mean = frame.mean_magnitude();
        assert!((mean - 127.0).abs() <= 1.0, "mean = {mean}");
    }
}
