//! Crashout escalation detector — hysteresis over the loudness stream.
//!
//! [`EscalationDetector`] decides when sustained high loudness forces the
//! displayed emotion to [`Emotion::Crashout`](crate::emotion::Emotion),
//! overriding whatever the oracle says. A counter goes up by one for every
//! over-threshold sample and down by one (floored at zero) otherwise, so:
//!
//! * short loud bursts (laughing, coughing) never trip it — it takes more
//!   than [`ESCALATION_TRIP`] consecutive-net loud samples to activate;
//! * deactivation requires sustained quiet — the counter must decay back to
//!   or below the trip level, which avoids flicker at the boundary.
//!
//! The detector is evaluated once per loudness sample. The caller is
//! responsible for feeding `0.0` while no session is actively recording, so
//! the counter decays naturally across pauses.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Volume above which a sample counts as "loud".
pub const ESCALATION_VOLUME: f32 = 0.85;

/// Counter value that must be exceeded before escalation activates.
pub const ESCALATION_TRIP: u32 = 40;

// ---------------------------------------------------------------------------
// EscalationDetector
// ---------------------------------------------------------------------------

/// Hysteresis counter over normalized loudness samples.
///
/// # Example
/// ```rust
/// use tonus::audio::EscalationDetector;
///
/// let mut detector = EscalationDetector::new();
/// for _ in 0..41 {
///     detector.sample(0.9);
/// }
/// assert!(detector.active());
/// ```
#[derive(Debug, Clone)]
pub struct EscalationDetector {
    counter: u32,
    volume_threshold: f32,
    trip: u32,
    active: bool,
}

impl EscalationDetector {
    /// Create a detector with the standard thresholds
    /// ([`ESCALATION_VOLUME`], [`ESCALATION_TRIP`]).
    pub fn new() -> Self {
        Self::with_limits(ESCALATION_VOLUME, ESCALATION_TRIP)
    }

    /// Create a detector with custom thresholds (useful for tests).
    pub fn with_limits(volume_threshold: f32, trip: u32) -> Self {
        Self {
            counter: 0,
            volume_threshold,
            trip,
            active: false,
        }
    }

    /// Feed one loudness sample; returns whether escalation is active after
    /// this sample.
    ///
    /// Over-threshold samples increment the counter without an upper bound;
    /// everything else decrements it, floored at zero. Activation happens
    /// when the counter exceeds the trip level; deactivation once it has
    /// decayed back to or below it.
    pub fn sample(&mut self, volume: f32) -> bool {
        if volume > self.volume_threshold {
            self.counter += 1;
            if self.counter > self.trip {
                self.active = true;
            }
        } else {
            self.counter = self.counter.saturating_sub(1);
            if self.counter <= self.trip {
                self.active = false;
            }
        }
        self.active
    }

    /// Whether escalation is currently active.
    pub fn active(&self) -> bool {
        self.active
    }

    /// Current counter value.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Reset counter and active flag to the initial state.
    ///
    /// Called when a session is reset; the counter is owned by the active
    /// recording session and is not retained across it.
    pub fn reset(&mut self) {
        self.counter = 0;
        self.active = false;
    }
}

impl Default for EscalationDetector {
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
    fn starts_inactive_at_zero() {
        let detector = EscalationDetector::new();
        assert!(!detector.active());
        assert_eq!(detector.counter(), 0);
    }

    #[test]
    fn activates_only_after_trip_exceeded() {
        let mut detector = EscalationDetector::new();
        // Exactly 41 loud samples: counter reaches 41 > 40 on the last one.
        for i in 0..41 {
            let active = detector.sample(0.9);
            if i < 40 {
                assert!(!active, "active too early at sample {i}");
            } else {
                assert!(active, "should be active on sample {i}");
            }
        }
    }

    #[test]
    fn short_bursts_never_trip() {
        let mut detector = EscalationDetector::new();
        // Ten rounds of 20 loud / 20 quiet samples net out to zero.
        for _ in 0..10 {
            for _ in 0..20 {
                detector.sample(0.95);
            }
            for _ in 0..20 {
                detector.sample(0.1);
            }
        }
        assert!(!detector.active());
    }

    #[test]
    fn counter_floors_at_zero() {
        let mut detector = EscalationDetector::new();
        for _ in 0..5 {
            detector.sample(0.0);
        }
        assert_eq!(detector.counter(), 0);
    }

    #[test]
    fn deactivates_once_counter_decays_below_trip() {
        let mut detector = EscalationDetector::new();
        for _ in 0..50 {
            detector.sample(0.9);
        }
        assert!(detector.active());
        assert_eq!(detector.counter(), 50);

        // Nine quiet samples: counter 41, still above trip → still active.
        for _ in 0..9 {
            assert!(detector.sample(0.0));
        }
        // Tenth quiet sample: counter 40 ≤ trip → deactivated.
        assert!(!detector.sample(0.0));
        assert_eq!(detector.counter(), 40);
    }

    #[test]
    fn boundary_volume_does_not_count_as_loud() {
        let mut detector = EscalationDetector::new();
        // Exactly at the threshold is not over it.
        for _ in 0..100 {
            detector.sample(ESCALATION_VOLUME);
        }
        assert!(!detector.active());
        assert_eq!(detector.counter(), 0);
    }

    #[test]
    fn counter_has_no_upper_bound() {
        let mut detector = EscalationDetector::new();
        for _ in 0..1_000 {
            detector.sample(1.0);
        }
        assert_eq!(detector.counter(), 1_000);
        assert!(detector.active());
    }

    #[test]
    fn reset_clears_counter_and_active_flag() {
        let mut detector = EscalationDetector::new();
        for _ in 0..60 {
            detector.sample(0.9);
        }
        assert!(detector.active());

        detector.reset();
        assert!(!detector.active());
        assert_eq!(detector.counter(), 0);
    }

    #[test]
    fn custom_limits() {
        let mut detector = EscalationDetector::with_limits(0.5, 2);
        detector.sample(0.6);
        detector.sample(0.6);
        assert!(!detector.active());
        assert!(detector.sample(0.6)); // counter 3 > 2
    }
}
