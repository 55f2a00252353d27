//! Live-display scale tracking.
//!
//! The one piece of state the system carries across processing calls. It
//! belongs to the display layer, which passes it by reference into each
//! render step; the core pipeline never touches it.

/// Fraction of the tracked maximum kept per update.
pub const SCALE_DECAY: f64 = 0.95;

/// Headroom factor over the current frame maximum, so the live trace
/// never touches the top of the plot.
pub const SCALE_HEADROOM: f64 = 1.2;

/// Slowly decaying maximum used to normalize live profiles for display.
///
/// Each update blends the current frame maximum into the tracked value
/// with [`SCALE_DECAY`], floored at [`SCALE_HEADROOM`] times the frame
/// maximum. Earlier revisions of this logic disagreed on the decay rate;
/// the constants pin the chosen policy in one place.
///
/// # Example
///
/// ```
/// use bandpipe::display::DisplayScaleTracker;
///
/// let mut tracker = DisplayScaleTracker::new();
/// assert_eq!(tracker.update(1.0), 1.2);
/// // A quieter frame decays the scale instead of snapping down.
/// let scale = tracker.update(0.1);
/// assert!(scale > 1.0 && scale < 1.2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplayScaleTracker {
    max_seen: f64,
}

impl DisplayScaleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one frame's maximum into the tracked scale and returns the
    /// scale to divide by this frame. Non-finite or non-positive maxima
    /// leave the tracker unchanged.
    pub fn update(&mut self, frame_max: f64) -> f64 {
        if !frame_max.is_finite() || frame_max <= 0.0 {
            return self.max_seen;
        }
        let decayed = self.max_seen * SCALE_DECAY + frame_max * (1.0 - SCALE_DECAY);
        self.max_seen = decayed.max(frame_max * SCALE_HEADROOM);
        self.max_seen
    }

    pub fn scale(&self) -> f64 {
        self.max_seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_sets_headroom_scale() {
        let mut tracker = DisplayScaleTracker::new();
        let scale = tracker.update(100.0);
        assert!((scale - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_steady_signal_holds_steady_scale() {
        let mut tracker = DisplayScaleTracker::new();
        for _ in 0..50 {
            tracker.update(100.0);
        }
        assert!((tracker.scale() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_decays_toward_quieter_signal() {
        let mut tracker = DisplayScaleTracker::new();
        tracker.update(100.0);
        for _ in 0..200 {
            tracker.update(10.0);
        }
        // Converges to the headroom floor of the quieter signal.
        assert!((tracker.scale() - 12.0).abs() < 0.5);
    }

    #[test]
    fn test_brighter_frame_snaps_scale_up() {
        let mut tracker = DisplayScaleTracker::new();
        tracker.update(10.0);
        let scale = tracker.update(100.0);
        assert!((scale - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_maxima_are_ignored() {
        let mut tracker = DisplayScaleTracker::new();
        tracker.update(100.0);
        let before = tracker.scale();
        tracker.update(0.0);
        tracker.update(-5.0);
        tracker.update(f64::NAN);
        assert_eq!(tracker.scale(), before);
    }
}
