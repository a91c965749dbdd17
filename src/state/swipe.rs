// Per-touch-sequence swipe tracking for the slide strips, kept free of
// web-sys so it can be exercised on the host.

/// Horizontal displacement (px) at which a touch sequence commits to a
/// horizontal swipe. Only then may the default scroll be suppressed;
/// vertical scrolling is never blocked.
pub const SWIPE_COMMIT_PX: f64 = 10.0;

#[derive(Default, Debug, Clone)]
pub struct SwipeTracker {
    start_x: f64,
    start_y: f64,
    tracking: bool,
    swiping: bool,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f64, y: f64) {
        self.start_x = x;
        self.start_y = y;
        self.tracking = true;
        self.swiping = false;
    }

    /// Feed a touchmove. Returns true when this move is horizontal-
    /// dominant past the commit threshold, i.e. the caller should call
    /// `prevent_default()` on it. Commitment latches for the rest of the
    /// sequence even if a later move drifts back under the threshold.
    pub fn track(&mut self, x: f64, y: f64) -> bool {
        if !self.tracking {
            return false;
        }
        let dx = (x - self.start_x).abs();
        let dy = (y - self.start_y).abs();
        let horizontal = dx > dy && dx > SWIPE_COMMIT_PX;
        if horizontal {
            self.swiping = true;
        }
        horizontal
    }

    /// Feed the touchend. Returns the signed displacement (start minus
    /// end, so a finger moving left is positive) when the sequence had
    /// committed to a swipe. The tracker resets either way.
    pub fn finish(&mut self, end_x: f64) -> Option<f64> {
        let was_swiping = self.swiping;
        let start_x = self.start_x;
        *self = Self::default();
        if was_swiping { Some(start_x - end_x) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commits_only_past_horizontal_threshold() {
        let mut t = SwipeTracker::default();
        t.begin(100.0, 100.0);
        assert!(!t.track(109.0, 100.0));
        assert!(t.track(111.0, 100.0));
    }

    #[test]
    fn vertical_dominant_move_never_commits() {
        let mut t = SwipeTracker::default();
        t.begin(100.0, 100.0);
        assert!(!t.track(120.0, 140.0));
        assert_eq!(t.finish(120.0), None);
    }

    #[test]
    fn finish_reports_displacement_after_commit() {
        let mut t = SwipeTracker::default();
        t.begin(200.0, 100.0);
        assert!(t.track(150.0, 100.0));
        assert_eq!(t.finish(140.0), Some(60.0));
    }

    #[test]
    fn commitment_latches_even_if_later_moves_drift_back() {
        let mut t = SwipeTracker::default();
        t.begin(200.0, 100.0);
        assert!(t.track(150.0, 100.0));
        // Back near the start: no scroll suppression for this move, but
        // the sequence still resolves as a swipe.
        assert!(!t.track(195.0, 100.0));
        assert_eq!(t.finish(140.0), Some(60.0));
    }

    #[test]
    fn move_without_start_is_ignored() {
        let mut t = SwipeTracker::default();
        assert!(!t.track(500.0, 0.0));
        assert_eq!(t.finish(0.0), None);
    }

    #[test]
    fn tracker_resets_after_resolution() {
        let mut t = SwipeTracker::default();
        t.begin(200.0, 100.0);
        t.track(150.0, 100.0);
        t.finish(140.0);
        // The old sequence must not leak into the next one.
        assert!(!t.track(0.0, 0.0));
        t.begin(300.0, 100.0);
        assert!(t.track(250.0, 100.0));
        assert_eq!(t.finish(240.0), Some(60.0));
    }
}
