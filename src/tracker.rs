use egui::Pos2;
use log::{debug, trace};

use crate::stroke::PendingPath;

/// Whether a touch contact is currently open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    Idle,
    Tracking,
}

/// What a move sample did to the pending path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// No contact is open, nothing to extend
    Idle,
    /// Movement stayed under the tolerance on both axes
    Jitter,
    /// The path grew by one quadratic segment
    Extended,
}

/// Turns raw pointer samples into a smoothed open curve.
///
/// Each accepted sample adds a quadratic segment whose control point is the
/// previous sample and whose end is the midpoint between the two, so the
/// drawn curve trails the finger by half a sample.
#[derive(Debug, Clone)]
pub struct StrokeTracker {
    phase: TrackerPhase,
    path: PendingPath,
    /// Last sample that extended the path (or the contact origin)
    current: Pos2,
    /// Latest raw sample, accepted or not
    motion: Pos2,
    tolerance: f32,
}

impl StrokeTracker {
    pub fn new(tolerance: f32) -> Self {
        Self {
            phase: TrackerPhase::Idle,
            path: PendingPath::new(),
            current: Pos2::ZERO,
            motion: Pos2::ZERO,
            tolerance,
        }
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn path(&self) -> &PendingPath {
        &self.path
    }

    /// Last committed point
    pub fn current(&self) -> Pos2 {
        self.current
    }

    /// Latest raw sample
    pub fn motion(&self) -> Pos2 {
        self.motion
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Contact down: open a fresh path at `pos`
    pub fn start(&mut self, pos: Pos2) {
        self.motion = pos;
        self.path.move_to(pos);
        self.current = pos;
        self.phase = TrackerPhase::Tracking;
        debug!("Stroke started at ({}, {})", pos.x, pos.y);
    }

    /// Contact moved. Compared per axis against the tolerance, not by
    /// Euclidean distance. Non-finite samples are treated as jitter.
    pub fn move_to(&mut self, pos: Pos2) -> Motion {
        if self.phase == TrackerPhase::Idle {
            return Motion::Idle;
        }
        if !pos.x.is_finite() || !pos.y.is_finite() {
            trace!("Ignoring non-finite sample ({}, {})", pos.x, pos.y);
            return Motion::Jitter;
        }
        self.motion = pos;

        let dx = (pos.x - self.current.x).abs();
        let dy = (pos.y - self.current.y).abs();
        if dx < self.tolerance && dy < self.tolerance {
            trace!("Ignoring jitter of ({dx}, {dy})");
            return Motion::Jitter;
        }

        let midpoint = Pos2::new((pos.x + self.current.x) / 2.0, (pos.y + self.current.y) / 2.0);
        self.path.quad_to(self.current, midpoint);
        self.current = pos;
        Motion::Extended
    }

    /// Contact up: discard the path. Whatever was already composited stays.
    pub fn end(&mut self) {
        if self.phase == TrackerPhase::Tracking {
            debug!("Stroke ended with {} segments", self.path.segments().len());
        }
        self.path.reset();
        self.phase = TrackerPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::PathSegment;
    use egui::pos2;

    #[test]
    fn test_start_opens_path() {
        let mut tracker = StrokeTracker::new(8.0);
        assert_eq!(tracker.phase(), TrackerPhase::Idle);

        tracker.start(pos2(10.0, 10.0));
        assert_eq!(tracker.phase(), TrackerPhase::Tracking);
        assert_eq!(tracker.current(), pos2(10.0, 10.0));
        assert_eq!(tracker.path().segments(), &[PathSegment::MoveTo(pos2(10.0, 10.0))]);
    }

    #[test]
    fn test_move_while_idle_is_noop() {
        let mut tracker = StrokeTracker::new(8.0);
        assert_eq!(tracker.move_to(pos2(50.0, 50.0)), Motion::Idle);
        assert!(tracker.path().is_empty());
        assert_eq!(tracker.current(), Pos2::ZERO);
    }

    #[test]
    fn test_sub_tolerance_move_is_jitter() {
        let mut tracker = StrokeTracker::new(8.0);
        tracker.start(pos2(10.0, 10.0));
        let before = tracker.path().clone();

        assert_eq!(tracker.move_to(pos2(17.0, 3.0)), Motion::Jitter);
        assert_eq!(tracker.path(), &before);
        assert_eq!(tracker.current(), pos2(10.0, 10.0));
        assert_eq!(tracker.motion(), pos2(17.0, 3.0));
    }

    #[test]
    fn test_diagonal_below_tolerance_on_each_axis_is_jitter() {
        // True distance is ~9.9, still suppressed because both axes are under 8
        let mut tracker = StrokeTracker::new(8.0);
        tracker.start(pos2(0.0, 0.0));
        assert_eq!(tracker.move_to(pos2(7.0, 7.0)), Motion::Jitter);
    }

    #[test]
    fn test_one_axis_at_tolerance_extends() {
        let mut tracker = StrokeTracker::new(8.0);
        tracker.start(pos2(0.0, 0.0));
        assert_eq!(tracker.move_to(pos2(8.0, 0.0)), Motion::Extended);
        assert_eq!(tracker.current(), pos2(8.0, 0.0));
    }

    #[test]
    fn test_extension_uses_midpoint() {
        let mut tracker = StrokeTracker::new(8.0);
        tracker.start(pos2(10.0, 10.0));
        tracker.move_to(pos2(30.0, 30.0));
        tracker.move_to(pos2(30.0, 50.0));

        assert_eq!(
            tracker.path().segments(),
            &[
                PathSegment::MoveTo(pos2(10.0, 10.0)),
                PathSegment::QuadTo { control: pos2(10.0, 10.0), end: pos2(20.0, 20.0) },
                PathSegment::QuadTo { control: pos2(30.0, 30.0), end: pos2(30.0, 40.0) },
            ]
        );
        assert_eq!(tracker.current(), pos2(30.0, 50.0));
    }

    #[test]
    fn test_non_finite_sample_is_jitter() {
        let mut tracker = StrokeTracker::new(8.0);
        tracker.start(pos2(10.0, 10.0));

        assert_eq!(tracker.move_to(pos2(f32::NAN, 10.0)), Motion::Jitter);
        assert_eq!(tracker.move_to(pos2(40.0, f32::INFINITY)), Motion::Jitter);
        assert_eq!(tracker.current(), pos2(10.0, 10.0));
        assert_eq!(tracker.motion(), pos2(10.0, 10.0));
        assert_eq!(tracker.path().segments().len(), 1);

        assert_eq!(tracker.move_to(pos2(60.0, 60.0)), Motion::Extended);
        assert!(tracker.path().to_skia_path().is_some());
    }

    #[test]
    fn test_end_then_start_leaves_no_residue() {
        let mut tracker = StrokeTracker::new(8.0);
        tracker.start(pos2(10.0, 10.0));
        tracker.move_to(pos2(40.0, 40.0));
        tracker.end();
        assert!(tracker.path().is_empty());
        assert_eq!(tracker.phase(), TrackerPhase::Idle);

        tracker.start(pos2(5.0, 6.0));
        assert_eq!(tracker.path().points(), vec![pos2(5.0, 6.0)]);
    }
}
