//! Two-phase hop-and-spin animation.
//!
//! A session rises and half-turns (Ascending), then falls back and completes
//! the turn (Descending). The descending phase starts exactly at the end of
//! the ascending one on the session clock, so a long frame carries its
//! overshoot into the next phase instead of stretching the motion.

use crate::constants::{
    ASCEND_DURATION_MS, DESCEND_DURATION_MS, HOP_HEIGHT, SPIN_FULL_TURN, SPIN_HALF_TURN,
};
use crate::tween::{Easing, Pose, Tween};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationPhase {
    Ascending,
    Descending,
    Idle,
}

#[derive(Clone, Debug)]
pub struct AnimationConfig {
    pub ascend_ms: f64,
    pub descend_ms: f64,
    pub hop_height: f32,
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            ascend_ms: ASCEND_DURATION_MS,
            descend_ms: DESCEND_DURATION_MS,
            hop_height: HOP_HEIGHT,
            easing: Easing::Linear,
        }
    }
}

/// Phase boundaries crossed during one `advance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Ascending finished; Descending begins.
    Peaked,
    /// Descending finished; the session is over.
    Landed,
}

#[derive(Clone, Debug)]
pub struct SessionStep {
    pub pose: Pose,
    pub phase: AnimationPhase,
    pub events: SmallVec<[SessionEvent; 2]>,
}

#[derive(Clone, Debug)]
pub struct AnimationSession {
    phase: AnimationPhase,
    ascend: Tween,
    descend: Tween,
    /// Session clock origin; set by the first `advance`.
    started_at: Option<f64>,
    phase_elapsed_ms: f64,
}

impl AnimationSession {
    pub fn new(start_height: f32, start_rotation: f32, config: &AnimationConfig) -> Self {
        let rest = Pose {
            height: start_height,
            rotation: start_rotation,
        };
        let peak = Pose {
            height: start_height + config.hop_height,
            rotation: start_rotation + SPIN_HALF_TURN,
        };
        let landed = Pose {
            height: start_height,
            rotation: start_rotation + SPIN_FULL_TURN,
        };
        Self {
            phase: AnimationPhase::Ascending,
            ascend: Tween {
                from: rest,
                to: peak,
                duration_ms: config.ascend_ms,
                easing: config.easing,
            },
            descend: Tween {
                from: peak,
                to: landed,
                duration_ms: config.descend_ms,
                easing: config.easing,
            },
            started_at: None,
            phase_elapsed_ms: 0.0,
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == AnimationPhase::Idle
    }

    pub fn start_height(&self) -> f32 {
        self.ascend.from.height
    }

    pub fn peak_height(&self) -> f32 {
        self.ascend.to.height
    }

    pub fn start_rotation(&self) -> f32 {
        self.ascend.from.rotation
    }

    pub fn end_rotation(&self) -> f32 {
        self.descend.to.rotation
    }

    pub fn phase_elapsed_ms(&self) -> f64 {
        self.phase_elapsed_ms
    }

    /// Advance to `now_ms` on the host clock and return the pose to apply.
    pub fn advance(&mut self, now_ms: f64) -> SessionStep {
        let mut events = SmallVec::new();
        let start = *self.started_at.get_or_insert(now_ms);
        // A clock that steps backwards holds the current pose.
        let elapsed = (now_ms - start).max(0.0);

        if self.phase == AnimationPhase::Ascending {
            if self.ascend.is_complete(elapsed) {
                self.phase = AnimationPhase::Descending;
                events.push(SessionEvent::Peaked);
            } else {
                self.phase_elapsed_ms = elapsed;
                return self.step(self.ascend.sample(elapsed), events);
            }
        }

        if self.phase == AnimationPhase::Descending {
            let local = elapsed - self.ascend.duration_ms;
            if self.descend.is_complete(local) {
                self.phase = AnimationPhase::Idle;
                self.phase_elapsed_ms = 0.0;
                events.push(SessionEvent::Landed);
                return self.step(self.descend.to, events);
            }
            self.phase_elapsed_ms = local;
            return self.step(self.descend.sample(local), events);
        }

        self.step(self.descend.to, events)
    }

    fn step(&self, pose: Pose, events: SmallVec<[SessionEvent; 2]>) -> SessionStep {
        SessionStep {
            pose,
            phase: self.phase,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    fn session() -> AnimationSession {
        AnimationSession::new(1.0, 0.0, &AnimationConfig::default())
    }

    #[test]
    fn first_advance_anchors_the_clock() {
        let mut s = session();
        let step = s.advance(10_000.0);
        assert_eq!(step.phase, AnimationPhase::Ascending);
        assert_eq!(step.pose.height, 1.0);
        assert_eq!(step.pose.rotation, 0.0);
        assert!(step.events.is_empty());
    }

    #[test]
    fn phases_switch_at_exact_boundaries() {
        let mut s = session();
        s.advance(0.0);
        assert_eq!(s.advance(799.0).phase, AnimationPhase::Ascending);

        let peak = s.advance(800.0);
        assert_eq!(peak.phase, AnimationPhase::Descending);
        assert_eq!(peak.events.as_slice(), &[SessionEvent::Peaked]);
        assert!((peak.pose.height - 1.7).abs() < 1e-6);
        assert!((peak.pose.rotation - PI).abs() < 1e-6);

        assert_eq!(s.advance(1399.0).phase, AnimationPhase::Descending);
        let landed = s.advance(1400.0);
        assert_eq!(landed.phase, AnimationPhase::Idle);
        assert_eq!(landed.events.as_slice(), &[SessionEvent::Landed]);
        assert_eq!(landed.pose.height, 1.0);
        assert!((landed.pose.rotation - TAU).abs() < 1e-6);
        assert!(s.is_finished());
    }

    #[test]
    fn long_frame_crosses_both_boundaries_once() {
        let mut s = session();
        s.advance(0.0);
        let step = s.advance(5000.0);
        assert_eq!(
            step.events.as_slice(),
            &[SessionEvent::Peaked, SessionEvent::Landed]
        );
        assert!(s.advance(6000.0).events.is_empty());
    }

    #[test]
    fn overshoot_carries_into_descending() {
        let mut s = session();
        s.advance(0.0);
        s.advance(900.0);
        assert_eq!(s.phase(), AnimationPhase::Descending);
        assert!((s.phase_elapsed_ms() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn backwards_clock_holds_pose() {
        let mut s = session();
        s.advance(1000.0);
        let step = s.advance(500.0);
        assert_eq!(step.pose.height, 1.0);
        assert_eq!(step.phase, AnimationPhase::Ascending);
    }

    #[test]
    fn rotation_is_offset_from_start() {
        let s = AnimationSession::new(0.0, 0.5, &AnimationConfig::default());
        assert!((s.end_rotation() - (0.5 + TAU)).abs() < 1e-6);
        assert!((s.peak_height() - s.start_height() - 0.7).abs() < 1e-6);
    }
}
