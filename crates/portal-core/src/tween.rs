//! Timed interpolation of a height/rotation pair.

use std::f32::consts::PI;

/// Easing curves. All are monotonic on [0, 1] with `f(0) = 0` and `f(1) = 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    QuadraticInOut,
    CubicOut,
    SineInOut,
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
            Easing::CubicOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Easing::SineInOut => 0.5 * (1.0 - (PI * t).cos()),
        }
    }
}

/// Height and rotation about the spin axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub height: f32,
    pub rotation: f32,
}

impl Pose {
    pub fn lerp(self, other: Pose, t: f32) -> Pose {
        Pose {
            height: self.height + (other.height - self.height) * t,
            rotation: self.rotation + (other.rotation - self.rotation) * t,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: Pose,
    pub to: Pose,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Tween {
    /// Raw progress in [0, 1]; a zero duration is complete immediately.
    #[inline]
    pub fn progress(&self, elapsed_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    pub fn sample(&self, elapsed_ms: f64) -> Pose {
        let t = self.easing.apply(self.progress(elapsed_ms));
        self.from.lerp(self.to, t)
    }

    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::QuadraticInOut,
        Easing::CubicOut,
        Easing::SineInOut,
    ];

    #[test]
    fn easings_hit_endpoints_and_are_monotonic() {
        for e in ALL {
            assert!(e.apply(0.0).abs() < 1e-6, "{e:?}");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{e:?}");
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = e.apply(i as f32 / 100.0);
                assert!(v + 1e-6 >= prev, "{e:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn easing_clamps_out_of_range_input() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::CubicOut.apply(2.0), 1.0);
    }

    #[test]
    fn tween_samples_endpoints_and_midpoint() {
        let tw = Tween {
            from: Pose {
                height: 1.0,
                rotation: 0.0,
            },
            to: Pose {
                height: 2.0,
                rotation: PI,
            },
            duration_ms: 800.0,
            easing: Easing::Linear,
        };
        assert_eq!(tw.sample(0.0), tw.from);
        assert_eq!(tw.sample(800.0), tw.to);
        assert_eq!(tw.sample(5000.0), tw.to);
        let mid = tw.sample(400.0);
        assert!((mid.height - 1.5).abs() < 1e-6);
        assert!((mid.rotation - PI / 2.0).abs() < 1e-6);
        assert!(!tw.is_complete(799.9));
        assert!(tw.is_complete(800.0));
    }

    #[test]
    fn zero_duration_is_immediately_complete() {
        let p = Pose {
            height: 0.0,
            rotation: 0.0,
        };
        let tw = Tween {
            from: p,
            to: Pose {
                height: 1.0,
                rotation: 1.0,
            },
            duration_ms: 0.0,
            easing: Easing::SineInOut,
        };
        assert_eq!(tw.progress(0.0), 1.0);
        assert_eq!(tw.sample(0.0), tw.to);
    }
}
