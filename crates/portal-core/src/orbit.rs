//! Damped orbit controls around a fixed target.

use crate::camera::Camera;
use crate::constants::{
    ORBIT_DAMPING_FACTOR, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_POLAR_EPSILON,
    ORBIT_ROTATE_SPEED, ORBIT_ZOOM_BASE,
};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Debug)]
pub struct OrbitConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
        }
    }
}

/// Radius, azimuth about +Y (from +Z towards +X) and polar angle from +Y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }
}

pub struct OrbitControls {
    pub config: OrbitConfig,
    target: Vec3,
    spherical: Spherical,
    delta: Spherical,
    scale: f32,
}

impl OrbitControls {
    /// Start from the camera's current eye/target.
    pub fn new(camera: &Camera, config: OrbitConfig) -> Self {
        Self {
            config,
            target: camera.target,
            spherical: Spherical::from_offset(camera.eye - camera.target),
            delta: Spherical::default(),
            scale: 1.0,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    /// Pointer drag in pixels; a drag the height of the viewport is a full turn.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !(viewport_height.is_finite() && viewport_height > 0.0) {
            return;
        }
        let k = TAU * self.config.rotate_speed / viewport_height;
        self.delta.theta -= dx * k;
        self.delta.phi -= dy * k;
    }

    /// Positive steps move the camera closer.
    pub fn dolly(&mut self, steps: f32) {
        if steps.is_finite() {
            self.scale *= ORBIT_ZOOM_BASE.powf(steps);
        }
    }

    /// Apply pending motion and write the result to `camera`. Returns
    /// whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let before = camera.eye;
        let f = if self.config.enable_damping {
            self.config.damping_factor
        } else {
            1.0
        };
        self.spherical.theta += self.delta.theta * f;
        self.spherical.phi += self.delta.phi * f;
        self.spherical.phi = self
            .spherical
            .phi
            .clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);
        self.spherical.radius = (self.spherical.radius * self.scale)
            .clamp(self.config.min_distance, self.config.max_distance);

        if self.config.enable_damping {
            self.delta.theta *= 1.0 - f;
            self.delta.phi *= 1.0 - f;
        } else {
            self.delta = Spherical::default();
        }
        self.scale = 1.0;

        camera.target = self.target;
        camera.eye = self.target + self.spherical.to_offset();
        (camera.eye - before).length_squared() > 1e-12
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_update_keeps_default_camera() {
        let mut cam = Camera::default();
        let eye = cam.eye;
        let mut orbit = OrbitControls::new(&cam, OrbitConfig::default());
        orbit.update(&mut cam);
        assert!((cam.eye - eye).length() < 1e-4);
    }

    #[test]
    fn damping_spreads_rotation_over_frames() {
        let mut cam = Camera::default();
        let mut orbit = OrbitControls::new(&cam, OrbitConfig::default());
        let radius = orbit.distance();
        orbit.rotate_by_pixels(100.0, 0.0, 600.0);
        let first = cam.eye;
        assert!(orbit.update(&mut cam));
        let after_one = cam.eye;
        for _ in 0..600 {
            orbit.update(&mut cam);
        }
        // Motion continues after the first frame, then settles.
        assert!((cam.eye - after_one).length() > (after_one - first).length());
        assert!(!orbit.update(&mut cam));
        assert!(((cam.eye - cam.target).length() - radius).abs() < 1e-4);
    }

    #[test]
    fn polar_angle_never_flips_over_the_pole() {
        let mut cam = Camera::default();
        let mut orbit = OrbitControls::new(
            &cam,
            OrbitConfig {
                enable_damping: false,
                ..OrbitConfig::default()
            },
        );
        orbit.rotate_by_pixels(0.0, 10_000.0, 600.0);
        orbit.update(&mut cam);
        assert!(cam.eye.y > 0.0);
        assert!(cam.eye.x.abs() + cam.eye.z.abs() > 0.0);
    }

    #[test]
    fn dolly_is_clamped() {
        let mut cam = Camera::default();
        let mut orbit = OrbitControls::new(&cam, OrbitConfig::default());
        orbit.dolly(1000.0);
        orbit.update(&mut cam);
        assert!((orbit.distance() - ORBIT_MIN_DISTANCE).abs() < 1e-5);
        orbit.dolly(-1000.0);
        orbit.update(&mut cam);
        assert!((orbit.distance() - ORBIT_MAX_DISTANCE).abs() < 1e-3);
    }

    #[test]
    fn zero_height_viewport_is_ignored() {
        let mut cam = Camera::default();
        let eye = cam.eye;
        let mut orbit = OrbitControls::new(&cam, OrbitConfig::default());
        orbit.rotate_by_pixels(50.0, 50.0, 0.0);
        orbit.update(&mut cam);
        assert!((cam.eye - eye).length() < 1e-4);
    }
}
