use glam::Vec3;

// Shared scene/interaction tuning constants used by the web frontend.

// Hop-and-spin tween (milliseconds, scene units, radians)
pub const ASCEND_DURATION_MS: f64 = 800.0;
pub const DESCEND_DURATION_MS: f64 = 600.0;
pub const HOP_HEIGHT: f32 = 0.7;
pub const SPIN_HALF_TURN: f32 = std::f32::consts::PI;
pub const SPIN_FULL_TURN: f32 = std::f32::consts::TAU;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_EYE: Vec3 = Vec3::new(4.0, 2.0, 4.0);
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_BASE: f32 = 0.95; // dolly scale per wheel step
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 20.0;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-4;

// Fireflies
pub const FIREFLY_COUNT: usize = 30;
pub const FIREFLY_SPREAD_XZ: f32 = 4.0; // full width of the spawn square
pub const FIREFLY_MAX_HEIGHT: f32 = 1.5;
pub const FIREFLY_SIZE_DEFAULT: f32 = 100.0;
pub const FIREFLY_SIZE_MIN: f32 = 1.0;
pub const FIREFLY_SIZE_MAX: f32 = 500.0;

// Debug-panel defaults
pub const PORTAL_COLOR_START: &str = "#000000";
pub const PORTAL_COLOR_END: &str = "#ffffff";
pub const CLEAR_COLOR: &str = "#201919";
pub const POLE_LIGHT_COLOR: &str = "#ffffe5";
pub const PIXEL_RATIO_MAX: f32 = 2.0;

// Outline stage
pub const OUTLINE_COLOR: &str = "#ffffff";
pub const OUTLINE_THICKNESS: f32 = 0.02; // world units pushed along normals
