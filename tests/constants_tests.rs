// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use portal_core::constants as scene;

#[test]
#[allow(clippy::assertions_on_constants)]
fn web_constants_are_sane() {
    assert!(!CANVAS_ID.is_empty());
    assert!(!CANVAS_ID.starts_with('#'));
    assert!(AXE_ASSET_URL.ends_with(".bin"));
    assert!(!AXE_ASSET_URL.starts_with('/'));
    assert!(CLICK_DRAG_TOLERANCE_PX > 0.0 && CLICK_DRAG_TOLERANCE_PX < 20.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scene_constants_relate() {
    assert!(scene::ASCEND_DURATION_MS > scene::DESCEND_DURATION_MS);
    assert!(scene::HOP_HEIGHT > 0.0);
    assert!((scene::SPIN_FULL_TURN - 2.0 * scene::SPIN_HALF_TURN).abs() < 1e-6);
    assert!(scene::CAMERA_NEAR > 0.0 && scene::CAMERA_NEAR < scene::CAMERA_FAR);
    assert!(scene::ORBIT_MIN_DISTANCE < scene::ORBIT_MAX_DISTANCE);
    let eye_distance = (scene::CAMERA_EYE - scene::CAMERA_TARGET).length();
    assert!(eye_distance >= scene::ORBIT_MIN_DISTANCE && eye_distance <= scene::ORBIT_MAX_DISTANCE);
    assert!(scene::FIREFLY_SIZE_MIN <= scene::FIREFLY_SIZE_DEFAULT);
    assert!(scene::FIREFLY_SIZE_DEFAULT <= scene::FIREFLY_SIZE_MAX);
    assert!(scene::ORBIT_DAMPING_FACTOR > 0.0 && scene::ORBIT_DAMPING_FACTOR <= 1.0);
}

#[test]
fn fireflies_seed_is_reproducible() {
    let a = portal_core::fireflies::scatter_seeded(scene::FIREFLY_COUNT, FIREFLIES_SEED);
    let b = portal_core::fireflies::scatter_seeded(scene::FIREFLY_COUNT, FIREFLIES_SEED);
    assert_eq!(a, b);
}
