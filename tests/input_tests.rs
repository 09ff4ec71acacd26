// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

const TOLERANCE: f32 = 4.0;

#[test]
fn move_without_press_is_not_a_drag() {
    let mut ds = DragState::default();
    assert_eq!(ds.move_to(Vec2::new(10.0, 10.0)), None);
    assert!(ds.take_click());
}

#[test]
fn drag_reports_deltas_between_samples() {
    let mut ds = DragState::default();
    ds.begin(Vec2::new(100.0, 100.0));
    assert_eq!(ds.move_to(Vec2::new(103.0, 104.0)), Some(Vec2::new(3.0, 4.0)));
    assert_eq!(ds.move_to(Vec2::new(103.0, 100.0)), Some(Vec2::new(0.0, -4.0)));
    assert!((ds.travelled - 9.0).abs() < 1e-6);
}

#[test]
fn small_jitter_still_counts_as_a_click() {
    let mut ds = DragState::default();
    ds.begin(Vec2::new(50.0, 50.0));
    ds.move_to(Vec2::new(51.0, 51.0));
    ds.end(TOLERANCE);
    assert!(!ds.active);
    assert!(ds.take_click());
}

#[test]
fn long_drag_swallows_exactly_one_click() {
    let mut ds = DragState::default();
    ds.begin(Vec2::ZERO);
    ds.move_to(Vec2::new(40.0, 0.0));
    ds.end(TOLERANCE);
    assert!(!ds.take_click());
    // The flag is consumed; the next plain click goes through.
    assert!(ds.take_click());
}

#[test]
fn new_press_resets_suppression() {
    let mut ds = DragState::default();
    ds.begin(Vec2::ZERO);
    ds.move_to(Vec2::new(0.0, 30.0));
    ds.end(TOLERANCE);
    ds.begin(Vec2::new(5.0, 5.0));
    ds.end(TOLERANCE);
    assert!(ds.take_click());
}

#[test]
fn wheel_up_moves_closer() {
    assert_eq!(wheel_steps(-120.0), 1.0);
    assert_eq!(wheel_steps(-0.5), 1.0);
    assert_eq!(wheel_steps(3.0), -1.0);
    assert_eq!(wheel_steps(0.0), 0.0);
}
