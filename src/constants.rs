/// Web front-end constants.
///
/// Scene tuning lives in `portal_core::constants`; these are the DOM and
/// input details that only the browser layer needs.
pub const CANVAS_ID: &str = "app-canvas";

// Interactive mesh, little-endian f32 triangle soup.
pub const AXE_ASSET_URL: &str = "assets/axe.bin";

// A press that travels further than this (CSS px) is an orbit drag, not a click.
pub const CLICK_DRAG_TOLERANCE_PX: f32 = 4.0;

pub const FIREFLIES_SEED: u64 = 42;
