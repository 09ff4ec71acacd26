use glam::Vec2;
use web_sys as web;

/// Press/drag tracking shared by the pointer handlers.
///
/// A press that moves further than the click tolerance becomes an orbit drag
/// and the `click` event the browser fires afterwards is swallowed.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub last: Vec2,
    pub travelled: f32,
    suppress_click: bool,
}

impl DragState {
    pub fn begin(&mut self, pos: Vec2) {
        self.active = true;
        self.last = pos;
        self.travelled = 0.0;
        self.suppress_click = false;
    }

    /// Movement since the previous sample while a press is held.
    pub fn move_to(&mut self, pos: Vec2) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = pos - self.last;
        self.last = pos;
        self.travelled += delta.length();
        Some(delta)
    }

    pub fn end(&mut self, click_tolerance_px: f32) {
        if self.active {
            self.suppress_click = self.travelled > click_tolerance_px;
            self.active = false;
        }
    }

    /// Whether the pending click should reach the controller. Consumes the
    /// suppression flag.
    pub fn take_click(&mut self) -> bool {
        !std::mem::take(&mut self.suppress_click)
    }
}

/// Wheel notches to dolly steps: scrolling up (negative delta) moves closer.
#[inline]
pub fn wheel_steps(delta_y: f64) -> f32 {
    if delta_y < 0.0 {
        1.0
    } else if delta_y > 0.0 {
        -1.0
    } else {
        0.0
    }
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_canvas_css(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    Vec2::new(x_css, y_css)
}
