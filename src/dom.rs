use portal_core::params::capped_pixel_ratio;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Device pixel ratio capped the same way the renderer caps it.
pub fn pixel_ratio() -> f32 {
    web::window()
        .map(|w| capped_pixel_ratio(w.device_pixel_ratio()))
        .unwrap_or(1.0)
}

/// Canvas size in CSS pixels, the space pointer events arrive in.
pub fn canvas_css_size(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (rect.width() as f32, rect.height() as f32)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    let pr = pixel_ratio() as f64;
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * pr) as u32;
    let h_px = (rect.height() * pr) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
}
