#![cfg(target_arch = "wasm32")]
use instant::Instant;
use portal_core::constants::FIREFLY_COUNT;
use portal_core::fireflies;
use portal_core::orbit::{OrbitConfig, OrbitControls};
use portal_core::params::SceneParams;
use portal_core::{AnimationConfig, Camera, PickController};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;

use constants::{AXE_ASSET_URL, CANVAS_ID, FIREFLIES_SEED};

thread_local! {
    // Shared by the frame loop and the exported debug setters.
    static PARAMS: Rc<RefCell<SceneParams>> = Rc::new(RefCell::new(SceneParams::default()));
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn param_error(e: portal_core::ParamError) -> JsValue {
    log::warn!("[params] {}", e);
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub fn set_portal_colors(start: &str, end: &str) -> Result<(), JsValue> {
    PARAMS
        .with(|p| p.borrow_mut().set_portal_colors(start, end))
        .map_err(param_error)
}

#[wasm_bindgen]
pub fn set_clear_color(hex: &str) -> Result<(), JsValue> {
    PARAMS
        .with(|p| p.borrow_mut().set_clear_color(hex))
        .map_err(param_error)
}

#[wasm_bindgen]
pub fn set_fireflies_size(size: f32) {
    PARAMS.with(|p| p.borrow_mut().set_fireflies_size(size));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("portal-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * capped pixel ratio
    wire_canvas_resize(&canvas);

    let mut camera = Camera::default();
    if canvas.height() > 0 {
        camera.set_aspect(canvas.width() as f32 / canvas.height() as f32);
    }
    let orbit = Rc::new(RefCell::new(OrbitControls::new(
        &camera,
        OrbitConfig::default(),
    )));
    let controller = Rc::new(RefCell::new(PickController::new(
        camera,
        AnimationConfig::default(),
    )));

    // The scene renders while the mesh is in flight; hover/click stay inert
    // until it resolves.
    let controller_load = controller.clone();
    spawn_local(async move {
        let result = assets::load_axe(AXE_ASSET_URL).await;
        controller_load.borrow_mut().resolve_load(result);
    });

    let flies = fireflies::scatter_seeded(FIREFLY_COUNT, FIREFLIES_SEED);
    let gpu = frame::init_gpu(&canvas, &flies).await;

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        controller: controller.clone(),
        orbit: orbit.clone(),
        drag_state: Rc::new(RefCell::new(input::DragState::default())),
    });

    let params = PARAMS.with(|p| p.clone());
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        controller,
        orbit,
        params,
        canvas,
        gpu,
        start: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
