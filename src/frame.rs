use crate::dom;
use crate::render::{self, FrameScene};
use instant::Instant;
use portal_core::fireflies::Firefly;
use portal_core::orbit::OrbitControls;
use portal_core::params::SceneParams;
use portal_core::PickController;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub controller: Rc<RefCell<PickController>>,
    pub orbit: Rc<RefCell<OrbitControls>>,
    pub params: Rc<RefCell<SceneParams>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    pub start: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let elapsed = self.start.elapsed();
        let now_ms = elapsed.as_secs_f64() * 1000.0;

        let mut ctl = self.controller.borrow_mut();
        ctl.tick(now_ms);
        self.orbit.borrow_mut().update(ctl.camera_mut());

        let w = self.canvas.width();
        let h = self.canvas.height();
        if h > 0 {
            ctl.camera_mut().set_aspect(w as f32 / h as f32);
        }
        self.params.borrow_mut().pixel_ratio = dom::pixel_ratio();

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            let params = self.params.borrow();
            let scene = FrameScene {
                camera: ctl.camera(),
                object: ctl.object(),
                selection: ctl.selection(),
                params: &params,
                time_sec: elapsed.as_secs_f32(),
            };
            if let Err(e) = g.render(&scene) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement, flies: &[Firefly]) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, flies).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[gpu] WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
