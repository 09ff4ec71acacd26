use crate::constants::CLICK_DRAG_TOLERANCE_PX;
use crate::dom;
use crate::input;
use portal_core::orbit::OrbitControls;
use portal_core::PickController;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub controller: Rc<RefCell<PickController>>,
    pub orbit: Rc<RefCell<OrbitControls>>,
    pub drag_state: Rc<RefCell<input::DragState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_click(&w);
    wire_wheel(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_css(&ev, &w.canvas);
        let (css_w, css_h) = dom::canvas_css_size(&w.canvas);

        if let Some(delta) = w.drag_state.borrow_mut().move_to(pos) {
            w.orbit
                .borrow_mut()
                .rotate_by_pixels(delta.x, delta.y, css_h);
        }

        if let Err(e) = w
            .controller
            .borrow_mut()
            .on_pointer_move(pos.x, pos.y, css_w, css_h)
        {
            log::debug!("[pointer] move ignored: {}", e);
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_css(&ev, &w.canvas);
        w.drag_state.borrow_mut().begin(pos);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        w.drag_state.borrow_mut().end(CLICK_DRAG_TOLERANCE_PX);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_click(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if !w.drag_state.borrow_mut().take_click() {
            return;
        }
        let pos = input::pointer_canvas_css(&ev, &w.canvas);
        let (css_w, css_h) = dom::canvas_css_size(&w.canvas);
        if let Err(e) = w
            .controller
            .borrow_mut()
            .on_click(pos.x, pos.y, css_w, css_h)
        {
            log::debug!("[click] ignored: {}", e);
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let steps = input::wheel_steps(ev.delta_y());
        if steps != 0.0 {
            w.orbit.borrow_mut().dolly(steps);
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
