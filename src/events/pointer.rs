use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::{OrbitControls, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

/// What the current drag does to the orbit.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    #[default]
    Rotate,
    Pan,
}

#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub mode: DragMode,
    pub pointer_id: i32,
    pub last_x: f32,
    pub last_y: f32,
}

#[derive(Clone)]
pub struct OrbitWiring {
    pub canvas: web::HtmlCanvasElement,
    pub controls: Rc<RefCell<OrbitControls>>,
    pub viewport: Rc<RefCell<Viewport>>,
    pub drag: Rc<RefCell<DragState>>,
}

pub fn wire_orbit_input(w: OrbitWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_contextmenu(&w);
}

// Secondary button, or primary with a modifier, pans.
fn drag_mode_for(ev: &web::PointerEvent) -> DragMode {
    if ev.button() == 2 || ev.shift_key() || ev.ctrl_key() || ev.meta_key() {
        DragMode::Pan
    } else {
        DragMode::Rotate
    }
}

fn wire_pointerdown(w: &OrbitWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        {
            let mut ds = w.drag.borrow_mut();
            ds.active = true;
            ds.mode = drag_mode_for(&ev);
            ds.pointer_id = ev.pointer_id();
            ds.last_x = ev.client_x() as f32;
            ds.last_y = ev.client_y() as f32;
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &OrbitWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut ds = w.drag.borrow_mut();
        if !ds.active || ds.pointer_id != ev.pointer_id() {
            return;
        }
        let x = ev.client_x() as f32;
        let y = ev.client_y() as f32;
        let (dx, dy) = (x - ds.last_x, y - ds.last_y);
        ds.last_x = x;
        ds.last_y = y;
        let mode = ds.mode;
        drop(ds);

        let height = w.viewport.borrow().height;
        let mut controls = w.controls.borrow_mut();
        match mode {
            DragMode::Rotate => controls.rotate_by_pixels(dx, dy, height),
            DragMode::Pan => controls.pan_by_pixels(dx, dy, height),
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(w: &OrbitWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut ds = w.drag.borrow_mut();
        if ds.active && ds.pointer_id == ev.pointer_id() {
            ds.active = false;
            _ = w.canvas.release_pointer_capture(ev.pointer_id());
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        _ = wnd
            .add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(w: &OrbitWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        w.controls.borrow_mut().dolly(ev.delta_y() as f32);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_contextmenu(w: &OrbitWiring) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}
