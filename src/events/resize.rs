use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::{PerspectiveCamera, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct ResizeWiring {
    pub canvas: web::HtmlCanvasElement,
    pub camera: Rc<RefCell<PerspectiveCamera>>,
    pub viewport: Rc<RefCell<Viewport>>,
}

/// Read the window size and apply it to viewport, camera and canvas.
pub fn apply_window_size(w: &ResizeWiring) {
    let Some((width, height, dpr)) = dom::window_metrics() else {
        return;
    };
    let mut vp = w.viewport.borrow_mut();
    match vp.resize(width, height, dpr, &mut w.camera.borrow_mut()) {
        Ok(()) => {
            dom::sync_canvas_backing_size(&w.canvas, &vp);
            log::debug!("[resize] {}x{} @{:.2}", width, height, vp.pixel_ratio());
        }
        Err(e) => log::warn!("[resize] ignored: {}", e),
    }
}

pub fn wire_window_resize(w: ResizeWiring) {
    apply_window_size(&w);
    let resize_closure = Closure::wrap(Box::new(move || {
        apply_window_size(&w);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}
