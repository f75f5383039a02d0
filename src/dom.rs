use glam::Vec2;
use viewer_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Required element by CSS selector. Absence is a fatal startup error.
pub fn query(document: &web::Document, selector: &str) -> anyhow::Result<web::HtmlElement> {
    document
        .query_selector(selector)
        .map_err(|e| anyhow::anyhow!("invalid selector {selector}: {:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("missing {selector}"))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow::anyhow!("{selector} is not an HTML element"))
}

/// Required element by id. Absence is a fatal startup error.
pub fn by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow::anyhow!("#{id} is not an HTML element"))
}

#[inline]
pub fn add_click_listener(el: &web::EventTarget, mut handler: impl FnMut() + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Current window size in CSS pixels and the raw device pixel ratio.
pub fn window_metrics() -> Option<(f32, f32, f64)> {
    let w = web::window()?;
    let width = w.inner_width().ok()?.as_f64()? as f32;
    let height = w.inner_height().ok()?.as_f64()? as f32;
    Some((width, height, w.device_pixel_ratio()))
}

/// Match the canvas backing store to the viewport's capped pixel ratio
/// while keeping its CSS size at the viewport size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let (w_px, h_px) = viewport.surface_size();
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
}

#[inline]
pub fn set_class(el: &web::Element, class: &str, on: bool) {
    let cl = el.class_list();
    if on {
        _ = cl.add_1(class);
    } else {
        _ = cl.remove_1(class);
    }
}

#[inline]
pub fn set_visibility(el: &web::HtmlElement, visible: bool) {
    _ = el
        .style()
        .set_property("visibility", if visible { "visible" } else { "hidden" });
}

#[inline]
pub fn set_translate(el: &web::HtmlElement, offset: Vec2) {
    _ = el.style().set_property(
        "transform",
        &format!("translateX({}px) translateY({}px)", offset.x, offset.y),
    );
}
