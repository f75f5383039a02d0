#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::{
    CardController, HotspotEngine, OrbitControls, PerspectiveCamera, RaycastScene, ViewerConfig,
    Viewport,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod loader;
mod markers;
mod model;
mod overlay;
mod render;

use constants::{CANVAS_SELECTOR, HOTSPOT_COUNT, LOADING_BAR_SELECTOR};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hotspot-viewer starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn lookup_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    dom::query(document, CANVAS_SELECTOR)?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{CANVAS_SELECTOR} is not a canvas: {:?}", e)))
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Every element the page contract names must exist before anything starts
    let canvas = lookup_canvas(&document)?;
    let bar_el = dom::query(&document, LOADING_BAR_SELECTOR)?;
    let elements = Rc::new(markers::lookup_all(&document, HOTSPOT_COUNT)?);

    let config = ViewerConfig::default();
    let (width, height, dpr) =
        dom::window_metrics().ok_or_else(|| anyhow::anyhow!("window size unavailable"))?;
    let viewport = Viewport::new(width, height, dpr, config.max_pixel_ratio);
    dom::sync_canvas_backing_size(&canvas, &viewport);

    let camera = PerspectiveCamera::new(&config.camera, viewport.aspect());
    let controls = Rc::new(RefCell::new(OrbitControls::new(&camera, config.orbit.clone())));
    let camera = Rc::new(RefCell::new(camera));
    let viewport = Rc::new(RefCell::new(viewport));

    let cards = Rc::new(RefCell::new(CardController::new(elements.len())));
    markers::apply_cards(&elements, &cards.borrow());
    markers::hide_markers(&elements);

    events::wire_card_handlers(elements.clone(), cards.clone());
    events::wire_orbit_input(events::OrbitWiring {
        canvas: canvas.clone(),
        controls: controls.clone(),
        viewport: viewport.clone(),
        drag: Rc::default(),
    });
    events::wire_window_resize(events::ResizeWiring {
        canvas: canvas.clone(),
        camera: camera.clone(),
        viewport: viewport.clone(),
    });

    // Asset loading runs alongside GPU setup; the frame loop picks up the result
    let loading = Rc::new(RefCell::new(loader::LoadingState::new(Instant::now())));
    let loaded: Rc<RefCell<Option<loader::LoadedScene>>> = Rc::new(RefCell::new(None));
    {
        let config = config.clone();
        let loading = loading.clone();
        let loaded = loaded.clone();
        spawn_local(async move {
            let scene = loader::load_scene(&config, loading).await;
            *loaded.borrow_mut() = Some(scene);
        });
    }

    let gpu = match frame::init_gpu(&canvas, config.lighting.clone()).await {
        Ok(g) => g,
        Err(e) => {
            log::error!("[gpu] WebGPU init error: {:?}", e);
            return Err(e);
        }
    };

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        canvas,
        camera,
        controls,
        viewport,
        cards,
        loading,
        loaded,
        scene: RaycastScene::default(),
        hotspots: HotspotEngine::new(config.hotspots.iter().copied()),
        elements,
        loading_bar: overlay::LoadingBar::new(bar_el),
        ready: false,
        marker_states: Vec::with_capacity(HOTSPOT_COUNT),
        gpu: Some(gpu),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
