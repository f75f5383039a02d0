use crate::loader::{LoadedScene, LoadingState};
use crate::markers::{self, HotspotElements};
use crate::overlay::LoadingBar;
use crate::render;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::{
    CardController, HotspotEngine, LightingParams, MarkerState, OrbitControls, PerspectiveCamera,
    RaycastScene, Viewport,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub canvas: web::HtmlCanvasElement,
    pub camera: Rc<RefCell<PerspectiveCamera>>,
    pub controls: Rc<RefCell<OrbitControls>>,
    pub viewport: Rc<RefCell<Viewport>>,
    pub cards: Rc<RefCell<CardController>>,

    pub loading: Rc<RefCell<LoadingState>>,
    /// Filled by the loader task once every asset has settled.
    pub loaded: Rc<RefCell<Option<LoadedScene>>>,
    pub scene: RaycastScene,
    pub hotspots: HotspotEngine,
    pub elements: Rc<Vec<HotspotElements>>,
    pub loading_bar: LoadingBar,

    pub ready: bool,
    pub marker_states: Vec<MarkerState>,
    pub gpu: Option<render::GpuState<'a>>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        {
            let mut camera = self.camera.borrow_mut();
            self.controls.borrow_mut().update(&mut camera);
        }

        self.take_loaded_scene();

        let (now, alpha, ready) = {
            let loading = self.loading.borrow();
            let now = loading.now();
            self.loading_bar.sync(&loading.timeline, now);
            (
                now,
                loading.timeline.overlay_alpha(now),
                loading.timeline.ready(now),
            )
        };
        if ready && !self.ready {
            self.ready = true;
            log::info!("[hotspots] scene ready at {:.2}s", now);
        }

        let camera = self.camera.borrow();
        if self.ready {
            let viewport = self.viewport.borrow();
            let card_open = self.cards.borrow().any_open();
            self.hotspots.update(
                &camera,
                &self.scene,
                &viewport,
                card_open,
                &mut self.marker_states,
            );
            markers::apply_markers(&self.elements, &self.marker_states);
        } else {
            markers::hide_markers(&self.elements);
        }

        if let Some(gpu) = &mut self.gpu {
            gpu.set_overlay_alpha(alpha);
            gpu.set_camera(camera.view_projection(), camera.position);
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = gpu.render() {
                log::error!("[gpu] render error: {:?}", e);
            }
        }
    }

    /// Hand freshly loaded assets to the renderer and the occlusion scene.
    fn take_loaded_scene(&mut self) {
        let Some(loaded) = self.loaded.borrow_mut().take() else {
            return;
        };
        if let Some(model) = &loaded.model {
            self.scene = model.raycast_scene();
            log::info!(
                "[hotspots] occlusion scene: {} triangles",
                self.scene.triangle_count()
            );
            if let Some(gpu) = &mut self.gpu {
                gpu.upload_model(model);
            }
        }
        if let (Some(cube), Some(gpu)) = (&loaded.environment, &mut self.gpu) {
            gpu.set_environment(cube);
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    lighting: LightingParams,
) -> anyhow::Result<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    render::GpuState::new(leaked_canvas, lighting).await
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
