use crate::model::{self, CubeFaces, ModelData};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::{
    LoadEvent, LoadEvents, LoadTracker, OverlayTimeline, ViewerConfig, ViewerError,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Progress bookkeeping shared between the loader task and the frame loop.
pub struct LoadingState {
    pub tracker: LoadTracker,
    pub timeline: OverlayTimeline,
    clock: Instant,
}

impl LoadingState {
    pub fn new(clock: Instant) -> Self {
        Self {
            tracker: LoadTracker::new(),
            timeline: OverlayTimeline::new(),
            clock,
        }
    }

    pub fn now(&self) -> f64 {
        self.clock.elapsed().as_secs_f64()
    }

    fn apply(&mut self, events: LoadEvents) {
        for ev in events {
            match ev {
                LoadEvent::Progress { url, loaded, total } => {
                    log::info!("[loader] {url} ({loaded}/{total})");
                    self.timeline.set_progress(loaded, total);
                }
                LoadEvent::Error { url, reason } => {
                    log::error!("[loader] {url} failed: {reason}");
                    self.timeline.fail(format!("{url}: {reason}"));
                }
                LoadEvent::Complete { errors } => {
                    log::info!("[loader] all assets settled ({errors} failed)");
                    let now = self.now();
                    self.timeline.complete(now);
                }
            }
        }
    }

    fn settle<T>(&mut self, url: &str, result: &anyhow::Result<T>) {
        let events = match result {
            Ok(_) => self.tracker.item_end(url),
            Err(e) => self.tracker.item_error(url, format!("{e:#}")),
        };
        match events {
            Ok(events) => self.apply(events),
            Err(e) => log::error!("[loader] {e}"),
        }
    }
}

/// Whatever finished loading; a failed asset is simply absent.
#[derive(Default)]
pub struct LoadedScene {
    pub model: Option<ModelData>,
    pub environment: Option<CubeFaces>,
}

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch error: {:?}", e))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a Response: {:?}", e))?;
    if !resp.ok() {
        return Err(ViewerError::AssetFailed {
            url: url.to_string(),
            reason: format!("HTTP {} {}", resp.status(), resp.status_text()),
        }
        .into());
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!("array_buffer: {:?}", e))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("read body: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Fetch and decode the model and the environment cube map.
///
/// Every asset is registered before the first request goes out so
/// completion can only fire once all of them have settled.
pub async fn load_scene(config: &ViewerConfig, state: Rc<RefCell<LoadingState>>) -> LoadedScene {
    {
        let mut s = state.borrow_mut();
        for url in config.assets.all() {
            s.tracker.item_start(url);
        }
    }

    let transform = model::model_transform(config.model_scale, config.model_translation);
    let model_url = &config.assets.model;
    let model = match fetch_bytes(model_url).await {
        Ok(bytes) => model::parse_gltf(&bytes, transform),
        Err(e) => Err(e),
    };
    state.borrow_mut().settle(model_url, &model);
    if let Ok(m) = &model {
        log::info!(
            "[loader] model: {} meshes, {} triangles, {} images",
            m.meshes.len(),
            m.triangle_count(),
            m.images.len()
        );
    }

    let mut faces = Vec::with_capacity(6);
    let mut faces_ok = true;
    for url in &config.assets.environment_faces {
        let face = match fetch_bytes(url).await {
            Ok(bytes) => model::decode_face(&bytes),
            Err(e) => Err(e),
        };
        state.borrow_mut().settle(url, &face);
        match face {
            Ok(f) => faces.push(f),
            Err(_) => faces_ok = false,
        }
    }
    let environment = if faces_ok {
        match model::assemble_cube(faces) {
            Ok(cube) => Some(cube),
            Err(e) => {
                log::error!("[loader] environment map: {e:#}");
                state.borrow_mut().timeline.fail(format!("{e:#}"));
                None
            }
        }
    } else {
        None
    };

    LoadedScene {
        model: model.ok(),
        environment,
    }
}
