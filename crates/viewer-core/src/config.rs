//! Runtime parameters for a viewer instance.
//!
//! `ViewerConfig::default()` reproduces the product page this viewer was
//! built for; embedders can override individual fields before start-up.

use crate::constants::*;
use glam::Vec3;

#[derive(Clone, Debug)]
pub struct CameraParams {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub start_position: Vec3,
    pub target: Vec3,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov_y_degrees: CAMERA_FOV_Y_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            start_position: Vec3::from_array(CAMERA_START),
            target: Vec3::ZERO,
        }
    }
}

#[derive(Clone, Debug)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_pan: bool,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            min_azimuth: ORBIT_MIN_AZIMUTH,
            max_azimuth: ORBIT_MAX_AZIMUTH,
            min_polar: ORBIT_MIN_POLAR,
            max_polar: ORBIT_MAX_POLAR,
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            enable_pan: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LightingParams {
    pub light_color: [f32; 3],
    pub light_intensity: f32,
    pub light_position: Vec3,
    pub env_intensity: f32,
    pub exposure: f32,
    /// Linear clear colour behind the model.
    pub background: [f32; 3],
}

impl Default for LightingParams {
    fn default() -> Self {
        Self {
            light_color: [1.0, 1.0, 1.0],
            light_intensity: LIGHT_INTENSITY,
            light_position: Vec3::from_array(LIGHT_POSITION),
            env_intensity: ENV_MAP_INTENSITY,
            exposure: TONE_MAPPING_EXPOSURE,
            background: [1.0, 1.0, 1.0],
        }
    }
}

#[derive(Clone, Debug)]
pub struct AssetPaths {
    pub model: String,
    /// Cube faces in +X, -X, +Y, -Y, +Z, -Z order.
    pub environment_faces: [String; 6],
}

impl Default for AssetPaths {
    fn default() -> Self {
        let face = |name: &str| format!("/textures/environmentMaps/5/{name}.jpg");
        Self {
            model: "/models/Amerimax2.glb".to_string(),
            environment_faces: [
                face("px"),
                face("nx"),
                face("py"),
                face("ny"),
                face("pz"),
                face("nz"),
            ],
        }
    }
}

impl AssetPaths {
    /// Every URL the loader is expected to fetch, model first.
    pub fn all(&self) -> Vec<String> {
        let mut urls = Vec::with_capacity(7);
        urls.push(self.model.clone());
        urls.extend(self.environment_faces.iter().cloned());
        urls
    }
}

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub camera: CameraParams,
    pub orbit: OrbitLimits,
    pub lighting: LightingParams,
    pub assets: AssetPaths,
    pub model_scale: f32,
    pub model_translation: Vec3,
    pub max_pixel_ratio: f64,
    pub hotspots: Vec<Vec3>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraParams::default(),
            orbit: OrbitLimits::default(),
            lighting: LightingParams::default(),
            assets: AssetPaths::default(),
            model_scale: MODEL_SCALE,
            model_translation: Vec3::from_array(MODEL_TRANSLATION),
            max_pixel_ratio: MAX_PIXEL_RATIO,
            hotspots: HOTSPOT_POSITIONS.iter().map(|p| Vec3::from_array(*p)).collect(),
        }
    }
}
