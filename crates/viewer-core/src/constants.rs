// Shared tuning constants for the viewer front-end.

// Camera
pub const CAMERA_FOV_Y_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_START: [f32; 3] = [0.0, 0.0, 15.0];

// Orbit limits (radians for angles)
pub const ORBIT_MIN_DISTANCE: f32 = 15.0;
pub const ORBIT_MAX_DISTANCE: f32 = 15.0;
pub const ORBIT_MIN_AZIMUTH: f32 = -1.0;
pub const ORBIT_MAX_AZIMUTH: f32 = 1.0;
pub const ORBIT_MIN_POLAR: f32 = 1.0;
pub const ORBIT_MAX_POLAR: f32 = 1.5;
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_DOLLY_SCALE: f32 = 0.95; // per wheel step
pub const ORBIT_POLAR_EPSILON: f32 = 1e-6;

// Loading overlay timeline (seconds after completion)
pub const OVERLAY_START_DELAY_SEC: f64 = 0.5;
pub const OVERLAY_FADE_DELAY_SEC: f64 = 1.0;
pub const OVERLAY_FADE_DURATION_SEC: f64 = 3.0;
pub const SCENE_READY_DELAY_SEC: f64 = 2.0;

// Lighting and tone mapping
pub const LIGHT_INTENSITY: f32 = 3.0;
pub const LIGHT_POSITION: [f32; 3] = [0.25, 3.0, -2.25];
pub const ENV_MAP_INTENSITY: f32 = 2.0;
pub const TONE_MAPPING_EXPOSURE: f32 = 3.0;

// Output surface
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Model placement
pub const MODEL_SCALE: f32 = 1.0;
pub const MODEL_TRANSLATION: [f32; 3] = [0.0, -2.0, 0.0];

pub const HOTSPOT_POSITIONS: [[f32; 3]; 8] = [
    [-5.9, 1.2, 5.0],
    [-7.1, 0.25, 6.20],
    [-4.1, 0.25, 6.20],
    [-2.35, -1.0, 5.8],
    [-2.289, 1.95, 3.558],
    [-2.3, 3.0, 4.1],
    [-2.1, 2.0, 6.1],
    [-1.1, 0.45, 8.7],
];
