use crate::camera::PerspectiveCamera;
use crate::error::{Result, ViewerError};
use glam::Vec2;

/// Size of the display surface in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f64,
    pub max_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f64, max_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
            max_pixel_ratio,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Device pixel ratio capped to keep high-density screens affordable.
    pub fn pixel_ratio(&self) -> f64 {
        let dpr = if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        };
        dpr.min(self.max_pixel_ratio)
    }

    /// Backing-store size in physical pixels, never zero.
    pub fn surface_size(&self) -> (u32, u32) {
        let pr = self.pixel_ratio();
        let w = (self.width as f64 * pr).round() as u32;
        let h = (self.height as f64 * pr).round() as u32;
        (w.max(1), h.max(1))
    }

    /// Apply a window resize: new size, pixel ratio and camera aspect.
    ///
    /// Applying the same dimensions twice leaves the same state as once.
    /// A zero-area size is rejected and the previous state is kept.
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        device_pixel_ratio: f64,
        camera: &mut PerspectiveCamera,
    ) -> Result<()> {
        if !(width > 0.0 && height > 0.0) {
            return Err(ViewerError::EmptyViewport { width, height });
        }
        self.width = width;
        self.height = height;
        self.device_pixel_ratio = device_pixel_ratio;
        camera.set_aspect(self.aspect());
        Ok(())
    }

    /// Pixel offset from the viewport centre for an NDC position.
    /// Screen Y grows downward, NDC Y grows upward.
    #[inline]
    pub fn ndc_to_offset(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(ndc.x * self.width * 0.5, -ndc.y * self.height * 0.5)
    }
}
