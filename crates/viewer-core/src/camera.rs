//! Perspective camera, world-to-screen projection and screen-to-world rays.

use crate::config::CameraParams;
use crate::raycast::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fov_y_radians: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(params: &CameraParams, aspect: f32) -> Self {
        Self {
            position: params.start_position,
            target: params.target,
            up: Vec3::Y,
            aspect,
            fov_y_radians: params.fov_y_degrees.to_radians(),
            near: params.near,
            far: params.far,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians, self.aspect, self.near, self.far)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world-space point to normalized device coordinates.
    ///
    /// `x` and `y` land in \[-1, 1\] when the point is inside the frustum;
    /// points behind the camera come out mirrored, exactly as a plain
    /// perspective divide produces them.
    pub fn project(&self, world: Vec3) -> Vec3 {
        let clip = self.view_projection() * world.extend(1.0);
        clip.truncate() / clip.w
    }

    /// World-space ray from the camera through an NDC position.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let p = inv * Vec4::new(ndc.x, ndc.y, 0.5, 1.0);
        let through: Vec3 = p.truncate() / p.w;
        Ray::new(self.position, through - self.position)
    }
}
