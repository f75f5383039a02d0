//! Orbit camera controls: drag to rotate around a target, secondary drag to
//! pan the target, wheel to dolly. Damping applies to rotation and pan;
//! azimuth, polar angle and distance are clamped.

use crate::camera::PerspectiveCamera;
use crate::config::OrbitLimits;
use crate::constants::{ORBIT_DOLLY_SCALE, ORBIT_POLAR_EPSILON};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Spherical offset from the orbit target. `theta` is the azimuth around +Y
/// measured from +Z, `phi` the polar angle measured from +Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let s = self.phi.sin() * self.radius;
        Vec3::new(
            s * self.theta.sin(),
            self.phi.cos() * self.radius,
            s * self.theta.cos(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub limits: OrbitLimits,
    spherical: Spherical,
    fov_y_radians: f32,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    scale: f32,
}

impl OrbitControls {
    pub fn new(camera: &PerspectiveCamera, limits: OrbitLimits) -> Self {
        let target = camera.target;
        Self {
            target,
            limits,
            spherical: Spherical::from_offset(camera.position - target),
            fov_y_radians: camera.fov_y_radians,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }

    pub fn spherical(&self) -> Spherical {
        self.spherical
    }

    /// Queue a rotation from a pointer drag. A drag across the full
    /// viewport height turns a full circle.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * dx / h;
        self.delta_phi -= TAU * dy / h;
    }

    /// Queue a pan from a pointer drag. The target moves in the camera's
    /// right/up plane so that the point under the cursor follows it at the
    /// target's depth.
    pub fn pan_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.limits.enable_pan {
            return;
        }
        let h = viewport_height.max(1.0);
        let units_per_pixel = 2.0 * self.spherical.radius * (self.fov_y_radians * 0.5).tan() / h;

        let forward = -self.spherical.to_offset().normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        self.pan_offset += -right * (dx * units_per_pixel) + up * (dy * units_per_pixel);
    }

    /// Queue a dolly from a wheel event; negative deltas move closer.
    pub fn dolly(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.scale *= ORBIT_DOLLY_SCALE;
        } else if delta_y > 0.0 {
            self.scale /= ORBIT_DOLLY_SCALE;
        }
    }

    /// Apply queued input, clamp to the limits and move the camera.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let l = &self.limits;
        let step = if l.enable_damping {
            l.damping_factor
        } else {
            1.0
        };
        self.spherical.theta += self.delta_theta * step;
        self.spherical.phi += self.delta_phi * step;

        self.spherical.theta = clamp_between(self.spherical.theta, l.min_azimuth, l.max_azimuth);
        self.spherical.phi = clamp_between(self.spherical.phi, l.min_polar, l.max_polar)
            .clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);
        self.spherical.radius =
            clamp_between(self.spherical.radius * self.scale, l.min_distance, l.max_distance);
        self.target += self.pan_offset * step;

        if l.enable_damping {
            self.delta_theta *= 1.0 - l.damping_factor;
            self.delta_phi *= 1.0 - l.damping_factor;
            self.pan_offset *= 1.0 - l.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.position = self.target + self.spherical.to_offset();
        camera.target = self.target;
    }
}

/// Clamp into the range spanned by `a` and `b`, whichever order they come in.
/// NaN bounds are ignored rather than panicking.
#[inline]
fn clamp_between(v: f32, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    v.max(lo).min(hi)
}
