//! Per-frame hotspot visibility.
//!
//! Each point of interest is projected to normalized device coordinates, a
//! ray is cast from the camera through that screen position, and the nearest
//! scene intersection is compared with the straight-line distance to the
//! point. Anything closer than the point hides it; a hit exactly at the
//! point's distance still counts as visible.
//!
//! Occlusion and card state are combined here into the single flag the
//! marker element shows: visible only when not occluded and no card is open.

use crate::camera::PerspectiveCamera;
use crate::error::{Result, ViewerError};
use crate::raycast::RaycastScene;
use crate::viewport::Viewport;
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointOfInterest {
    pub position: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occlusion {
    Visible,
    Occluded,
}

/// Result of one visibility pass for one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerState {
    pub index: usize,
    pub occlusion: Occlusion,
    pub ndc: Vec3,
    /// Translation from the viewport centre, in CSS pixels.
    pub offset_px: Vec2,
    /// What the marker element should show this frame.
    pub shown: bool,
}

/// Decide occlusion from the nearest hit distance and the point distance.
#[inline]
pub fn classify(nearest_hit: Option<f32>, point_distance: f32) -> Occlusion {
    match nearest_hit {
        Some(hit) if hit < point_distance => Occlusion::Occluded,
        _ => Occlusion::Visible,
    }
}

#[derive(Clone, Debug, Default)]
pub struct HotspotEngine {
    points: Vec<PointOfInterest>,
}

impl HotspotEngine {
    pub fn new(positions: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            points: positions
                .into_iter()
                .map(|position| PointOfInterest { position })
                .collect(),
        }
    }

    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Occlusion, projected position and pixel offset for a single point.
    pub fn evaluate(
        &self,
        index: usize,
        camera: &PerspectiveCamera,
        scene: &RaycastScene,
        viewport: &Viewport,
    ) -> Result<(Occlusion, Vec3, Vec2)> {
        let point = self
            .points
            .get(index)
            .ok_or(ViewerError::HotspotOutOfRange {
                index,
                count: self.points.len(),
            })?;

        let ndc = camera.project(point.position);
        if !ndc.x.is_finite() || !ndc.y.is_finite() {
            return Err(ViewerError::NonFiniteProjection { index });
        }

        let ray = camera.ray_through_ndc(ndc.truncate());
        let nearest = scene.nearest(&ray).map(|h| h.distance);
        let occlusion = classify(nearest, point.position.distance(camera.position));

        Ok((occlusion, ndc, viewport.ndc_to_offset(ndc.truncate())))
    }

    /// Run the visibility pass over every point, appending one state per
    /// point. A point that fails to evaluate is logged and reported hidden,
    /// with a non-finite offset so its marker is not moved.
    pub fn update(
        &self,
        camera: &PerspectiveCamera,
        scene: &RaycastScene,
        viewport: &Viewport,
        card_open: bool,
        out: &mut Vec<MarkerState>,
    ) {
        out.clear();
        for index in 0..self.points.len() {
            match self.evaluate(index, camera, scene, viewport) {
                Ok((occlusion, ndc, offset_px)) => out.push(MarkerState {
                    index,
                    occlusion,
                    ndc,
                    offset_px,
                    shown: occlusion == Occlusion::Visible && !card_open,
                }),
                Err(e) => {
                    log::warn!("[hotspots] hiding point this frame: {}", e);
                    out.push(MarkerState {
                        index,
                        occlusion: Occlusion::Occluded,
                        ndc: Vec3::NAN,
                        offset_px: Vec2::NAN,
                        shown: false,
                    });
                }
            }
        }
    }
}
