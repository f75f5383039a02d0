//! Ray casting against the renderable scene.
//!
//! Meshes are kept in world space so every frame tests the same triangles
//! the renderer draws. Each mesh carries a bounding sphere for an early
//! reject; surviving meshes are tested triangle by triangle.

use glam::Vec3;
use smallvec::SmallVec;

const EPSILON: f32 = 1e-8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Always unit length (or zero for a degenerate ray).
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub distance: f32,
    pub point: Vec3,
    pub mesh: usize,
    pub triangle: usize,
}

pub type Hits = SmallVec<[Hit; 8]>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn from_points(points: &[Vec3]) -> Self {
        if points.is_empty() {
            return Self {
                center: Vec3::ZERO,
                radius: 0.0,
            };
        }
        let (min, max) = points.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(lo, hi), p| (lo.min(*p), hi.max(*p)),
        );
        let center = (min + max) * 0.5;
        let radius = points
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0_f32, f32::max);
        Self { center, radius }
    }

    /// True when the ray can reach the sphere at a non-negative distance.
    pub fn intersects(&self, ray: &Ray) -> bool {
        let oc = ray.origin - self.center;
        let b = oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        if c > 0.0 && b > 0.0 {
            return false;
        }
        b * b - c >= 0.0
    }
}

/// Möller–Trumbore ray/triangle test. With `cull_back_faces` only
/// counter-clockwise (front) faces report a hit.
pub fn ray_triangle(
    ray: &Ray,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    cull_back_faces: bool,
) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);
    if cull_back_faces {
        if a < EPSILON {
            return None;
        }
    } else if a.abs() < EPSILON {
        return None;
    }
    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = f * edge2.dot(q);
    (t >= 0.0).then_some(t)
}

/// Triangle soup in world space.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub double_sided: bool,
    pub bounds: BoundingSphere,
}

impl Mesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, double_sided: bool) -> Self {
        let bounds = BoundingSphere::from_points(&positions);
        Self {
            positions,
            indices,
            double_sided,
            bounds,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn collect_hits(&self, mesh_index: usize, ray: &Ray, out: &mut Hits) {
        if !self.bounds.intersects(ray) {
            return;
        }
        for (tri, idx) in self.indices.chunks_exact(3).enumerate() {
            let (Some(a), Some(b), Some(c)) = (
                self.positions.get(idx[0] as usize),
                self.positions.get(idx[1] as usize),
                self.positions.get(idx[2] as usize),
            ) else {
                continue;
            };
            if let Some(t) = ray_triangle(ray, *a, *b, *c, !self.double_sided) {
                out.push(Hit {
                    distance: t,
                    point: ray.at(t),
                    mesh: mesh_index,
                    triangle: tri,
                });
            }
        }
    }
}

/// Everything the hotspot pass tests against: the whole renderable scene.
#[derive(Clone, Debug, Default)]
pub struct RaycastScene {
    pub meshes: Vec<Mesh>,
}

impl RaycastScene {
    pub fn new(meshes: Vec<Mesh>) -> Self {
        Self { meshes }
    }

    pub fn push(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.iter().all(|m| m.triangle_count() == 0)
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    /// All intersections along the ray, nearest first.
    pub fn intersect_all(&self, ray: &Ray) -> Hits {
        let mut hits = Hits::new();
        for (i, mesh) in self.meshes.iter().enumerate() {
            mesh.collect_hits(i, ray, &mut hits);
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    pub fn nearest(&self, ray: &Ray) -> Option<Hit> {
        self.intersect_all(ray).first().copied()
    }
}
