// Host-side tests for ray/triangle intersection and scene queries.

use glam::Vec3;
use viewer_core::{ray_triangle, BoundingSphere, Mesh, Ray, RaycastScene};

fn quad_at_z(z: f32, double_sided: bool) -> Mesh {
    Mesh::new(
        vec![
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(1.0, 1.0, z),
            Vec3::new(-1.0, 1.0, z),
        ],
        vec![0, 1, 2, 0, 2, 3],
        double_sided,
    )
}

#[test]
fn front_face_is_hit_at_expected_distance() {
    let ray = Ray::new(Vec3::new(0.2, 0.1, 10.0), Vec3::NEG_Z);
    let t = ray_triangle(
        &ray,
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        true,
    );
    assert!((t.unwrap() - 10.0).abs() < 1e-5);
}

#[test]
fn back_faces_only_hit_when_double_sided() {
    let from_behind = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
    let single = RaycastScene::new(vec![quad_at_z(0.0, false)]);
    let double = RaycastScene::new(vec![quad_at_z(0.0, true)]);
    assert!(single.nearest(&from_behind).is_none());
    assert!(double.nearest(&from_behind).is_some());
}

#[test]
fn miss_outside_triangle() {
    let ray = Ray::new(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z);
    let scene = RaycastScene::new(vec![quad_at_z(0.0, true)]);
    assert!(scene.intersect_all(&ray).is_empty());
}

#[test]
fn hits_behind_origin_are_ignored() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::NEG_Z);
    let scene = RaycastScene::new(vec![quad_at_z(0.0, true)]);
    assert!(scene.nearest(&ray).is_none());
}

#[test]
fn hits_are_sorted_nearest_first() {
    let ray = Ray::new(Vec3::new(0.1, 0.1, 10.0), Vec3::NEG_Z);
    let scene = RaycastScene::new(vec![quad_at_z(2.0, false), quad_at_z(5.0, false)]);
    let hits = scene.intersect_all(&ray);
    assert_eq!(hits.len(), 2);
    assert!((hits[0].distance - 5.0).abs() < 1e-4);
    assert_eq!(hits[0].mesh, 1);
    assert!((hits[1].distance - 8.0).abs() < 1e-4);
    assert!(hits[0].point.distance(Vec3::new(0.1, 0.1, 5.0)) < 1e-4);
}

#[test]
fn ray_direction_is_normalized() {
    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0));
    assert!((ray.direction.length() - 1.0).abs() < 1e-6);
    assert_eq!(ray.at(2.0), Vec3::new(0.0, 0.0, -2.0));
}

#[test]
fn bounding_sphere_rejects_distant_rays() {
    let sphere = BoundingSphere::from_points(&[Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)]);
    assert!(sphere.intersects(&Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z)));
    assert!(!sphere.intersects(&Ray::new(Vec3::new(0.0, 5.0, 5.0), Vec3::NEG_Z)));
    assert!(!sphere.intersects(&Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z)));
}

#[test]
fn empty_scene_and_triangle_counts() {
    let mut scene = RaycastScene::default();
    assert!(scene.is_empty());
    scene.push(quad_at_z(0.0, false));
    assert!(!scene.is_empty());
    assert_eq!(scene.triangle_count(), 2);
}
