// Host-side tests for glTF flattening and environment map assembly.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod model {
    include!("../src/model.rs");
}

use glam::Vec3;
use model::*;

// One triangle (0,0,0) (1,0,0) (0,1,0) under a node lifted by +1 in Y.
const TRIANGLE_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [ { "nodes": [0] } ],
  "nodes": [ { "mesh": 0, "translation": [0.0, 1.0, 0.0] } ],
  "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 }, "indices": 1, "material": 0 } ] } ],
  "materials": [ {
    "doubleSided": true,
    "pbrMetallicRoughness": { "baseColorFactor": [0.5, 0.25, 1.0, 1.0], "metallicFactor": 0.0, "roughnessFactor": 0.5 }
  } ],
  "buffers": [ {
    "byteLength": 44,
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIAAAA="
  } ],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
    { "buffer": 0, "byteOffset": 36, "byteLength": 6 }
  ],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
    { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }
  ]
}"#;

// Same triangle, single-sided, under a node mirrored in X.
const MIRRORED_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [ { "nodes": [0] } ],
  "nodes": [ { "mesh": 0, "scale": [-1.0, 1.0, 1.0] } ],
  "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 }, "indices": 1 } ] } ],
  "buffers": [ {
    "byteLength": 44,
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIAAAA="
  } ],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
    { "buffer": 0, "byteOffset": 36, "byteLength": 6 }
  ],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
    { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }
  ]
}"#;

#[test]
fn gltf_nodes_are_flattened_into_world_space() {
    let root = model_transform(1.0, Vec3::new(0.0, -2.0, 0.0));
    let model = parse_gltf(TRIANGLE_GLTF.as_bytes(), root).expect("parse");

    assert_eq!(model.meshes.len(), 1);
    assert_eq!(model.triangle_count(), 1);
    let mesh = &model.meshes[0];
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.positions[0], [0.0, -1.0, 0.0]);
    assert_eq!(mesh.positions[2], [0.0, 0.0, 0.0]);
    // no normals in the file: generated from the face
    let n = Vec3::from_array(mesh.normals[0]);
    assert!(n.distance(Vec3::Z) < 1e-5);
    assert_eq!(mesh.uvs.len(), 3);

    let m = &mesh.material;
    assert!(m.double_sided);
    assert_eq!(m.base_color, [0.5, 0.25, 1.0, 1.0]);
    assert_eq!(m.metallic, 0.0);
    assert_eq!(m.roughness, 0.5);
    assert_eq!(m.base_color_image, None);
}

#[test]
fn raycast_scene_uses_the_rendered_geometry() {
    let model = parse_gltf(TRIANGLE_GLTF.as_bytes(), model_transform(2.0, Vec3::ZERO)).unwrap();
    let scene = model.raycast_scene();
    assert_eq!(scene.triangle_count(), 1);
    let ray = viewer_core::Ray::new(Vec3::new(0.2, 2.2, 5.0), Vec3::NEG_Z);
    let hit = scene.nearest(&ray).expect("hit");
    assert!((hit.distance - 5.0).abs() < 1e-4);
}

#[test]
fn garbage_is_not_a_model() {
    assert!(parse_gltf(b"not a gltf", glam::Mat4::IDENTITY).is_err());
}

#[test]
fn vertex_normals_follow_winding() {
    let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
    let ccw = vertex_normals(&positions, &[0, 1, 2]);
    let cw = vertex_normals(&positions, &[0, 2, 1]);
    assert!(ccw[0].distance(Vec3::Z) < 1e-6);
    assert!(cw[0].distance(Vec3::NEG_Z) < 1e-6);
}

fn solid_face(size: u32, value: u8) -> ImageData {
    ImageData {
        width: size,
        height: size,
        rgba: vec![value; (size * size * 4) as usize],
    }
}

#[test]
fn cube_needs_six_square_faces_of_one_size() {
    let cube = assemble_cube((0..6).map(|i| solid_face(4, i as u8)).collect()).unwrap();
    assert_eq!(cube.size, 4);
    assert_eq!(cube.faces.len(), 6);
    assert_eq!(cube.faces[5][0], 5);

    assert!(assemble_cube((0..5).map(|_| solid_face(4, 0)).collect()).is_err());

    let mut mixed: Vec<ImageData> = (0..6).map(|_| solid_face(4, 0)).collect();
    mixed[3] = solid_face(8, 0);
    assert!(assemble_cube(mixed).is_err());

    let mut rect: Vec<ImageData> = (0..6).map(|_| solid_face(4, 0)).collect();
    rect[0].height = 2;
    rect[0].rgba.truncate(4 * 2 * 4);
    assert!(assemble_cube(rect).is_err());
}

#[test]
fn decoded_face_is_rgba() {
    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]));
    let mut png = std::io::Cursor::new(Vec::new());
    img.write_to(&mut png, image::ImageFormat::Png).unwrap();

    let face = decode_face(png.get_ref()).unwrap();
    assert_eq!((face.width, face.height), (2, 2));
    assert_eq!(&face.rgba[..4], &[10, 20, 30, 255]);
}

#[test]
fn mirrored_node_keeps_front_faces_facing_out() {
    let model = parse_gltf(MIRRORED_GLTF.as_bytes(), glam::Mat4::IDENTITY).expect("parse");
    let mesh = &model.meshes[0];
    assert!(!mesh.material.double_sided);
    assert_eq!(mesh.indices, vec![0, 2, 1]);
    assert_eq!(mesh.positions[1], [-1.0, 0.0, 0.0]);
    let n = Vec3::from_array(mesh.normals[0]);
    assert!(n.distance(Vec3::Z) < 1e-5);

    let scene = model.raycast_scene();
    let front = viewer_core::Ray::new(Vec3::new(-0.2, 0.2, 5.0), Vec3::NEG_Z);
    let hit = scene.nearest(&front).expect("front face hit");
    assert!((hit.distance - 5.0).abs() < 1e-4);

    let back = viewer_core::Ray::new(Vec3::new(-0.2, 0.2, -5.0), Vec3::Z);
    assert!(scene.nearest(&back).is_none());
}
