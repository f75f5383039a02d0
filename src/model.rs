// CPU-side scene data decoded from the fetched assets.
//
// The glTF node hierarchy is flattened into world-space triangle meshes so
// the renderer and the hotspot ray casts share the exact same geometry.
// Nothing in here touches the DOM or the GPU.

use anyhow::Context;
use glam::{Mat3, Mat4, Quat, Vec3};
use viewer_core::{Mesh, RaycastScene};

#[derive(Clone, Debug, PartialEq)]
pub struct MaterialData {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub double_sided: bool,
    /// Index into `ModelData::images`.
    pub base_color_image: Option<usize>,
}

impl Default for MaterialData {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0],
            metallic: 1.0,
            roughness: 1.0,
            double_sided: false,
            base_color_image: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub material: MaterialData,
}

#[derive(Clone, Debug)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub struct ModelData {
    pub meshes: Vec<MeshData>,
    pub images: Vec<ImageData>,
}

impl ModelData {
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len() / 3).sum()
    }

    /// Ray-cast view of every mesh, in the same world space the renderer uses.
    pub fn raycast_scene(&self) -> RaycastScene {
        RaycastScene::new(
            self.meshes
                .iter()
                .map(|m| {
                    Mesh::new(
                        m.positions.iter().map(|p| Vec3::from_array(*p)).collect(),
                        m.indices.clone(),
                        m.material.double_sided,
                    )
                })
                .collect(),
        )
    }
}

/// Root transform applied on top of the model's own node hierarchy.
pub fn model_transform(scale: f32, translation: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(Vec3::splat(scale), Quat::IDENTITY, translation)
}

/// Parse a binary or embedded glTF and flatten it into world-space meshes.
pub fn parse_gltf(bytes: &[u8], root: Mat4) -> anyhow::Result<ModelData> {
    let (document, buffers, images) = gltf::import_slice(bytes).context("parse glTF")?;
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| anyhow::anyhow!("glTF has no scene"))?;

    let mut model = ModelData {
        meshes: Vec::new(),
        images: images.iter().map(convert_image).collect(),
    };
    for node in scene.nodes() {
        visit_node(&node, root, &buffers, &mut model.meshes);
    }
    Ok(model)
}

fn visit_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<MeshData>,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        for prim in mesh.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                log::warn!(
                    "[loader] skipping {:?} primitive in mesh {:?}",
                    prim.mode(),
                    mesh.name()
                );
                continue;
            }
            if let Some(data) = read_primitive(&prim, world, buffers) {
                out.push(data);
            }
        }
    }
    for child in node.children() {
        visit_node(&child, world, buffers, out);
    }
}

fn read_primitive(
    prim: &gltf::Primitive,
    world: Mat4,
    buffers: &[gltf::buffer::Data],
) -> Option<MeshData> {
    let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
    let local: Vec<Vec3> = reader.read_positions()?.map(Vec3::from_array).collect();
    let mut indices: Vec<u32> = match reader.read_indices() {
        Some(i) => i.into_u32().collect(),
        None => (0..local.len() as u32).collect(),
    };
    indices.truncate(indices.len() - indices.len() % 3);

    // Mirrored transforms flip winding; restore counter-clockwise fronts.
    if world.determinant() < 0.0 {
        for tri in indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
    }

    let positions: Vec<Vec3> = local.iter().map(|p| world.transform_point3(*p)).collect();
    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
    let normals: Vec<Vec3> = match reader.read_normals() {
        Some(n) => n
            .map(|n| (normal_matrix * Vec3::from_array(n)).normalize_or_zero())
            .collect(),
        None => vertex_normals(&positions, &indices),
    };

    let material = prim.material();
    let pbr = material.pbr_metallic_roughness();
    let base_tex = pbr.base_color_texture();
    let uv_set = base_tex.as_ref().map(|t| t.tex_coord()).unwrap_or(0);
    let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(uv_set) {
        Some(t) => t.into_f32().collect(),
        None => vec![[0.0, 0.0]; positions.len()],
    };

    Some(MeshData {
        positions: positions.iter().map(|p| p.to_array()).collect(),
        normals: normals.iter().map(|n| n.to_array()).collect(),
        uvs,
        indices,
        material: MaterialData {
            base_color: pbr.base_color_factor(),
            metallic: pbr.metallic_factor(),
            roughness: pbr.roughness_factor(),
            double_sided: material.double_sided(),
            base_color_image: base_tex.map(|t| t.texture().source().index()),
        },
    })
}

/// Area-weighted vertex normals for meshes that ship without them.
pub fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (Some(pa), Some(pb), Some(pc)) = (positions.get(a), positions.get(b), positions.get(c))
        else {
            continue;
        };
        let n = (*pb - *pa).cross(*pc - *pa);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter().map(Vec3::normalize_or_zero).collect()
}

fn convert_image(img: &gltf::image::Data) -> ImageData {
    use gltf::image::Format;
    let px = &img.pixels;
    let rgba = match img.format {
        Format::R8G8B8A8 => px.clone(),
        Format::R8G8B8 => px
            .chunks_exact(3)
            .flat_map(|c| [c[0], c[1], c[2], 255])
            .collect(),
        Format::R8G8 => px
            .chunks_exact(2)
            .flat_map(|c| [c[0], c[0], c[0], c[1]])
            .collect(),
        Format::R8 => px.iter().flat_map(|v| [*v, *v, *v, 255]).collect(),
        other => {
            log::warn!("[loader] unsupported texture format {:?}, using white", other);
            vec![255; (img.width * img.height * 4) as usize]
        }
    };
    ImageData {
        width: img.width,
        height: img.height,
        rgba,
    }
}

/// Six square RGBA faces in +X, -X, +Y, -Y, +Z, -Z order.
#[derive(Clone, Debug)]
pub struct CubeFaces {
    pub size: u32,
    pub faces: Vec<Vec<u8>>,
}

pub fn decode_face(bytes: &[u8]) -> anyhow::Result<ImageData> {
    let img = image::load_from_memory(bytes)
        .context("decode environment face")?
        .to_rgba8();
    Ok(ImageData {
        width: img.width(),
        height: img.height(),
        rgba: img.into_raw(),
    })
}

pub fn assemble_cube(faces: Vec<ImageData>) -> anyhow::Result<CubeFaces> {
    if faces.len() != 6 {
        anyhow::bail!("cube map needs 6 faces, got {}", faces.len());
    }
    let size = faces[0].width;
    if let Some(bad) = faces
        .iter()
        .position(|f| f.width != size || f.height != size)
    {
        anyhow::bail!(
            "cube face {} is {}x{}, expected {size}x{size}",
            bad,
            faces[bad].width,
            faces[bad].height
        );
    }
    Ok(CubeFaces {
        size,
        faces: faces.into_iter().map(|f| f.rgba).collect(),
    })
}
