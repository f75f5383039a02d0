use crate::model::{CubeFaces, ModelData};
use glam::{Mat4, Vec3};
use viewer_core::LightingParams;
use web_sys as web;

mod helpers;
mod mesh;
mod post;
mod targets;

use mesh::{GpuMesh, SceneGlobals, SceneResources};
use post::{PostResources, PostUniforms};
use targets::RenderTargets;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    white_view: wgpu::TextureView,

    scene: SceneResources,
    globals_bg: wgpu::BindGroup,
    env_view: wgpu::TextureView,
    env_max_lod: u32,
    meshes: Vec<GpuMesh>,

    post: PostResources,
    bg_hdr: wgpu::BindGroup,

    width: u32,
    height: u32,
    lighting: LightingParams,
    view_proj: Mat4,
    cam_eye: Vec3,
    overlay_alpha: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        lighting: LightingParams,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // Neutral stand-ins until real textures arrive
        let (_white, white_view) =
            helpers::create_rgba_texture(&device, &queue, "white_1x1", 1, 1, &[255; 4]);
        let grey = vec![128u8, 128, 128, 255];
        let (_env, env_view, env_max_lod) =
            helpers::create_cube_texture(&device, &queue, 1, &vec![grey; 6]);

        let scene = mesh::create_scene_resources(&device);
        let globals_bg =
            mesh::create_globals_bind_group(&device, &scene, &env_view, &linear_sampler);

        let post = post::create_post_resources(&device, format);
        let bg_hdr = post::create_bind_group(&device, &post, &linear_sampler, &targets.hdr_view);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            white_view,
            scene,
            globals_bg,
            env_view,
            env_max_lod,
            meshes: Vec::new(),
            post,
            bg_hdr,
            width,
            height,
            lighting,
            view_proj: Mat4::IDENTITY,
            cam_eye: Vec3::ZERO,
            overlay_alpha: 1.0,
        })
    }

    pub fn upload_model(&mut self, model: &ModelData) {
        self.meshes = mesh::upload_model(
            &self.device,
            &self.queue,
            &self.scene,
            &self.linear_sampler,
            &self.white_view,
            model,
        );
        log::info!("[gpu] {} meshes uploaded", self.meshes.len());
    }

    pub fn set_environment(&mut self, cube: &CubeFaces) {
        let (_tex, view, max_lod) =
            helpers::create_cube_texture(&self.device, &self.queue, cube.size, &cube.faces);
        self.env_view = view;
        self.env_max_lod = max_lod;
        self.globals_bg = mesh::create_globals_bind_group(
            &self.device,
            &self.scene,
            &self.env_view,
            &self.linear_sampler,
        );
        log::info!("[gpu] environment map {}px, {} mips", cube.size, max_lod + 1);
    }

    pub fn set_camera(&mut self, view_proj: Mat4, eye: Vec3) {
        self.view_proj = view_proj;
        self.cam_eye = eye;
    }

    pub fn set_overlay_alpha(&mut self, alpha: f32) {
        self.overlay_alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            // Recreate offscreen render targets and the bind group sampling them
            self.targets.recreate(&self.device, width, height);
            self.bg_hdr = post::create_bind_group(
                &self.device,
                &self.post,
                &self.linear_sampler,
                &self.targets.hdr_view,
            );
        }
    }

    fn write_uniforms(&self) {
        let l = &self.lighting;
        let light_dir = l.light_position.normalize_or_zero();
        let globals = SceneGlobals {
            view_proj: self.view_proj.to_cols_array_2d(),
            camera_pos: self.cam_eye.extend(1.0).to_array(),
            light_dir: light_dir.extend(0.0).to_array(),
            light_color: [
                l.light_color[0] * l.light_intensity,
                l.light_color[1] * l.light_intensity,
                l.light_color[2] * l.light_intensity,
                0.0,
            ],
            env: [l.env_intensity, self.env_max_lod as f32, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.scene.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let post = PostUniforms {
            background: [l.background[0], l.background[1], l.background[2], 1.0],
            exposure: l.exposure,
            overlay_alpha: self.overlay_alpha,
            _pad: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.post.uniform_buffer, 0, bytemuck::bytes_of(&post));
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.write_uniforms();
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: lit meshes → multisampled target, resolved into HDR; alpha marks coverage
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.msaa_view,
                    resolve_target: Some(&self.targets.hdr_view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            for m in &self.meshes {
                rpass.set_pipeline(if m.double_sided {
                    &self.scene.pipeline_double
                } else {
                    &self.scene.pipeline_culled
                });
                rpass.set_bind_group(1, &m.bind_group, &[]);
                rpass.set_vertex_buffer(0, m.vertex_buffer.slice(..));
                rpass.set_index_buffer(m.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..m.index_count, 0, 0..1);
            }
        }

        // Pass 2: tone map, background and loading overlay → swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            wgpu::Color::BLACK,
            &self.post.composite_pipeline,
            &self.bg_hdr,
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
