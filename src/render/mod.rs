//! A compact forward renderer for the heart scene.
//!
//! Two pipelines: lit triangle meshes and additive instanced particle
//! sprites. Geometry lives in CPU-side [`Geometry`] assets; the renderer
//! mirrors attributes into GPU buffers keyed by geometry UUID and
//! re-uploads whenever an attribute's version moves (the particle field's
//! size attribute does this every frame).

pub mod context;

use std::sync::Arc;

use glam::{Mat4, Vec3};
use rustc_hash::{FxHashMap, FxHashSet};
use uuid::Uuid;
use winit::window::Window;

use crate::assets::AssetServer;
use crate::errors::Result;
use crate::resources::geometry::Geometry;
use crate::resources::material::MaterialKind;
use crate::scene::{LightKind, MeshKey, Scene};
use context::WgpuContext;

const MAX_DIR_LIGHTS: usize = 4;
const MAX_POINT_LIGHTS: usize = 16;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuDirLight {
    direction: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuPointLight {
    position: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    fog: [f32; 4],
    counts: [u32; 4],
    dir_lights: [GpuDirLight; MAX_DIR_LIGHTS],
    point_lights: [GpuPointLight; MAX_POINT_LIGHTS],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [0.0; 4],
            ambient: [0.0; 4],
            fog: [0.0; 4],
            counts: [0; 4],
            dir_lights: [GpuDirLight {
                direction: [0.0, 0.0, -1.0, 0.0],
                color: [0.0; 4],
            }; MAX_DIR_LIGHTS],
            point_lights: [GpuPointLight {
                position: [0.0; 4],
                color: [0.0; 4],
            }; MAX_POINT_LIGHTS],
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    emissive: [f32; 4],
    params: [f32; 4],
}

struct GpuAttribute {
    buffer: wgpu::Buffer,
    version: u64,
    size: u64,
}

#[derive(Default)]
struct GpuGeometry {
    attributes: FxHashMap<String, GpuAttribute>,
    index: Option<(GpuAttribute, wgpu::IndexFormat)>,
}

struct ObjectEntry {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct DrawOp {
    mesh_key: MeshKey,
    geometry: Uuid,
    is_points: bool,
    draw_count: u32,
    instance_count: u32,
    index_format: Option<wgpu::IndexFormat>,
}

/// Gamma expansion for colors authored as sRGB hex values.
fn srgb_to_linear(c: Vec3) -> Vec3 {
    Vec3::new(c.x.powf(2.2), c.y.powf(2.2), c.z.powf(2.2))
}

pub struct Renderer {
    ctx: WgpuContext,
    depth_view: wgpu::TextureView,

    mesh_pipeline: wgpu::RenderPipeline,
    points_pipeline: wgpu::RenderPipeline,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,

    objects: FxHashMap<MeshKey, ObjectEntry>,
    geometries: FxHashMap<Uuid, GpuGeometry>,
}

impl Renderer {
    /// Initializes the GPU context and pipelines for a window.
    pub async fn new(window: Arc<Window>, width: u32, height: u32) -> Result<Self> {
        let ctx = WgpuContext::new(window, width, height).await?;
        let device = &ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let uniform_layout_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame uniforms"),
            entries: &[uniform_layout_entry(0)],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object uniforms"),
            entries: &[uniform_layout_entry(0)],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene pipeline layout"),
            bind_group_layouts: &[Some(&frame_layout), Some(&object_layout)],
            immediate_size: 0,
        });

        let depth_stencil = |write: bool| {
            Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: Some(write),
                depth_compare: Some(wgpu::CompareFunction::Less),
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            })
        };

        let vec3_layout = |location| wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: location,
        };

        let mesh_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[vec3_layout(0)],
            },
            wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[vec3_layout(1)],
            },
        ];

        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("mesh_vs"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &mesh_buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("mesh_fs"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Letters are double-sided; the fragment shader flips
                // back-face normals.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: depth_stencil(true),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let points_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[vec3_layout(0)],
            },
            wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[vec3_layout(1)],
            },
            wgpu::VertexBufferLayout {
                array_stride: 4,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 0,
                    shader_location: 2,
                }],
            },
        ];

        let points_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("points pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("points_vs"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &points_buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("points_fs"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    // Additive accumulation of premultiplied sprites.
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: depth_stencil(false),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame uniforms"),
            size: size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame uniforms"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let depth_view = create_depth_view(device, ctx.config.width, ctx.config.height);

        Ok(Self {
            ctx,
            depth_view,
            mesh_pipeline,
            points_pipeline,
            frame_buffer,
            frame_bind_group,
            object_layout,
            objects: FxHashMap::default(),
            geometries: FxHashMap::default(),
        })
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.ctx.config.width, self.ctx.config.height)
    }

    /// Resizes the backing buffer and depth attachment.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
        self.depth_view =
            create_depth_view(&self.ctx.device, self.ctx.config.width, self.ctx.config.height);
    }

    /// Renders one frame of `scene` from its active camera.
    ///
    /// Silently skips when there is no active camera; a lost/outdated
    /// surface reconfigures and retries next frame.
    pub fn render(&mut self, scene: &Scene, assets: &AssetServer) {
        let Some(camera) = scene.active_camera_component() else {
            return;
        };

        let frame = self.build_frame_uniforms(scene, camera);
        self.ctx
            .queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame));

        let draws = self.prepare_draws(scene, assets);

        let surface_texture = match self.ctx.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = self.size();
                self.resize(w, h);
                return;
            }
            Err(err) => {
                log::warn!("Skipping frame: {err}");
                return;
            }
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let clear = srgb_to_linear(scene.background);
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(clear.x),
                            g: f64::from(clear.y),
                            b: f64::from(clear.z),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &self.frame_bind_group, &[]);

            // Opaque meshes first, then the additive particle pass on top.
            for points_phase in [false, true] {
                pass.set_pipeline(if points_phase {
                    &self.points_pipeline
                } else {
                    &self.mesh_pipeline
                });

                for op in draws.iter().filter(|op| op.is_points == points_phase) {
                    let Some(object) = self.objects.get(&op.mesh_key) else {
                        continue;
                    };
                    let Some(gpu_geometry) = self.geometries.get(&op.geometry) else {
                        continue;
                    };

                    pass.set_bind_group(1, &object.bind_group, &[]);

                    if op.is_points {
                        let ok = set_vertex_buffers(
                            &mut pass,
                            gpu_geometry,
                            &["position", "color", "size"],
                        );
                        if !ok {
                            continue;
                        }
                        pass.draw(0..4, 0..op.instance_count);
                    } else {
                        if !set_vertex_buffers(&mut pass, gpu_geometry, &["position", "normal"]) {
                            continue;
                        }
                        if let Some(format) = op.index_format {
                            if let Some((index, _)) = &gpu_geometry.index {
                                pass.set_index_buffer(index.buffer.slice(..), format);
                                pass.draw_indexed(0..op.draw_count, 0, 0..1);
                            }
                        } else {
                            pass.draw(0..op.draw_count, 0..1);
                        }
                    }
                }
            }
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    fn build_frame_uniforms(&self, scene: &Scene, camera: &crate::scene::Camera) -> FrameUniforms {
        let mut frame = FrameUniforms {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            view: camera.view_matrix.to_cols_array_2d(),
            camera_pos: camera.world_position().extend(1.0).to_array(),
            ambient: (srgb_to_linear(scene.ambient_color) * scene.ambient_intensity)
                .extend(1.0)
                .to_array(),
            ..Default::default()
        };

        if let Some(fog) = scene.fog {
            frame.fog = srgb_to_linear(fog.color).extend(fog.density).to_array();
        }

        let mut dir_count = 0usize;
        let mut point_count = 0usize;
        for (light, world) in scene.iter_active_lights() {
            let position: Vec3 = world.translation.into();
            let color = srgb_to_linear(light.color) * light.intensity;

            match &light.kind {
                LightKind::Directional(_) => {
                    if dir_count == MAX_DIR_LIGHTS {
                        continue;
                    }
                    // Directional lights are aimed at the origin.
                    let direction = (-position).normalize_or(Vec3::NEG_Z);
                    frame.dir_lights[dir_count] = GpuDirLight {
                        direction: direction.extend(0.0).to_array(),
                        color: color.extend(1.0).to_array(),
                    };
                    dir_count += 1;
                }
                LightKind::Point(point) => {
                    if point_count == MAX_POINT_LIGHTS {
                        continue;
                    }
                    frame.point_lights[point_count] = GpuPointLight {
                        position: position.extend(point.range).to_array(),
                        color: color.extend(1.0).to_array(),
                    };
                    point_count += 1;
                }
            }
        }
        frame.counts = [dir_count as u32, point_count as u32, 0, 0];

        frame
    }

    /// Gathers draw operations, syncing GPU-side geometry buffers and
    /// per-object uniforms. Also prunes cache entries for meshes and
    /// geometries that left the scene.
    fn prepare_draws(&mut self, scene: &Scene, assets: &AssetServer) -> Vec<DrawOp> {
        let geometries = assets.geometries.read_lock();
        let materials = assets.materials.read_lock();

        let mut draws = Vec::new();
        let mut live_geometries = FxHashSet::default();

        for (mesh_key, node, mesh) in scene.iter_visible_meshes() {
            let Some(geometry) = geometries.get(mesh.geometry) else {
                continue;
            };
            let Some(material) = materials.get(mesh.material) else {
                continue;
            };

            let model = Mat4::from(*node.world_matrix());
            let object = match &material.kind {
                MaterialKind::Standard(m) => ObjectUniforms {
                    model: model.to_cols_array_2d(),
                    color: srgb_to_linear(m.color).extend(1.0).to_array(),
                    emissive: srgb_to_linear(m.emissive).extend(1.0).to_array(),
                    params: [
                        (1.0 - m.roughness).max(0.05) * 128.0,
                        0.25 + m.metalness,
                        0.0,
                        1.0,
                    ],
                },
                MaterialKind::Phong(m) => ObjectUniforms {
                    model: model.to_cols_array_2d(),
                    color: srgb_to_linear(m.color).extend(1.0).to_array(),
                    emissive: (srgb_to_linear(m.emissive) * m.emissive_intensity)
                        .extend(1.0)
                        .to_array(),
                    params: [m.shininess, 1.0, 0.0, 1.0],
                },
                MaterialKind::Points(m) => ObjectUniforms {
                    model: model.to_cols_array_2d(),
                    color: [1.0; 4],
                    emissive: [0.0; 4],
                    params: [m.base_size, 0.0, 0.0, m.opacity],
                },
            };
            self.sync_object(mesh_key, &object);

            let is_points = material.is_points();
            let needed: &[&str] = if is_points {
                &["position", "color", "size"]
            } else {
                &["position", "normal"]
            };
            self.sync_geometry(geometry, needed, is_points);
            live_geometries.insert(geometry.uuid);

            draws.push(DrawOp {
                mesh_key,
                geometry: geometry.uuid,
                is_points,
                draw_count: geometry.draw_count(),
                instance_count: geometry.vertex_count(),
                index_format: if is_points {
                    None
                } else {
                    geometry.index_attribute().map(|attr| {
                        if attr.format == wgpu::VertexFormat::Uint16 {
                            wgpu::IndexFormat::Uint16
                        } else {
                            wgpu::IndexFormat::Uint32
                        }
                    })
                },
            });
        }

        self.geometries.retain(|uuid, _| live_geometries.contains(uuid));
        let live_meshes: FxHashSet<MeshKey> = draws.iter().map(|op| op.mesh_key).collect();
        self.objects.retain(|key, _| live_meshes.contains(key));

        draws
    }

    fn sync_object(&mut self, mesh_key: MeshKey, object: &ObjectUniforms) {
        let entry = self.objects.entry(mesh_key).or_insert_with(|| {
            let buffer = self.ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("object uniforms"),
                size: size_of::<ObjectUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = self
                .ctx
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("object uniforms"),
                    layout: &self.object_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });
            ObjectEntry { buffer, bind_group }
        });

        self.ctx
            .queue
            .write_buffer(&entry.buffer, 0, bytemuck::bytes_of(object));
    }

    /// Mirrors the needed CPU attributes into GPU buffers, re-uploading
    /// whenever an attribute version moved and recreating when it grew.
    fn sync_geometry(&mut self, geometry: &Geometry, needed: &[&str], skip_index: bool) {
        let entry = self.geometries.entry(geometry.uuid).or_default();

        for &name in needed {
            let Some(attr) = geometry.get_attribute(name) else {
                continue;
            };
            upload_attribute(
                &self.ctx.device,
                &self.ctx.queue,
                entry.attributes.entry(name.to_string()),
                attr.bytes(),
                attr.version(),
                wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            );
        }

        if skip_index {
            return;
        }
        if let Some(index) = geometry.index_attribute() {
            let format = if index.format == wgpu::VertexFormat::Uint16 {
                wgpu::IndexFormat::Uint16
            } else {
                wgpu::IndexFormat::Uint32
            };
            let slot = entry.index.take();
            let gpu = upload_attribute_value(
                &self.ctx.device,
                &self.ctx.queue,
                slot.map(|(attr, _)| attr),
                index.bytes(),
                index.version(),
                wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            );
            entry.index = Some((gpu, format));
        }
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn upload_attribute(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    entry: std::collections::hash_map::Entry<'_, String, GpuAttribute>,
    bytes: &[u8],
    version: u64,
    usage: wgpu::BufferUsages,
) {
    match entry {
        std::collections::hash_map::Entry::Occupied(mut occupied) => {
            let gpu = occupied.get_mut();
            if gpu.version == version {
                return;
            }
            if gpu.size == bytes.len() as u64 {
                queue.write_buffer(&gpu.buffer, 0, bytes);
                gpu.version = version;
            } else {
                *gpu = create_attribute_buffer(device, queue, bytes, version, usage);
            }
        }
        std::collections::hash_map::Entry::Vacant(vacant) => {
            vacant.insert(create_attribute_buffer(device, queue, bytes, version, usage));
        }
    }
}

fn upload_attribute_value(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    existing: Option<GpuAttribute>,
    bytes: &[u8],
    version: u64,
    usage: wgpu::BufferUsages,
) -> GpuAttribute {
    match existing {
        Some(gpu) if gpu.version == version => gpu,
        Some(mut gpu) if gpu.size == bytes.len() as u64 => {
            queue.write_buffer(&gpu.buffer, 0, bytes);
            gpu.version = version;
            gpu
        }
        _ => create_attribute_buffer(device, queue, bytes, version, usage),
    }
}

fn create_attribute_buffer(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    bytes: &[u8],
    version: u64,
    usage: wgpu::BufferUsages,
) -> GpuAttribute {
    // wgpu requires COPY_BUFFER_ALIGNMENT; pad the tail write if needed.
    let size = (bytes.len() as u64).next_multiple_of(wgpu::COPY_BUFFER_ALIGNMENT);
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("geometry attribute"),
        size,
        usage,
        mapped_at_creation: false,
    });
    queue.write_buffer(&buffer, 0, bytes);
    GpuAttribute {
        buffer,
        version,
        size: bytes.len() as u64,
    }
}

fn set_vertex_buffers(
    pass: &mut wgpu::RenderPass<'_>,
    geometry: &GpuGeometry,
    names: &[&str],
) -> bool {
    for (slot, name) in names.iter().enumerate() {
        let Some(attr) = geometry.attributes.get(*name) else {
            return false;
        };
        pass.set_vertex_buffer(slot as u32, attr.buffer.slice(..));
    }
    true
}
