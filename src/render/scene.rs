//! Lit, fogged, instanced scene pass. Every object is a mesh drawn with a
//! per-instance transform, tint and shading parameters.

use super::helpers::{self, DEPTH_FORMAT};
use super::targets::HDR_FORMAT;
use birthday_core::color::{linear, palette};
use birthday_core::constants::*;
use birthday_core::mesh::{MeshData, Vertex};
use glam::{Mat4, Vec3};
use std::ops::Range;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    fog_color: [f32; 4],
    /// near, far, time, unused
    fog_params: [f32; 4],
    ambient: [f32; 4],
    hemi_sky: [f32; 4],
    hemi_ground: [f32; 4],
    light_dirs: [[f32; 4]; 3],
    light_colors: [[f32; 4]; 3],
}

fn rgb4(hex: &str, intensity: f32) -> [f32; 4] {
    let [r, g, b] = linear(palette(hex));
    [r * intensity, g * intensity, b * intensity, 1.0]
}

fn dir4(towards_light: Vec3) -> [f32; 4] {
    towards_light.normalize_or_zero().extend(0.0).to_array()
}

impl Globals {
    pub(crate) fn new(view_proj: Mat4, camera_pos: Vec3, time: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: camera_pos.extend(1.0).to_array(),
            fog_color: rgb4(FOG_COLOR, 1.0),
            fog_params: [FOG_NEAR, FOG_FAR, time, 0.0],
            ambient: rgb4(AMBIENT_COLOR, AMBIENT_INTENSITY),
            hemi_sky: rgb4(HEMI_SKY_COLOR, HEMI_INTENSITY),
            hemi_ground: rgb4(GROUND_COLOR, HEMI_INTENSITY),
            // the key light shines from the sun
            light_dirs: [
                dir4(SUN_POSITION),
                dir4(FILL_LIGHT_POSITION),
                dir4(RIM_LIGHT_POSITION),
            ],
            light_colors: [
                rgb4(KEY_LIGHT_COLOR, KEY_LIGHT_INTENSITY),
                rgb4(FILL_LIGHT_COLOR, FILL_LIGHT_INTENSITY),
                rgb4(RIM_LIGHT_COLOR, RIM_LIGHT_INTENSITY),
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceRaw {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    /// emissive, unlit, highlight, roughness
    params: [f32; 4],
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Shading {
    pub emissive: f32,
    pub unlit: bool,
    pub highlight: f32,
    pub roughness: f32,
}

impl InstanceRaw {
    pub(crate) fn new(model: Mat4, color: [f32; 4], s: Shading) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            params: [
                s.emissive,
                if s.unlit { 1.0 } else { 0.0 },
                s.highlight,
                s.roughness,
            ],
        }
    }
}

pub(crate) struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    pub(crate) fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// One `draw_indexed` call.
#[derive(Clone, Debug)]
pub(crate) struct Draw {
    pub mesh: usize,
    pub material: usize,
    pub instances: Range<u32>,
    pub transparent: bool,
}

/// Per-frame instance list, grouped into draws as it is filled.
#[derive(Default)]
pub(crate) struct DrawList {
    pub instances: Vec<InstanceRaw>,
    pub draws: Vec<Draw>,
}

impl DrawList {
    pub(crate) fn clear(&mut self) {
        self.instances.clear();
        self.draws.clear();
    }

    /// Append instances; extends the previous draw when mesh and material match.
    pub(crate) fn push(
        &mut self,
        mesh: usize,
        material: usize,
        transparent: bool,
        items: impl IntoIterator<Item = InstanceRaw>,
    ) {
        let start = self.instances.len() as u32;
        self.instances.extend(items);
        let end = self.instances.len() as u32;
        if start == end {
            return;
        }
        match self.draws.last_mut() {
            Some(d)
                if d.mesh == mesh
                    && d.material == material
                    && d.transparent == transparent
                    && d.instances.end == start =>
            {
                d.instances.end = end;
            }
            _ => self.draws.push(Draw {
                mesh,
                material,
                instances: start..end,
                transparent,
            }),
        }
    }
}

pub(crate) struct ScenePass {
    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    material_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    pub(crate) meshes: Vec<GpuMesh>,
    pub(crate) materials: Vec<wgpu::BindGroup>,
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4,
    7 => Float32x4, 8 => Float32x4
];

fn make_scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    transparent: bool,
) -> wgpu::RenderPipeline {
    let buffers = [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        },
    ];
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(if transparent { "scene_transparent" } else { "scene_opaque" }),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            // double-sided
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: !transparent,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: Some(if transparent {
                    wgpu::BlendState::ALPHA_BLENDING
                } else {
                    wgpu::BlendState::REPLACE
                }),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

impl ScenePass {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(super::SCENE_WGSL.into()),
        });
        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_material_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_globals_bg"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_scene"),
            bind_group_layouts: &[&globals_layout, &material_layout],
            push_constant_ranges: &[],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("repeat_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let instance_capacity = crate::constants::INITIAL_INSTANCE_CAPACITY;
        Self {
            opaque_pipeline: make_scene_pipeline(device, &layout, &shader, false),
            transparent_pipeline: make_scene_pipeline(device, &layout, &shader, true),
            globals_buffer,
            globals_bind_group,
            material_layout,
            sampler,
            instance_buffer: create_instance_buffer(device, instance_capacity),
            instance_capacity,
            meshes: Vec::new(),
            materials: Vec::new(),
        }
    }

    pub(crate) fn add_mesh(&mut self, device: &wgpu::Device, label: &str, mesh: &MeshData) -> usize {
        self.meshes.push(GpuMesh::upload(device, label, mesh));
        self.meshes.len() - 1
    }

    pub(crate) fn add_material(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> usize {
        let view = helpers::upload_rgba_texture(device, queue, label, width, height, pixels);
        self.materials.push(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.material_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        }));
        self.materials.len() - 1
    }

    pub(crate) fn encode(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        clear: wgpu::Color,
        globals: &Globals,
        list: &DrawList,
    ) {
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(globals));
        if list.instances.len() > self.instance_capacity {
            self.instance_capacity = list.instances.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(device, self.instance_capacity);
            log::info!("[render] instance buffer grown to {}", self.instance_capacity);
        }
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&list.instances));

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_bind_group(0, &self.globals_bind_group, &[]);
        rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        // opaque before blended
        for transparent in [false, true] {
            rpass.set_pipeline(if transparent {
                &self.transparent_pipeline
            } else {
                &self.opaque_pipeline
            });
            for d in list.draws.iter().filter(|d| d.transparent == transparent) {
                let (Some(mesh), Some(material)) =
                    (self.meshes.get(d.mesh), self.materials.get(d.material))
                else {
                    continue;
                };
                rpass.set_bind_group(1, material, &[]);
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, d.instances.clone());
            }
        }
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_instances"),
        size: (capacity * std::mem::size_of::<InstanceRaw>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
