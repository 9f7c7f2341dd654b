use crate::assets::ModelData;
use crate::constants::*;
use birthday_core::color::{linear, palette};
use birthday_core::constants::*;
use birthday_core::diagnostics::GraphicsInfo;
use birthday_core::ground::GroundTexture;
use birthday_core::mesh::{plane, uv_sphere, Aabb};
use birthday_core::schedule::ModelKind;
use birthday_core::sky::Sky;
use birthday_core::Camera;
use glam::{Mat4, Vec3};
use web_sys as web;

mod helpers;
mod post;
mod scene;
mod targets;

use scene::{DrawList, Globals, InstanceRaw, ScenePass, Shading};
use targets::RenderTargets;

pub(crate) static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub(crate) static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

const MESH_SPHERE: usize = 0;
const MESH_SNOWFLAKE: usize = 1;
const MESH_GROUND: usize = 2;
const MATERIAL_WHITE: usize = 0;
const MATERIAL_GROUND: usize = 1;

struct PartDraw {
    mesh: usize,
    material: usize,
    model: Mat4,
    color: [f32; 4],
    roughness: f32,
}

struct GpuModel {
    kind: ModelKind,
    parts: Vec<PartDraw>,
}

/// What the renderer needs from the viewer each frame.
pub struct FrameScene<'s> {
    pub camera: &'s Camera,
    pub sky: &'s Sky,
    pub house_hovered: bool,
    pub elapsed_sec: f32,
}

fn rgba(hex: &str, alpha: f32) -> [f32; 4] {
    let [r, g, b] = linear(palette(hex));
    [r, g, b, alpha]
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    post: post::PostResources,
    post_groups: post::PostBindGroups,
    scene: ScenePass,
    models: Vec<GpuModel>,
    draws: DrawList,
    info: GraphicsInfo,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

/// Adapter request shared by the scene and the diagnostics page.
pub async fn request_adapter(
    instance: &wgpu::Instance,
    surface: Option<&wgpu::Surface<'_>>,
) -> anyhow::Result<wgpu::Adapter> {
    instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: surface,
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))
}

pub fn graphics_info(adapter: &wgpu::Adapter) -> GraphicsInfo {
    let info = adapter.get_info();
    let non_empty = |s: String| (!s.is_empty()).then_some(s);
    GraphicsInfo {
        vendor: non_empty(info.driver.clone())
            .or_else(|| (info.vendor != 0).then(|| format!("0x{:04x}", info.vendor))),
        device: non_empty(info.name),
        backend: Some(format!("{:?}", info.backend)),
        max_texture_size: Some(adapter.limits().max_texture_dimension_2d),
    }
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, ground: &GroundTexture) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = request_adapter(&instance, Some(&surface)).await?;
        let info = graphics_info(&adapter);
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // default limits; older WebGPU builds reject unknown fields
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;
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
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[render] {:?} {}x{} on {:?}",
            format,
            width,
            height,
            info.device
        );

        let targets = RenderTargets::new(&device, width, height);
        let post = post::PostResources::new(&device, format);
        let post_groups = post.bind_groups(&device, &targets);

        let mut scene = ScenePass::new(&device);
        scene.add_mesh(&device, "sphere", &uv_sphere(SPHERE_SEGMENTS, SPHERE_RINGS));
        scene.add_mesh(&device, "snowflake", &uv_sphere(SNOW_SEGMENTS, SNOW_RINGS));
        scene.add_mesh(&device, "ground", &plane(GROUND_SIZE, GROUND_TEXTURE_REPEAT));
        scene.add_material(&device, &queue, "white", 1, 1, &[255, 255, 255, 255]);
        scene.add_material(
            &device,
            &queue,
            "ground",
            ground.size,
            ground.size,
            &ground.pixels,
        );

        let [r, g, b] = linear(palette(CANVAS_BACKGROUND));
        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            post,
            post_groups,
            scene,
            models: Vec::new(),
            draws: DrawList::default(),
            info,
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        })
    }

    pub fn info(&self) -> &GraphicsInfo {
        &self.info
    }

    /// Upload a loaded model; returns its world-space bounds.
    pub fn add_model(&mut self, model: &ModelData) -> Aabb {
        let placement = model.placement();
        let label = model.kind.name();
        let textures: Vec<Option<usize>> = model
            .images
            .iter()
            .map(|img| {
                img.as_ref().map(|img| {
                    self.scene.add_material(
                        &self.device,
                        &self.queue,
                        label,
                        img.width,
                        img.height,
                        &img.pixels,
                    )
                })
            })
            .collect();
        let parts = model
            .parts
            .iter()
            .map(|part| {
                let material = model.materials.get(part.material);
                PartDraw {
                    mesh: self.scene.add_mesh(&self.device, label, &part.mesh),
                    material: material
                        .and_then(|m| m.texture)
                        .and_then(|t| textures.get(t).copied().flatten())
                        .unwrap_or(MATERIAL_WHITE),
                    model: placement * part.transform,
                    color: material.map(|m| m.base_color).unwrap_or([1.0; 4]),
                    roughness: material.map(|m| m.roughness).unwrap_or(1.0),
                }
            })
            .collect();
        self.models.push(GpuModel {
            kind: model.kind,
            parts,
        });
        model.world_bounds()
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
            self.targets.recreate(&self.device, width, height);
            self.post_groups = self.post.bind_groups(&self.device, &self.targets);
        }
    }

    fn build_draws(&mut self, frame: &FrameScene) {
        let list = &mut self.draws;
        list.clear();

        list.push(
            MESH_GROUND,
            MATERIAL_GROUND,
            false,
            [InstanceRaw::new(
                Mat4::from_translation(Vec3::new(0.0, GROUND_Y, 0.0)),
                [1.0; 4],
                Shading {
                    roughness: GROUND_ROUGHNESS,
                    ..Default::default()
                },
            )],
        );

        for model in &self.models {
            let highlight = if model.kind == ModelKind::House && frame.house_hovered {
                HOVER_EMISSIVE
            } else {
                0.0
            };
            for part in &model.parts {
                list.push(
                    part.mesh,
                    part.material,
                    part.color[3] < 1.0,
                    [InstanceRaw::new(
                        part.model,
                        part.color,
                        Shading {
                            highlight,
                            roughness: part.roughness,
                            ..Default::default()
                        },
                    )],
                );
            }
        }

        let sun = &frame.sky.sun;
        list.push(
            MESH_SPHERE,
            MATERIAL_WHITE,
            false,
            [InstanceRaw::new(
                Mat4::from_scale_rotation_translation(
                    Vec3::splat(sun.radius),
                    glam::Quat::IDENTITY,
                    sun.position,
                ),
                rgba(SUN_COLOR, 1.0),
                Shading {
                    emissive: sun.emissive,
                    unlit: true,
                    ..Default::default()
                },
            )],
        );

        let snow_colors = SNOW_COLORS.map(|c| rgba(c, 0.9));
        list.push(
            MESH_SNOWFLAKE,
            MATERIAL_WHITE,
            false,
            frame.sky.snow.iter().map(|f| {
                InstanceRaw::new(
                    Mat4::from_scale_rotation_translation(
                        Vec3::splat(f.size),
                        glam::Quat::IDENTITY,
                        f.position,
                    ),
                    snow_colors[f.color % snow_colors.len()],
                    Shading {
                        unlit: true,
                        ..Default::default()
                    },
                )
            }),
        );

        let cloud = linear(palette(CLOUD_COLOR));
        list.push(
            MESH_SPHERE,
            MATERIAL_WHITE,
            true,
            frame.sky.clouds.iter().flat_map(|c| c.puff_instances()).map(|p| {
                InstanceRaw::new(
                    p.model,
                    [cloud[0], cloud[1], cloud[2], p.opacity],
                    Shading {
                        roughness: 1.0,
                        ..Default::default()
                    },
                )
            }),
        );
    }

    pub fn render(&mut self, frame: &FrameScene) -> Result<(), wgpu::SurfaceError> {
        self.build_draws(frame);
        let globals = Globals::new(
            frame.camera.view_proj(),
            frame.camera.pose().position,
            frame.elapsed_sec,
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.scene.encode(
            &self.device,
            &self.queue,
            &mut encoder,
            &self.targets.hdr_view,
            &self.targets.depth_view,
            self.clear_color,
            &globals,
            &self.draws,
        );
        self.post.run(
            &self.queue,
            &mut encoder,
            &self.post_groups,
            &self.targets,
            &view,
            (self.width, self.height),
            frame.elapsed_sec,
        );
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Reconfigure after `Lost`/`Outdated`.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}
