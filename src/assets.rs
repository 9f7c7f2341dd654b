//! glTF model loading: fetch the manifest and its side-car files, flatten the
//! node tree into drawable parts and decode base-colour textures.

use crate::constants::*;
use crate::fetch;
use anyhow::Context;
use birthday_core::color;
use birthday_core::manifest::resolve_buffer_uri;
use birthday_core::mesh::{Aabb, MeshData, Vertex};
use birthday_core::schedule::ModelKind;
use fnv::FnvHashMap;
use glam::Mat4;

pub struct ModelImage {
    pub width: u32,
    pub height: u32,
    /// sRGB RGBA8.
    pub pixels: Vec<u8>,
}

#[derive(Clone, Copy, Debug)]
pub struct ModelMaterial {
    pub base_color: [f32; 4],
    /// Index into [`ModelData::images`].
    pub texture: Option<usize>,
    pub roughness: f32,
}

pub struct ModelPart {
    pub mesh: MeshData,
    pub material: usize,
    /// Node transform in model space.
    pub transform: Mat4,
}

pub struct ModelData {
    pub kind: ModelKind,
    pub parts: Vec<ModelPart>,
    pub materials: Vec<ModelMaterial>,
    pub images: Vec<Option<ModelImage>>,
    /// Model-space bounds over all parts.
    pub bounds: Aabb,
}

impl ModelData {
    pub fn placement(&self) -> Mat4 {
        self.kind.placement(&self.bounds)
    }

    pub fn world_bounds(&self) -> Aabb {
        self.bounds.transformed(self.placement())
    }
}

pub fn model_path(kind: ModelKind) -> &'static str {
    match kind {
        ModelKind::House => HOUSE_GLTF,
        ModelKind::Cat => CAT_GLTF,
    }
}

fn roughness(kind: ModelKind) -> f32 {
    match kind {
        ModelKind::House => HOUSE_ROUGHNESS,
        ModelKind::Cat => CAT_ROUGHNESS,
    }
}

/// Fetches each distinct URI once; buffers and images may share a file.
#[derive(Default)]
struct FileCache {
    files: FnvHashMap<String, Vec<u8>>,
}

impl FileCache {
    async fn get(&mut self, manifest_path: &str, uri: &str) -> anyhow::Result<&[u8]> {
        let url = if uri.starts_with("data:") {
            uri.to_string()
        } else {
            resolve_buffer_uri(manifest_path, uri)
        };
        if !self.files.contains_key(&url) {
            let bytes = fetch::fetch_bytes(&url).await?;
            self.files.insert(url.clone(), bytes);
        }
        self.files
            .get(&url)
            .map(|b| b.as_slice())
            .ok_or_else(|| anyhow::anyhow!("{url} missing from cache"))
    }
}

pub async fn load_model(kind: ModelKind) -> anyhow::Result<ModelData> {
    let path = model_path(kind);
    log::info!("[assets] loading {} from {}", kind.name(), path);
    let manifest = fetch::fetch_bytes(path).await?;
    let gltf = gltf::Gltf::from_slice(&manifest).with_context(|| format!("parsing {path}"))?;
    let mut cache = FileCache::default();

    let mut buffers: Vec<Vec<u8>> = Vec::new();
    for buffer in gltf.buffers() {
        let data = match buffer.source() {
            gltf::buffer::Source::Bin => gltf
                .blob
                .clone()
                .ok_or_else(|| anyhow::anyhow!("{path}: GLB binary chunk missing"))?,
            gltf::buffer::Source::Uri(uri) => cache.get(path, uri).await?.to_vec(),
        };
        if data.len() < buffer.length() {
            anyhow::bail!(
                "{path}: buffer {} has {} bytes, expected {}",
                buffer.index(),
                data.len(),
                buffer.length()
            );
        }
        buffers.push(data);
    }

    let mut images = Vec::new();
    for image in gltf.images() {
        let decoded = match image.source() {
            gltf::image::Source::View { view, .. } => {
                let start = view.offset();
                let end = start + view.length();
                buffers
                    .get(view.buffer().index())
                    .and_then(|b| b.get(start..end))
                    .map(decode_image)
            }
            gltf::image::Source::Uri { uri, .. } => match cache.get(path, uri).await {
                Ok(bytes) => Some(decode_image(bytes)),
                Err(e) => {
                    log::warn!("[assets] texture {uri}: {e:#}");
                    None
                }
            },
        };
        images.push(decoded.and_then(|r| {
            r.map_err(|e| log::warn!("[assets] texture {}: {e}", image.index()))
                .ok()
        }));
    }

    let mut materials: Vec<ModelMaterial> = gltf
        .materials()
        .map(|m| {
            let pbr = m.pbr_metallic_roughness();
            let [r, g, b, a] = pbr.base_color_factor();
            let [r, g, b] = color::lighten([r, g, b], kind.lighten());
            ModelMaterial {
                base_color: [r, g, b, a],
                texture: pbr
                    .base_color_texture()
                    .map(|info| info.texture().source().index()),
                roughness: roughness(kind),
            }
        })
        .collect();
    // primitives without a material use glTF's default white
    let default_material = materials.len();
    materials.push(ModelMaterial {
        base_color: [1.0, 1.0, 1.0, 1.0],
        texture: None,
        roughness: roughness(kind),
    });

    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or_else(|| anyhow::anyhow!("{path}: no scene"))?;
    let mut parts = Vec::new();
    for node in scene.nodes() {
        collect_parts(&node, Mat4::IDENTITY, &buffers, default_material, &mut parts);
    }

    let bounds = parts
        .iter()
        .filter_map(|p| p.mesh.bounds().map(|b| b.transformed(p.transform)))
        .reduce(|a, b| a.union(&b))
        .ok_or_else(|| anyhow::anyhow!("{path}: no geometry"))?;
    let triangles: usize = parts.iter().map(|p| p.mesh.triangles()).sum();
    log::info!(
        "[assets] {}: {} parts, {} triangles, {} materials, {} images",
        kind.name(),
        parts.len(),
        triangles,
        materials.len(),
        images.len()
    );

    Ok(ModelData {
        kind,
        parts,
        materials,
        images,
        bounds,
    })
}

fn decode_image(bytes: &[u8]) -> Result<ModelImage, image::ImageError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    Ok(ModelImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

fn collect_parts(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[Vec<u8>],
    default_material: usize,
    out: &mut Vec<ModelPart>,
) {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        for prim in mesh.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            if let Some(data) = read_primitive(&prim, buffers) {
                out.push(ModelPart {
                    mesh: data,
                    material: prim.material().index().unwrap_or(default_material),
                    transform,
                });
            }
        }
    }
    for child in node.children() {
        collect_parts(&child, transform, buffers, default_material, out);
    }
}

fn read_primitive(prim: &gltf::Primitive, buffers: &[Vec<u8>]) -> Option<MeshData> {
    let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.as_slice()));
    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    let normals: Vec<[f32; 3]> = reader
        .read_normals()
        .map(|n| n.collect())
        .unwrap_or_default();
    let uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .map(|t| t.into_f32().collect())
        .unwrap_or_default();
    let indices: Vec<u32> = match reader.read_indices() {
        Some(i) => i.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    let vertices = positions
        .iter()
        .enumerate()
        .map(|(i, p)| Vertex {
            position: *p,
            normal: normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
        })
        .collect();
    Some(MeshData { vertices, indices })
}
