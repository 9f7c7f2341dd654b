//! Summary view of a glTF manifest, enough for the diagnostics page.
//!
//! Only the top-level arrays are inspected; everything else in the document
//! is ignored so partially valid manifests still produce counts.

use crate::error::{Result, SceneError};
use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BufferRef {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default, rename = "byteLength")]
    pub byte_length: u64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ModelManifest {
    #[serde(default)]
    pub buffers: Vec<BufferRef>,
    #[serde(default)]
    pub meshes: Vec<serde_json::Value>,
    #[serde(default)]
    pub materials: Vec<serde_json::Value>,
    #[serde(default)]
    pub textures: Vec<serde_json::Value>,
}

impl ModelManifest {
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SceneError::Manifest(e.to_string()))
    }

    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("  - Buffers: {}", self.buffers.len()),
            format!("  - Meshes: {}", self.meshes.len()),
            format!("  - Materials: {}", self.materials.len()),
            format!("  - Textures: {}", self.textures.len()),
        ]
    }

    /// Buffer URIs that need a separate request; embedded data URIs are skipped.
    pub fn external_buffers(&self) -> impl Iterator<Item = &str> {
        self.buffers
            .iter()
            .filter_map(|b| b.uri.as_deref())
            .filter(|u| !u.starts_with("data:"))
    }
}

/// Resolve a buffer URI against the directory of the manifest path.
pub fn resolve_buffer_uri(manifest_path: &str, uri: &str) -> String {
    if uri.starts_with("http") {
        return uri.to_string();
    }
    let dir = match manifest_path.rfind('/') {
        Some(i) => &manifest_path[..=i],
        None => "",
    };
    format!("{dir}{uri}")
}

/// Human-readable size; `None` or zero reads as "unknown".
pub fn format_size(bytes: Option<u64>) -> String {
    match bytes {
        None | Some(0) => "unknown".to_string(),
        Some(b) if b < 1024 => format!("{b} bytes"),
        Some(b) if b < 1024 * 1024 => format!("{:.2} KB", b as f64 / 1024.0),
        Some(b) => format!("{:.2} MB", b as f64 / (1024.0 * 1024.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(format_size(None), "unknown");
        assert_eq!(format_size(Some(512)), "512 bytes");
        assert_eq!(format_size(Some(1536)), "1.50 KB");
        assert_eq!(format_size(Some(3 * 1024 * 1024)), "3.00 MB");
    }

    #[test]
    fn relative_uris_resolve_next_to_manifest() {
        assert_eq!(
            resolve_buffer_uri("/cardboard_house/scene.gltf", "scene.bin"),
            "/cardboard_house/scene.bin"
        );
        assert_eq!(
            resolve_buffer_uri("/a/scene.gltf", "https://cdn.test/x.bin"),
            "https://cdn.test/x.bin"
        );
        assert_eq!(resolve_buffer_uri("scene.gltf", "scene.bin"), "scene.bin");
    }

    #[test]
    fn missing_arrays_count_as_empty() {
        let m = ModelManifest::parse(r#"{"asset":{"version":"2.0"},"meshes":[{}]}"#).unwrap();
        assert_eq!(m.meshes.len(), 1);
        assert!(m.buffers.is_empty());
        assert!(matches!(ModelManifest::parse("[1,"), Err(SceneError::Manifest(_))));
    }
}
