//! Asset reachability probes and the environment report of the diagnostics
//! page.
//!
//! The runner only formats; the actual requests go through [`AssetFetcher`]
//! so the same code drives `gloo-net` in the browser and an in-memory table
//! in tests.

use crate::error::{Result, SceneError};
use crate::manifest::{format_size, resolve_buffer_uri, ModelManifest};

pub const PROBE_PATHS: [&str; 3] = [
    "/cardboard_house/scene.gltf",
    "/cardboard_house/scene.bin",
    "/cardboard_house/textures/Material_50_baseColor.png",
];

/// Status line of a HEAD (or GET) response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeadResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

#[allow(async_fn_in_trait)]
pub trait AssetFetcher {
    /// Transport failures are errors; any HTTP status is a response.
    async fn head(&self, path: &str) -> Result<HeadResponse>;
    async fn get_text(&self, path: &str) -> Result<String>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssetProbe {
    pub path: String,
    pub reachable: bool,
    pub status: Option<u16>,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ProbeReport {
    pub probes: Vec<AssetProbe>,
    pub lines: Vec<String>,
}

impl ProbeReport {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// HEAD one path; never fails, the outcome is folded into the probe.
pub async fn probe_asset(fetcher: &impl AssetFetcher, path: &str) -> AssetProbe {
    match fetcher.head(path).await {
        Ok(r) => AssetProbe {
            path: path.to_string(),
            reachable: r.status == 200,
            status: Some(r.status),
            content_type: r.content_type,
            content_length: r.content_length,
            error: None,
        },
        Err(e) => {
            log::warn!("[probe] {path}: {e}");
            AssetProbe {
                path: path.to_string(),
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    }
}

pub async fn run_asset_probes(fetcher: &impl AssetFetcher, paths: &[&str]) -> ProbeReport {
    let mut report = ProbeReport::default();
    for &path in paths {
        let probe = probe_asset(fetcher, path).await;
        let ctype = probe.content_type.as_deref().unwrap_or("unknown");
        match (probe.status, &probe.error) {
            (_, Some(err)) => report.lines.push(format!("✗ {path}: Error - {err}")),
            (Some(200), None) => {
                report.lines.push(format!(
                    "✓ {path}: 200 OK, Type: {ctype}, Size: {}",
                    format_size(probe.content_length)
                ));
                if path.ends_with(".gltf") {
                    inspect_manifest(fetcher, path, &mut report.lines).await;
                }
            }
            (Some(status), None) => {
                report.lines.push(format!("✗ {path}: {status} ERROR, Type: {ctype}"))
            }
            (None, None) => report.lines.push(format!("✗ {path}: no response")),
        }
        report.probes.push(probe);
    }
    log::info!("[probe] {} paths checked", paths.len());
    report
}

async fn inspect_manifest(fetcher: &impl AssetFetcher, path: &str, lines: &mut Vec<String>) {
    let manifest = match fetcher.get_text(path).await.and_then(|t| ModelManifest::parse(&t)) {
        Ok(m) => m,
        Err(e) => {
            lines.push(format!("  ✗ Error reading GLTF content: {e}"));
            return;
        }
    };
    lines.extend(manifest.summary_lines());
    for uri in manifest.external_buffers() {
        lines.push(format!("  - Buffer URI: {uri}"));
        let resolved = resolve_buffer_uri(path, uri);
        match fetcher.head(&resolved).await {
            Ok(r) => {
                let mark = if r.status == 200 { '✓' } else { '✗' };
                lines.push(format!("    {mark} {resolved}: {}", r.status));
            }
            Err(e) => lines.push(format!("    ✗ Error checking buffer: {e}")),
        }
    }
}

/// What the graphics adapter reports; `None` fields were unavailable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphicsInfo {
    pub vendor: Option<String>,
    pub device: Option<String>,
    pub backend: Option<String>,
    pub max_texture_size: Option<u32>,
}

impl GraphicsInfo {
    pub fn lines(info: std::result::Result<&GraphicsInfo, &SceneError>) -> Vec<String> {
        let info = match info {
            Ok(i) => i,
            Err(e) => return vec![format!("❌ {e}")],
        };
        let or_unknown = |v: &Option<String>| v.clone().unwrap_or_else(|| "unknown".into());
        let mut out = vec![
            "✓ WebGPU supported".to_string(),
            format!("- Vendor: {}", or_unknown(&info.vendor)),
            format!("- Renderer: {}", or_unknown(&info.device)),
            format!("- Backend: {}", or_unknown(&info.backend)),
        ];
        if let Some(s) = info.max_texture_size {
            out.push(format!("- Max Texture Size: {s}x{s}"));
        }
        out
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BrowserInfo {
    pub user_agent: String,
    pub platform: String,
    pub cookies_enabled: bool,
    pub language: String,
    pub window_width: f64,
    pub window_height: f64,
    pub device_pixel_ratio: f64,
}

impl BrowserInfo {
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("User Agent: {}", self.user_agent),
            format!("Platform: {}", self.platform),
            format!("Cookies Enabled: {}", self.cookies_enabled),
            format!("Language: {}", self.language),
            format!("Window Size: {}x{}", self.window_width, self.window_height),
            format!("Device Pixel Ratio: {}", self.device_pixel_ratio),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphics_failure_is_a_single_line() {
        let err = SceneError::Capability("no WebGPU adapter".into());
        let lines = GraphicsInfo::lines(Err(&err));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("no WebGPU adapter"));
    }

    #[test]
    fn graphics_lines_mark_unknowns() {
        let info = GraphicsInfo {
            vendor: Some("acme".into()),
            max_texture_size: Some(8192),
            ..Default::default()
        };
        let lines = GraphicsInfo::lines(Ok(&info));
        assert!(lines.contains(&"- Vendor: acme".to_string()));
        assert!(lines.contains(&"- Renderer: unknown".to_string()));
        assert!(lines.contains(&"- Max Texture Size: 8192x8192".to_string()));
    }
}
