// Host-side tests for the asset probes, run against an in-memory fetcher.

use birthday_core::diagnostics::{run_asset_probes, AssetFetcher, HeadResponse, PROBE_PATHS};
use birthday_core::{Result, SceneError};
use std::collections::HashMap;

const MANIFEST: &str = r#"{
    "asset": {"version": "2.0"},
    "buffers": [{"uri": "scene.bin", "byteLength": 2048}],
    "meshes": [{}, {}],
    "materials": [{}],
    "textures": [{}, {}, {}]
}"#;

#[derive(Default)]
struct FakeServer {
    files: HashMap<&'static str, (&'static str, Vec<u8>)>,
    broken: Vec<&'static str>,
}

impl FakeServer {
    fn with_house() -> Self {
        let mut s = Self::default();
        s.files.insert(PROBE_PATHS[0], ("model/gltf+json", MANIFEST.as_bytes().to_vec()));
        s.files.insert(PROBE_PATHS[1], ("application/octet-stream", vec![0; 2048]));
        s.files.insert(PROBE_PATHS[2], ("image/png", vec![0; 3 * 1024 * 1024]));
        s
    }
}

impl AssetFetcher for FakeServer {
    async fn head(&self, path: &str) -> Result<HeadResponse> {
        if self.broken.iter().any(|b| *b == path) {
            return Err(SceneError::Fetch {
                path: path.to_string(),
                reason: "connection reset".into(),
            });
        }
        Ok(match self.files.get(path) {
            Some((ctype, body)) => HeadResponse {
                status: 200,
                content_type: Some(ctype.to_string()),
                content_length: Some(body.len() as u64),
            },
            None => HeadResponse {
                status: 404,
                content_type: Some("text/html".into()),
                content_length: None,
            },
        })
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        self.files
            .get(path)
            .map(|(_, body)| String::from_utf8_lossy(body).into_owned())
            .ok_or_else(|| SceneError::HttpStatus {
                path: path.to_string(),
                status: 404,
            })
    }
}

#[test]
fn known_good_paths_are_reachable() {
    let server = FakeServer::with_house();
    let report = pollster::block_on(run_asset_probes(&server, &PROBE_PATHS));
    assert_eq!(report.probes.len(), 3);
    for probe in &report.probes {
        assert!(probe.reachable, "{} unreachable", probe.path);
        assert!(probe.content_length.unwrap_or(0) > 0);
    }
    let text = report.text();
    assert!(text.contains("✓ /cardboard_house/scene.bin: 200 OK"));
    assert!(text.contains("Size: 3.00 MB"));
    assert!(text.contains("  - Meshes: 2"));
    assert!(text.contains("  - Textures: 3"));
    assert!(text.contains("    ✓ /cardboard_house/scene.bin: 200"));
}

#[test]
fn wrong_path_is_unreachable_without_panicking() {
    let server = FakeServer::with_house();
    let report = pollster::block_on(run_asset_probes(&server, &["/nope/scene.gltf"]));
    let probe = &report.probes[0];
    assert!(!probe.reachable);
    assert_eq!(probe.status, Some(404));
    assert!(report.lines[0].starts_with("✗ /nope/scene.gltf: 404 ERROR"));
}

#[test]
fn transport_failure_does_not_stop_remaining_probes() {
    let mut server = FakeServer::with_house();
    server.broken.push(PROBE_PATHS[1]);
    let report = pollster::block_on(run_asset_probes(&server, &PROBE_PATHS));
    assert_eq!(report.probes.len(), 3);
    assert!(!report.probes[1].reachable);
    assert!(report.probes[1].error.is_some());
    assert!(report.probes[2].reachable);
}

#[test]
fn broken_manifest_is_reported_inline() {
    let mut server = FakeServer::with_house();
    server
        .files
        .insert(PROBE_PATHS[0], ("model/gltf+json", b"{\"buffers\": 12".to_vec()));
    let report = pollster::block_on(run_asset_probes(&server, &PROBE_PATHS[..1]));
    assert!(report.probes[0].reachable);
    assert!(report.text().contains("✗ Error reading GLTF content"));
}
