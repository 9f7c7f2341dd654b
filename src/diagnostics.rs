//! Standalone troubleshooting page: asset reachability, graphics adapter and
//! browser environment, each written into its own `<pre>`.

use crate::constants::*;
use crate::dom;
use crate::fetch::GlooFetcher;
use crate::render;
use birthday_core::diagnostics::{run_asset_probes, BrowserInfo, GraphicsInfo, PROBE_PATHS};
use birthday_core::SceneError;
use web_sys as web;

pub async fn run() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    dom::add_click_listener(&document, RELOAD_BUTTON_ID, dom::reload_page);
    dom::add_click_listener(&document, BACK_BUTTON_ID, || {
        if let Some(w) = web::window() {
            _ = w.location().set_href(MAIN_PAGE_URL);
        }
    });

    let browser = browser_info().map(|b| b.lines()).unwrap_or_default();
    dom::set_text(&document, BROWSER_OUTPUT_ID, &browser.join("\n"));

    dom::set_text(&document, PROBE_OUTPUT_ID, "Checking assets...");
    let mut lines = run_asset_probes(&GlooFetcher, &PROBE_PATHS).await.lines;
    dom::set_text(&document, PROBE_OUTPUT_ID, &lines.join("\n"));

    lines.push(String::new());
    lines.push("WebGPU:".to_string());
    let graphics = probe_graphics().await;
    if let Err(e) = &graphics {
        log::warn!("[diagnostics] {e}");
    }
    lines.extend(GraphicsInfo::lines(graphics.as_ref()));
    dom::set_text(&document, PROBE_OUTPUT_ID, &lines.join("\n"));
    Ok(())
}

async fn probe_graphics() -> Result<GraphicsInfo, SceneError> {
    let instance = wgpu::Instance::default();
    let adapter = render::request_adapter(&instance, None)
        .await
        .map_err(|e| SceneError::Capability(e.to_string()))?;
    Ok(render::graphics_info(&adapter))
}

fn browser_info() -> Option<BrowserInfo> {
    let w = web::window()?;
    let nav = w.navigator();
    let size = |v: Result<wasm_bindgen::JsValue, _>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Some(BrowserInfo {
        user_agent: nav.user_agent().unwrap_or_default(),
        platform: nav.platform().unwrap_or_default(),
        cookies_enabled: cookies_enabled(&nav),
        language: nav.language().unwrap_or_default(),
        window_width: size(w.inner_width()),
        window_height: size(w.inner_height()),
        device_pixel_ratio: w.device_pixel_ratio(),
    })
}

fn cookies_enabled(nav: &web::Navigator) -> bool {
    js_sys::Reflect::get(nav, &"cookieEnabled".into())
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}
