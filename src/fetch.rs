//! HTTP access for model loading and the asset probes.

use birthday_core::diagnostics::{AssetFetcher, HeadResponse};
use birthday_core::{Result, SceneError};
use gloo_net::http::{Method, RequestBuilder, Response};

fn fetch_error(path: &str, e: impl std::fmt::Display) -> SceneError {
    SceneError::Fetch {
        path: path.to_string(),
        reason: e.to_string(),
    }
}

fn head_of(resp: &Response) -> HeadResponse {
    let headers = resp.headers();
    HeadResponse {
        status: resp.status(),
        content_type: headers.get("content-type"),
        content_length: headers
            .get("content-length")
            .and_then(|v| v.trim().parse::<u64>().ok()),
    }
}

async fn get_ok(path: &str) -> Result<Response> {
    let resp = RequestBuilder::new(path)
        .method(Method::GET)
        .send()
        .await
        .map_err(|e| fetch_error(path, e))?;
    if !resp.ok() {
        return Err(SceneError::HttpStatus {
            path: path.to_string(),
            status: resp.status(),
        });
    }
    Ok(resp)
}

/// GET a body; any non-2xx status is an error.
pub async fn fetch_bytes(path: &str) -> Result<Vec<u8>> {
    let resp = get_ok(path).await?;
    let bytes = resp.binary().await.map_err(|e| fetch_error(path, e))?;
    log::info!("[assets] {} ({} bytes)", path, bytes.len());
    Ok(bytes)
}

#[derive(Clone, Copy, Default)]
pub struct GlooFetcher;

impl AssetFetcher for GlooFetcher {
    async fn head(&self, path: &str) -> Result<HeadResponse> {
        let resp = RequestBuilder::new(path)
            .method(Method::HEAD)
            .send()
            .await
            .map_err(|e| fetch_error(path, e))?;
        Ok(head_of(&resp))
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let resp = get_ok(path).await?;
        resp.text().await.map_err(|e| fetch_error(path, e))
    }
}
