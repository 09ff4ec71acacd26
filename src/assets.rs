use portal_core::assets::decode_triangle_soup;
use portal_core::diorama;
use portal_core::{AssetError, SceneObject};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetches and decodes the interactive mesh. Any failure is reported as
/// `AssetError` so the controller can settle into `Unavailable`.
pub async fn load_axe(url: &str) -> Result<SceneObject, AssetError> {
    let bytes = fetch_bytes(url)
        .await
        .map_err(|e| AssetError::Unavailable(format!("{url}: {e}")))?;
    let mesh = decode_triangle_soup(&bytes)?;
    log::info!(
        "[assets] {} decoded ({} bytes, {} triangles)",
        url,
        bytes.len(),
        mesh.triangles().len()
    );
    Ok(diorama::axe_object(mesh))
}

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {}", resp.status());
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
