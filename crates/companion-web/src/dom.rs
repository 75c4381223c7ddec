use companion_core::{CompanionConfig, OVERRIDE_KEYS};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn find_canvas(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    let dpr = device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr) as u32;
    let h_px = (rect.height() * dpr) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
}

/// Defaults overridden by `data-<key>` attributes on the canvas. Bad values are
/// logged and skipped.
pub fn read_config(canvas: &web::HtmlCanvasElement) -> CompanionConfig {
    let mut config = CompanionConfig::default();
    for key in OVERRIDE_KEYS {
        if let Some(value) = canvas.get_attribute(&format!("data-{key}")) {
            if let Err(e) = config.apply_override(key, &value) {
                log::warn!("[dom] ignoring data-{}: {}", key, e);
            }
        }
    }
    config
}
