use backdrop_core::{BackdropConfig, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::css;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Viewport in CSS pixels, from `innerWidth`/`innerHeight`.
pub fn viewport_size(window: &web::Window) -> Viewport {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Viewport::new(w as f32, h as f32)
}

/// Match the canvas backing store to the viewport times devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: Viewport) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        canvas.set_width(((viewport.width as f64 * dpr) as u32).max(1));
        canvas.set_height(((viewport.height as f64 * dpr) as u32).max(1));
    }
}

/// Find `#id` or create it as a child of `<body>`.
pub fn element_or_create(document: &web::Document, tag: &str, id: &str) -> Option<web::Element> {
    if let Some(el) = document.get_element_by_id(id) {
        return Some(el);
    }
    let el = document.create_element(tag).ok()?;
    el.set_id(id);
    let body = document.body()?;
    _ = body.append_child(&el);
    Some(el)
}

#[inline]
pub fn set_style(el: &web::Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        _ = html.style().set_property(property, value);
    }
}

/// `(key, value)` pairs for every override present as a `data-*` attribute.
pub fn dataset_overrides(el: &web::HtmlElement) -> Vec<(&'static str, String)> {
    let data = el.dataset();
    BackdropConfig::KEYS
        .iter()
        .filter_map(|k| data.get(&css::dataset_key(k)).map(|v| (*k, v)))
        .collect()
}
