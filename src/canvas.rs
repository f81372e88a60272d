use backdrop_core::{BackdropError, Rgba, Stroke, Surface, Viewport};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `Surface` over a canvas 2D context. Drawing happens in CSS pixels; the
/// device pixel ratio is applied as the context transform on every clear.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    last_stroke: Option<Rgba>,
    last_fill: Option<Rgba>,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`. Fails when the environment has no
    /// 2D canvas support or the canvas already hosts another context type.
    pub fn acquire(canvas: &web::HtmlCanvasElement) -> Result<Self, BackdropError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| BackdropError::SurfaceUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| BackdropError::SurfaceUnavailable("no 2d context".into()))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| BackdropError::SurfaceUnavailable("unexpected context type".into()))?;
        Ok(Self {
            ctx,
            last_stroke: None,
            last_fill: None,
        })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, viewport: Viewport) {
        let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        // resizing the backing store resets context state
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.last_stroke = None;
        self.last_fill = None;
        self.ctx
            .clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
    }

    fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        if self.last_stroke != Some(stroke.color) {
            self.ctx.set_stroke_style_str(&stroke.color.to_string());
            self.last_stroke = Some(stroke.color);
        }
        self.ctx.set_line_width(stroke.width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn disc(&mut self, center: Vec2, radius: f32, fill: Rgba) {
        if self.last_fill != Some(fill) {
            self.ctx.set_fill_style_str(&fill.to_string());
            self.last_fill = Some(fill);
        }
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }
}
