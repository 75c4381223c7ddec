use crate::color;
use companion_core::palette::SAFETY_ZONE_RGB;
use companion_core::{NodeKind, Scene, VisualNode};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

// Safety zone rings relative to the zone radius, outermost first
const ZONE_RING_SCALES: [f64; 3] = [1.0, 0.8, 0.6];
const ZONE_DASH: [f64; 2] = [8.0, 6.0];
const RING_DASH: [f64; 2] = [4.0, 4.0];
// Glyph font size relative to the disc radius before the size class applies
const GLYPH_FILL: f32 = 1.1;

pub struct Painter {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl Painter {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
        })
    }

    pub fn clear(&self) {
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    /// Draw the scene in node order. Coordinates are CSS px.
    pub fn paint(&self, scene: &Scene, dpr: f64) -> Result<(), JsValue> {
        self.clear();
        if scene.is_empty() {
            return Ok(());
        }
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
        for node in &scene.nodes {
            self.ctx.save();
            self.ctx
                .translate(node.center.x as f64, node.center.y as f64)?;
            self.ctx.rotate(node.rotation as f64)?;
            let r = (node.radius * node.scale) as f64;
            match node.kind {
                NodeKind::SafetyZone => self.safety_zone(node, r)?,
                NodeKind::PulseRing => self.ring(node, r, &[])?,
                NodeKind::DashedRing => self.ring(node, r, &RING_DASH)?,
                NodeKind::Sparkle => self.sparkle(node, r)?,
                NodeKind::Indicator | NodeKind::Floating | NodeKind::Particle => {
                    self.badge(node, r)?
                }
            }
            self.ctx.restore();
        }
        Ok(())
    }

    fn set_dash(&self, dash: &[f64]) -> Result<(), JsValue> {
        let segments = js_sys::Array::new();
        for d in dash {
            segments.push(&JsValue::from_f64(*d));
        }
        self.ctx.set_line_dash(&segments)
    }

    fn circle(&self, r: f64) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(0.0, 0.0, r.max(0.0), 0.0, TAU)
    }

    fn safety_zone(&self, node: &VisualNode, r: f64) -> Result<(), JsValue> {
        self.set_dash(&ZONE_DASH)?;
        self.ctx.set_line_width(1.5);
        for (scale, rgb) in ZONE_RING_SCALES.iter().zip(SAFETY_ZONE_RGB) {
            self.ctx
                .set_stroke_style_str(&color::rgba(rgb, node.opacity));
            self.circle(r * scale)?;
            self.ctx.stroke();
        }
        Ok(())
    }

    fn ring(&self, node: &VisualNode, r: f64, dash: &[f64]) -> Result<(), JsValue> {
        self.set_dash(dash)?;
        self.ctx.set_line_width(2.0);
        self.ctx
            .set_stroke_style_str(&color::rgba(node.rgb, node.opacity));
        self.circle(r)?;
        self.ctx.stroke();
        Ok(())
    }

    fn badge(&self, node: &VisualNode, r: f64) -> Result<(), JsValue> {
        self.ctx.set_global_alpha(node.opacity.clamp(0.0, 1.0) as f64);
        self.ctx.set_fill_style_str(&color::rgba(node.rgb, 0.25));
        self.circle(r)?;
        self.ctx.fill();
        self.set_dash(&[])?;
        self.ctx.set_line_width(1.5);
        self.ctx.set_stroke_style_str(&color::hex(node.rgb));
        self.ctx.stroke();
        if let Some(glyph) = node.glyph {
            self.ctx.set_fill_style_str(&color::hex(node.rgb));
            self.ctx
                .set_font(&color::glyph_font(r as f32, GLYPH_FILL * node.glyph_scale));
            self.ctx.set_text_align("center");
            self.ctx.set_text_baseline("middle");
            self.ctx.fill_text(&glyph.to_string(), 0.0, 0.0)?;
        }
        self.ctx.set_global_alpha(1.0);
        Ok(())
    }

    /// Four-pointed star.
    fn sparkle(&self, node: &VisualNode, r: f64) -> Result<(), JsValue> {
        if r <= 0.0 {
            return Ok(());
        }
        self.ctx
            .set_fill_style_str(&color::rgba(node.rgb, node.opacity));
        self.ctx.begin_path();
        for i in 0..8 {
            let a = TAU * i as f64 / 8.0;
            let len = if i % 2 == 0 { r * 2.0 } else { r * 0.6 };
            let (x, y) = (len * a.cos(), len * a.sin());
            if i == 0 {
                self.ctx.move_to(x, y);
            } else {
                self.ctx.line_to(x, y);
            }
        }
        self.ctx.close_path();
        self.ctx.fill();
        Ok(())
    }
}
