use glam::Vec2;
use strands_core::{PathPiece, Rgba, StrokeStyle, Surface, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::input::{backing_px, clamp_dpr};

// ===================== Canvas 2D surface =====================

/// `CanvasRenderingContext2d` behind the core `Surface` trait.
///
/// Drawing happens in css pixels; the context transform maps them onto the
/// density-scaled backing store.
pub struct Canvas2dSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    css: Viewport,
}

impl Canvas2dSurface {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        let css = Viewport::new(1.0, 1.0)?;
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
            css,
        })
    }

    /// Match the backing store to the canvas' css size times the (capped)
    /// device pixel ratio. Returns the css-pixel viewport.
    pub fn sync_size(&mut self, window: &web::Window) -> anyhow::Result<Viewport> {
        let dpr = clamp_dpr(window.device_pixel_ratio());
        let rect = self.canvas.get_bounding_client_rect();
        let css_w = rect.width().max(1.0);
        let css_h = rect.height().max(1.0);
        // Resizing the backing store resets context state.
        self.canvas.set_width(backing_px(css_w, dpr));
        self.canvas.set_height(backing_px(css_h, dpr));
        self.ctx
            .set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
            .map_err(|e| anyhow::anyhow!("setTransform failed: {:?}", e))?;
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        self.css = Viewport::new(css_w as f32, css_h as f32)?;
        log::debug!(
            "[canvas] {}x{} css @{:.2}x -> {}x{} px",
            css_w,
            css_h,
            dpr,
            self.canvas.width(),
            self.canvas.height()
        );
        Ok(self.css)
    }

    pub fn viewport(&self) -> Viewport {
        self.css
    }

    fn full_rect(&self) -> (f64, f64, f64, f64) {
        (0.0, 0.0, self.css.width as f64, self.css.height as f64)
    }
}

impl Surface for Canvas2dSurface {
    fn clear(&mut self, color: Rgba) {
        let (x, y, w, h) = self.full_rect();
        _ = self.ctx.set_global_composite_operation("source-over");
        self.ctx.clear_rect(x, y, w, h);
        if color.a > 0.0 {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx.fill_rect(x, y, w, h);
        }
    }

    fn fade(&mut self, amount: f32) {
        let (x, y, w, h) = self.full_rect();
        _ = self.ctx.set_global_composite_operation("destination-out");
        self.ctx.set_fill_style_str(&Rgba::new(0.0, 0.0, 0.0, amount).to_css());
        self.ctx.fill_rect(x, y, w, h);
        _ = self.ctx.set_global_composite_operation("source-over");
    }

    fn stroke(&mut self, start: Vec2, pieces: &[PathPiece], style: &StrokeStyle) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(start.x as f64, start.y as f64);
        for piece in pieces {
            match *piece {
                PathPiece::Line(to) => ctx.line_to(to.x as f64, to.y as f64),
                PathPiece::Quad { ctrl, to } => {
                    ctx.quadratic_curve_to(ctrl.x as f64, ctrl.y as f64, to.x as f64, to.y as f64)
                }
            }
        }
        ctx.set_stroke_style_str(&style.color.to_css());
        ctx.set_line_width(style.width as f64);
        ctx.stroke();
    }
}
