use glam::Vec2;
use web_sys as web;

use crate::constants::{MAX_DEVICE_PIXEL_RATIO, MIN_BACKING_PX};

// ---------------- Pointer helpers ----------------
#[inline]
pub fn client_to_surface(client: Vec2, rect_origin: Vec2) -> Vec2 {
    client - rect_origin
}

/// Pointer position in css pixels relative to the canvas' top-left corner.
#[inline]
pub fn pointer_surface_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    client_to_surface(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
    )
}

// ---------------- Pixel density ----------------
#[inline]
pub fn clamp_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr.min(MAX_DEVICE_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Backing-store pixels for a css extent at the given density.
#[inline]
pub fn backing_px(css: f64, dpr: f64) -> u32 {
    let px = (css * dpr).round();
    if px.is_finite() && px >= MIN_BACKING_PX as f64 {
        px as u32
    } else {
        MIN_BACKING_PX
    }
}
