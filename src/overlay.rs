use web_sys as web;

use crate::constants::FPS_DISPLAY_STEP;

pub fn fps_label(fps: Option<f32>) -> String {
    match fps {
        Some(v) if v.is_finite() => format!("{:.0} fps", v),
        _ => "-- fps".to_string(),
    }
}

/// Whether a new reading differs enough from what is on screen to redraw.
pub fn fps_changed(shown: Option<f32>, next: Option<f32>) -> bool {
    match (shown, next) {
        (Some(a), Some(b)) => (a - b).abs() >= FPS_DISPLAY_STEP,
        (None, None) => false,
        _ => true,
    }
}

#[inline]
pub fn update_fps(el: &web::Element, fps: Option<f32>) {
    el.set_text_content(Some(&fps_label(fps)));
}
