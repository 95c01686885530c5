// Host-side tests for the fps readout formatting.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod overlay {
    include!("../src/overlay.rs");
}

use overlay::*;

#[test]
fn label_rounds_to_whole_frames() {
    assert_eq!(fps_label(Some(59.6)), "60 fps");
    assert_eq!(fps_label(Some(30.2)), "30 fps");
}

#[test]
fn label_placeholder_without_reading() {
    assert_eq!(fps_label(None), "-- fps");
    assert_eq!(fps_label(Some(f32::NAN)), "-- fps");
}

#[test]
fn small_jitter_does_not_trigger_redraw() {
    assert!(!fps_changed(Some(60.0), Some(60.2)));
    assert!(fps_changed(Some(60.0), Some(59.0)));
}

#[test]
fn first_reading_always_redraws() {
    assert!(fps_changed(None, Some(60.0)));
    assert!(fps_changed(Some(60.0), None));
    assert!(!fps_changed(None, None));
}
