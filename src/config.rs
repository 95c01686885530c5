use std::str::FromStr;

use strands_core::constants::{BACKGROUND_RGB, FADE_AMOUNT};
use strands_core::{ClearPolicy, ConstraintMode, LightingConfig, Rgba, SimConfig};

use crate::constants::*;

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, attr: &str) -> Option<T> {
    let raw = lookup(attr)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("[config] ignoring {}={:?}", attr, raw);
            None
        }
    }
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, attr: &str) -> Option<bool> {
    let raw = lookup(attr)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
            log::warn!("[config] ignoring {}={:?}", attr, raw);
            None
        }
    }
}

/// Build a config from `data-*` attribute overrides.
///
/// `lookup` returns an attribute's raw value. Unparseable values are ignored;
/// a combination that fails validation falls back to defaults.
pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>, entropy_seed: u64) -> SimConfig {
    let mut cfg = SimConfig {
        seed: parse(&lookup, ATTR_SEED).unwrap_or(entropy_seed),
        ..Default::default()
    };
    if let Some(v) = parse(&lookup, ATTR_THREADS) {
        cfg.thread_count = v;
    }
    if let Some(v) = parse(&lookup, ATTR_SEGMENTS) {
        cfg.segment_count = v;
    }
    if let Some(v) = parse(&lookup, ATTR_MIN_SEGMENTS) {
        cfg.min_segments = v;
    }
    if let Some(v) = parse(&lookup, ATTR_SEGMENT_LENGTH) {
        cfg.segment_length = v;
    }
    if let Some(v) = parse(&lookup, ATTR_ITERATIONS) {
        cfg.constraint_iterations = v;
    }
    if let Some(anchored) = parse_flag(&lookup, ATTR_ANCHORED) {
        cfg.constraint_mode = if anchored {
            ConstraintMode::Anchored
        } else {
            ConstraintMode::Symmetric
        };
    }
    if let Some(trails) = parse_flag(&lookup, ATTR_TRAILS) {
        cfg.render.clear = if trails {
            ClearPolicy::Fade(FADE_AMOUNT)
        } else {
            ClearPolicy::Opaque(Rgba::from_rgb(BACKGROUND_RGB))
        };
    }
    if let Some(lit) = parse_flag(&lookup, ATTR_LIGHTING) {
        cfg.render.lighting = lit.then(LightingConfig::default);
    }
    if let Some(smooth) = parse_flag(&lookup, ATTR_SMOOTH) {
        cfg.render.smooth_curves = smooth;
    }

    match cfg.validate() {
        Ok(()) => cfg,
        Err(e) => {
            log::warn!("[config] {}; using defaults", e);
            SimConfig {
                seed: cfg.seed,
                ..Default::default()
            }
        }
    }
}
