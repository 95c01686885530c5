// Host-side tests for data-attribute config overrides.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod config {
    include!("../src/config.rs");
}

use std::collections::HashMap;

use strands_core::constants::{BACKGROUND_RGB, FADE_AMOUNT};
use strands_core::{ClearPolicy, ConstraintMode, Rgba, SimConfig};

fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn no_attributes_gives_defaults_with_entropy_seed() {
    let cfg = config::from_attributes(attrs(&[]), 99);
    let expected = SimConfig {
        seed: 99,
        ..Default::default()
    };
    assert_eq!(cfg, expected);
}

#[test]
fn numeric_overrides_are_applied() {
    let cfg = config::from_attributes(
        attrs(&[
            ("data-threads", "12"),
            ("data-segments", "20"),
            ("data-min-segments", " 8 "),
            ("data-segment-length", "6.5"),
            ("data-iterations", "3"),
            ("data-seed", "7"),
        ]),
        99,
    );
    assert_eq!(cfg.thread_count, 12);
    assert_eq!(cfg.segment_count, 20);
    assert_eq!(cfg.min_segments, 8);
    assert_eq!(cfg.segment_length, 6.5);
    assert_eq!(cfg.constraint_iterations, 3);
    assert_eq!(cfg.seed, 7);
}

#[test]
fn flag_overrides_are_applied() {
    let cfg = config::from_attributes(
        attrs(&[
            ("data-anchored", ""),
            ("data-trails", "false"),
            ("data-lighting", "off"),
            ("data-smooth", "no"),
        ]),
        1,
    );
    assert_eq!(cfg.constraint_mode, ConstraintMode::Anchored);
    assert_eq!(cfg.render.clear, ClearPolicy::Opaque(Rgba::from_rgb(BACKGROUND_RGB)));
    assert!(cfg.render.lighting.is_none());
    assert!(!cfg.render.smooth_curves);

    let cfg = config::from_attributes(attrs(&[("data-trails", "yes"), ("data-lighting", "1")]), 1);
    assert_eq!(cfg.render.clear, ClearPolicy::Fade(FADE_AMOUNT));
    assert!(cfg.render.lighting.is_some());
}

#[test]
fn unparseable_values_are_ignored() {
    let cfg = config::from_attributes(
        attrs(&[
            ("data-threads", "many"),
            ("data-segment-length", "long"),
            ("data-anchored", "maybe"),
            ("data-seed", "-1"),
        ]),
        5,
    );
    let defaults = SimConfig::default();
    assert_eq!(cfg.thread_count, defaults.thread_count);
    assert_eq!(cfg.segment_length, defaults.segment_length);
    assert_eq!(cfg.constraint_mode, defaults.constraint_mode);
    assert_eq!(cfg.seed, 5);
}

#[test]
fn invalid_combination_falls_back_to_defaults_keeping_seed() {
    let cfg = config::from_attributes(
        attrs(&[
            ("data-threads", "3"),
            ("data-segments", "4"),
            ("data-min-segments", "10"),
            ("data-seed", "11"),
        ]),
        5,
    );
    let expected = SimConfig {
        seed: 11,
        ..Default::default()
    };
    assert_eq!(cfg, expected);
}

#[test]
fn non_positive_segment_length_is_rejected() {
    let cfg = config::from_attributes(attrs(&[("data-segment-length", "0")]), 5);
    assert_eq!(cfg.segment_length, SimConfig::default().segment_length);
}

#[test]
fn oversized_overrides_fall_back_to_defaults() {
    for (attr, value) in [
        ("data-threads", "100000000"),
        ("data-segments", "50000"),
        ("data-iterations", "1000000"),
    ] {
        let cfg = config::from_attributes(attrs(&[(attr, value), ("data-seed", "3")]), 5);
        let expected = SimConfig {
            seed: 3,
            ..Default::default()
        };
        assert_eq!(cfg, expected, "{attr}={value}");
    }
}
