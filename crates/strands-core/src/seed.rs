//! Building the thread set for a viewport.

use glam::Vec2;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::f32::consts::TAU;

use crate::color::hsl;
use crate::config::SimConfig;
use crate::error::{Result, StrandsError};
use crate::math::{direction, unit_at};
use crate::thread::{Thread, ThreadStyle};

/// Drawing-surface size in css pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(StrandsError::InvalidViewport { width, height })
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Whether `p` lies inside the viewport grown by `margin` on every side.
    pub fn contains(&self, p: Vec2, margin: f32) -> bool {
        p.x >= -margin
            && p.y >= -margin
            && p.x <= self.width + margin
            && p.y <= self.height + margin
    }

    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(Vec2::ZERO, Vec2::new(self.width, self.height))
    }
}

fn unit_disk(rng: &mut StdRng) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let radius = rng.gen::<f32>().sqrt();
    unit_at(angle) * radius
}

/// Create `config.thread_count` threads fanned out around `goal`.
pub fn seed_threads(config: &SimConfig, viewport: &Viewport, goal: Vec2, rng: &mut StdRng) -> Vec<Thread> {
    let render = &config.render;
    let tiers = WeightedIndex::new(render.depth_tiers.iter().map(|t| t.weight)).ok();
    let keep_rest = config.rest_stiffness > 0.0;
    let goal = viewport.clamp(goal);

    (0..config.thread_count)
        .map(|_| {
            let count = rng.gen_range(config.min_segments..=config.segment_count);
            let target_offset = unit_disk(rng);
            let drift = direction(target_offset).unwrap_or_else(|| unit_at(rng.gen_range(0.0..TAU)));

            let depth = tiers.as_ref().map_or(0, |t| t.sample(rng));
            let tier = render.depth_tiers[depth];
            let hue = rng.gen_range(render.hue_range.0..=render.hue_range.1);
            let width = rng.gen_range(render.width_range.0..=render.width_range.1) * tier.width_scale;

            let mut thread = Thread {
                points: Vec::with_capacity(count),
                style: ThreadStyle {
                    width,
                    hue,
                    rgb: hsl(hue, render.saturation, render.lightness),
                    depth,
                    opacity: tier.opacity,
                    specular_exponent: tier.specular_exponent,
                },
                target_offset,
                drift,
                length_factor: count as f32 / config.segment_count as f32,
            };
            let head = goal + target_offset * config.bundle_radius;
            thread.points = Thread::laid_out(head, rng.gen_range(0.0..TAU), count, config.segment_length);
            if keep_rest {
                for p in thread.points.iter_mut() {
                    p.rest = Some(p.pos - head);
                }
            }
            thread
        })
        .collect()
}
