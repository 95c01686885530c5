//! Tuning knobs for the simulation and renderer.
//!
//! The different looks of the background (stiff vs. elastic chains, trails vs.
//! hard clears, lit vs. flat strokes) are all expressed here rather than as
//! separate code paths.

use std::time::Duration;

use glam::Vec2;

use crate::color::Rgba;
use crate::constants::*;
use crate::error::{Result, StrandsError};

/// How adjacent points are pulled back to the rest length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintMode {
    /// Both points of a pair move half of the needed correction.
    Symmetric,
    /// The trailing point is placed exactly at rest length from its predecessor.
    Anchored,
}

/// What happens to the previous frame before strokes are drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClearPolicy {
    /// Paint the whole surface with an opaque colour (no trails).
    Opaque(Rgba),
    /// Remove this much alpha from existing pixels (motion trails).
    Fade(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchConfig {
    pub speed_smoothing: f32,
    pub sensitivity: f32,
    pub min_spread: f32,
    pub spread_smoothing: f32,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            speed_smoothing: SPEED_SMOOTHING,
            sensitivity: PINCH_SENSITIVITY,
            min_spread: MIN_SPREAD,
            spread_smoothing: SPREAD_SMOOTHING,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdleConfig {
    pub threshold: Duration,
    pub ramp: Duration,
    /// Displacement per tick (css px) of the last point at a full ramp. Body
    /// points get a share proportional to their index; the head is never moved.
    /// 0 disables.
    pub strength: f32,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            threshold: IDLE_THRESHOLD,
            ramp: IDLE_RAMP,
            strength: IDLE_DRIFT_STRENGTH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingConfig {
    /// Unit direction the light travels in.
    pub light_dir: Vec2,
    pub view_dir: Vec2,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_dir: Vec2::from(LIGHT_DIR).normalize(),
            view_dir: Vec2::from(VIEW_DIR).normalize(),
            ambient: AMBIENT,
            diffuse: DIFFUSE,
            specular: SPECULAR,
        }
    }
}

/// One depth layer a thread can be assigned to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthTier {
    /// Relative pick probability.
    pub weight: f32,
    pub opacity: f32,
    pub width_scale: f32,
    pub specular_exponent: f32,
}

pub fn default_depth_tiers() -> Vec<DepthTier> {
    DEPTH_TIERS
        .iter()
        .map(|&(weight, opacity, width_scale, specular_exponent)| DepthTier {
            weight,
            opacity,
            width_scale,
            specular_exponent,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub clear: ClearPolicy,
    pub lighting: Option<LightingConfig>,
    pub smooth_curves: bool,
    pub tip_fade_segments: usize,
    pub width_range: (f32, f32),
    pub hue_range: (f32, f32),
    pub saturation: f32,
    pub lightness: f32,
    pub base_alpha: f32,
    pub depth_tiers: Vec<DepthTier>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear: ClearPolicy::Fade(FADE_AMOUNT),
            lighting: Some(LightingConfig::default()),
            smooth_curves: true,
            tip_fade_segments: TIP_FADE_SEGMENTS,
            width_range: (BASE_WIDTH_MIN, BASE_WIDTH_MAX),
            hue_range: (HUE_MIN, HUE_MAX),
            saturation: SATURATION,
            lightness: LIGHTNESS,
            base_alpha: BASE_ALPHA,
            depth_tiers: default_depth_tiers(),
        }
    }
}

/// Full configuration of the thread bundle.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub thread_count: usize,
    /// Upper bound on points per thread.
    pub segment_count: usize,
    /// Lower bound on points per thread.
    pub min_segments: usize,
    pub segment_length: f32,
    pub follow_strength: f32,
    pub damping: f32,
    pub max_speed: f32,
    pub noise: f32,
    pub propagation: f32,
    pub rest_stiffness: f32,
    pub constraint_iterations: usize,
    pub constraint_mode: ConstraintMode,
    pub bundle_radius: f32,
    pub bounds_margin: f32,
    pub pinch: PinchConfig,
    pub idle: IdleConfig,
    pub render: RenderConfig,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            thread_count: THREAD_COUNT,
            segment_count: SEGMENT_COUNT,
            min_segments: MIN_SEGMENTS,
            segment_length: SEGMENT_LENGTH,
            follow_strength: FOLLOW_STRENGTH,
            damping: DAMPING,
            max_speed: MAX_SPEED,
            noise: NOISE,
            propagation: PROPAGATION,
            rest_stiffness: REST_STIFFNESS,
            constraint_iterations: CONSTRAINT_ITERATIONS,
            constraint_mode: ConstraintMode::Symmetric,
            bundle_radius: BUNDLE_RADIUS,
            bounds_margin: BOUNDS_MARGIN,
            pinch: PinchConfig::default(),
            idle: IdleConfig::default(),
            render: RenderConfig::default(),
            seed: 0x5EED_CAFE,
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> StrandsError {
    StrandsError::InvalidConfig { field, reason }
}

fn check_unit(field: &'static str, v: f32) -> Result<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(invalid(field, "must be within [0, 1]"))
    }
}

fn check_non_negative(field: &'static str, v: f32) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be finite and non-negative"))
    }
}

impl SimConfig {
    /// Reject settings that would make the simulation diverge or allocate
    /// degenerate threads.
    pub fn validate(&self) -> Result<()> {
        if self.thread_count > MAX_THREADS {
            return Err(invalid("thread_count", "too many threads"));
        }
        if self.min_segments < 2 {
            return Err(invalid("min_segments", "a thread needs at least 2 points"));
        }
        if self.segment_count < self.min_segments {
            return Err(invalid("segment_count", "must be >= min_segments"));
        }
        if self.segment_count > MAX_SEGMENTS {
            return Err(invalid("segment_count", "too many points per thread"));
        }
        if self.constraint_iterations > MAX_CONSTRAINT_ITERATIONS {
            return Err(invalid("constraint_iterations", "too many relaxation passes"));
        }
        if !(self.segment_length.is_finite() && self.segment_length > 0.0) {
            return Err(invalid("segment_length", "must be positive"));
        }
        if !(self.damping >= 0.0 && self.damping < 1.0) {
            return Err(invalid("damping", "must be within [0, 1)"));
        }
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(invalid("max_speed", "must be positive"));
        }
        check_unit("follow_strength", self.follow_strength)?;
        check_unit("propagation", self.propagation)?;
        check_unit("rest_stiffness", self.rest_stiffness)?;
        check_non_negative("noise", self.noise)?;
        check_non_negative("bundle_radius", self.bundle_radius)?;
        check_non_negative("bounds_margin", self.bounds_margin)?;

        check_unit("pinch.speed_smoothing", self.pinch.speed_smoothing)?;
        check_unit("pinch.spread_smoothing", self.pinch.spread_smoothing)?;
        check_unit("pinch.min_spread", self.pinch.min_spread)?;
        if !(self.pinch.sensitivity.is_finite() && self.pinch.sensitivity > 0.0) {
            return Err(invalid("pinch.sensitivity", "must be positive"));
        }
        check_non_negative("idle.strength", self.idle.strength)?;

        let r = &self.render;
        if let ClearPolicy::Fade(amount) = r.clear {
            check_unit("render.clear", amount)?;
        }
        let (w_lo, w_hi) = r.width_range;
        if !(w_lo.is_finite() && w_hi.is_finite() && w_lo >= 0.0 && w_lo <= w_hi) {
            return Err(invalid("render.width_range", "must be an ordered finite non-negative range"));
        }
        let (h_lo, h_hi) = r.hue_range;
        if !(h_lo.is_finite() && h_hi.is_finite() && h_lo <= h_hi) {
            return Err(invalid("render.hue_range", "must be an ordered finite range"));
        }
        check_unit("render.saturation", r.saturation)?;
        check_unit("render.lightness", r.lightness)?;
        check_unit("render.base_alpha", r.base_alpha)?;
        if r.depth_tiers.is_empty() {
            return Err(invalid("render.depth_tiers", "at least one tier is required"));
        }
        for t in &r.depth_tiers {
            check_unit("render.depth_tiers.opacity", t.opacity)?;
            check_non_negative("render.depth_tiers.width_scale", t.width_scale)?;
            check_non_negative("render.depth_tiers.specular_exponent", t.specular_exponent)?;
        }
        if r.depth_tiers.iter().any(|t| !(t.weight.is_finite() && t.weight >= 0.0))
            || r.depth_tiers.iter().map(|t| t.weight).sum::<f32>() <= 0.0
        {
            return Err(invalid("render.depth_tiers", "weights must be non-negative with a positive sum"));
        }
        if let Some(l) = &r.lighting {
            if l.light_dir.length_squared() < 0.5 || l.view_dir.length_squared() < 0.5 {
                return Err(invalid("render.lighting", "directions must be unit vectors"));
            }
        }
        Ok(())
    }
}
