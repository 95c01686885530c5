//! One simulation tick for the whole bundle.
//!
//! Order per thread: steer and integrate the head (with bounds recovery),
//! integrate the body, relax distance constraints, then apply idle drift.

use std::f32::consts::TAU;
use std::time::Duration;

use glam::Vec2;
use instant::Instant;
use rand::prelude::*;

use crate::config::{ConstraintMode, IdleConfig, PinchConfig, SimConfig};
use crate::constants::MIN_DISTANCE;
use crate::error::Result;
use crate::input::InputTracker;
use crate::math::{clamp_speed, lerp, unit_at};
use crate::seed::{seed_threads, Viewport};
use crate::thread::{Point, Thread};

/// Simulation context: the thread set plus everything a tick reads or writes.
pub struct Simulation {
    pub config: SimConfig,
    pub viewport: Viewport,
    pub threads: Vec<Thread>,
    pub input: InputTracker,
    rng: StdRng,
    pinch: PinchState,
    ticks: u64,
}

/// Smoothed pointer speed and the spread factor derived from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchState {
    pub speed: f32,
    pub spread: f32,
    last_pointer: Option<Vec2>,
}

impl Default for PinchState {
    fn default() -> Self {
        Self {
            speed: 0.0,
            spread: 1.0,
            last_pointer: None,
        }
    }
}

impl PinchState {
    /// Feed this tick's pointer position (`None` while inactive); returns the
    /// updated spread factor.
    ///
    /// Spread is 1 when the pointer is still and falls toward `min_spread` as
    /// the smoothed speed approaches `sensitivity`.
    pub fn update(&mut self, pointer: Option<Vec2>, cfg: &PinchConfig) -> f32 {
        let sample = match (pointer, self.last_pointer) {
            (Some(now), Some(prev)) => now.distance(prev).min(cfg.sensitivity * 4.0),
            _ => 0.0,
        };
        self.last_pointer = pointer;
        self.speed = lerp(self.speed, sample, cfg.speed_smoothing);
        let target = (1.0 - self.speed / cfg.sensitivity).clamp(cfg.min_spread, 1.0);
        self.spread = lerp(self.spread, target, cfg.spread_smoothing);
        self.spread
    }
}

/// 0 until the pointer has been idle for `threshold`, then rises linearly to 1
/// over `ramp`.
pub fn idle_ramp(idle: Duration, cfg: &IdleConfig) -> f32 {
    if idle <= cfg.threshold {
        return 0.0;
    }
    let over = (idle - cfg.threshold).as_secs_f32();
    let ramp = cfg.ramp.as_secs_f32();
    if ramp <= 0.0 {
        1.0
    } else {
        (over / ramp).min(1.0)
    }
}

/// Pull adjacent points toward `rest` apart, `iterations` times.
///
/// Pairs closer than `MIN_DISTANCE` have no usable direction and are skipped.
pub fn relax_constraints(points: &mut [Point], rest: f32, iterations: usize, mode: ConstraintMode) {
    for _ in 0..iterations {
        for i in 1..points.len() {
            let a = points[i - 1].pos;
            let b = points[i].pos;
            let delta = b - a;
            let dist = delta.length();
            if !(dist > MIN_DISTANCE && dist.is_finite()) {
                continue;
            }
            match mode {
                ConstraintMode::Symmetric => {
                    let correction = delta * ((dist - rest) / dist * 0.5);
                    points[i - 1].pos += correction;
                    points[i].pos -= correction;
                }
                ConstraintMode::Anchored => {
                    points[i].pos = a + delta * (rest / dist);
                }
            }
        }
    }
}

/// Per-tick values shared by every thread.
struct TickInputs {
    goal: Vec2,
    spread: f32,
    idle_ramp: f32,
}

impl Simulation {
    pub fn new(config: SimConfig, viewport: Viewport, now: Instant) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let input = InputTracker::new(viewport.center(), now);
        let threads = seed_threads(&config, &viewport, input.goal(), &mut rng);
        log::debug!(
            "[sim] seeded threads={} viewport={}x{}",
            threads.len(),
            viewport.width,
            viewport.height
        );
        Ok(Self {
            config,
            viewport,
            threads,
            input,
            rng,
            pinch: PinchState::default(),
            ticks: 0,
        })
    }

    /// Replace the thread set for a new viewport. Pointer state is kept.
    pub fn reseed(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.input.set_fallback(viewport.center());
        self.threads = seed_threads(&self.config, &viewport, self.input.goal(), &mut self.rng);
        self.pinch = PinchState::default();
        log::debug!(
            "[sim] reseeded threads={} viewport={}x{}",
            self.threads.len(),
            viewport.width,
            viewport.height
        );
    }

    pub fn pinch(&self) -> &PinchState {
        &self.pinch
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance every thread by one tick.
    pub fn step(&mut self, now: Instant) {
        let target = self.input.current_target();
        let spread = self
            .pinch
            .update(target.active.then_some(target.pos), &self.config.pinch);
        let tick = TickInputs {
            goal: self.input.goal(),
            spread,
            idle_ramp: idle_ramp(self.input.idle_duration(now), &self.config.idle),
        };

        let Self {
            config,
            viewport,
            threads,
            rng,
            ..
        } = self;
        for thread in threads.iter_mut() {
            step_thread(thread, config, viewport, &tick, rng);
        }
        self.ticks += 1;
    }
}

fn step_thread(thread: &mut Thread, cfg: &SimConfig, viewport: &Viewport, tick: &TickInputs, rng: &mut StdRng) {
    let goal = tick.goal + thread.target_offset * (cfg.bundle_radius * tick.spread);

    step_head(&mut thread.points[0], goal, cfg, rng);
    let head = thread.points[0];
    if !head.is_finite() || !viewport.contains(head.pos, cfg.bounds_margin) {
        recover(thread, goal, cfg, viewport, rng);
    }

    step_body(&mut thread.points, cfg);
    relax_constraints(
        &mut thread.points,
        cfg.segment_length,
        cfg.constraint_iterations,
        cfg.constraint_mode,
    );

    let drift = cfg.idle.strength * tick.idle_ramp * thread.length_factor;
    if drift > 0.0 && thread.points.len() > 1 {
        let last = (thread.points.len() - 1) as f32;
        for (i, p) in thread.points.iter_mut().enumerate().skip(1) {
            p.pos += thread.drift * (drift * i as f32 / last);
        }
    }
}

fn step_head(head: &mut Point, goal: Vec2, cfg: &SimConfig, rng: &mut StdRng) {
    let mut vel = head.vel + (goal - head.pos) * cfg.follow_strength;
    if cfg.noise > 0.0 {
        vel += Vec2::new(
            rng.gen_range(-cfg.noise..=cfg.noise),
            rng.gen_range(-cfg.noise..=cfg.noise),
        );
    }
    vel = clamp_speed(vel * cfg.damping, cfg.max_speed);
    head.vel = vel;
    head.pos += vel;
}

fn step_body(points: &mut [Point], cfg: &SimConfig) {
    let Some(head) = points.first().map(|p| p.pos) else {
        return;
    };
    for i in 1..points.len() {
        let lead = points[i - 1].vel;
        let p = &mut points[i];
        let mut vel = p.vel.lerp(lead, cfg.propagation);
        if let Some(rest) = p.rest {
            vel += (head + rest - p.pos) * cfg.rest_stiffness;
        }
        vel = clamp_speed(vel * cfg.damping, cfg.max_speed);
        p.vel = vel;
        p.pos += vel;
    }
}

/// Teleport a runaway thread back next to its goal, at rest.
fn recover(thread: &mut Thread, goal: Vec2, cfg: &SimConfig, viewport: &Viewport, rng: &mut StdRng) {
    let jitter = unit_at(rng.gen_range(0.0..TAU)) * (cfg.bundle_radius * 0.25 * rng.gen::<f32>());
    let head = viewport.clamp(goal + jitter);
    let head = if head.is_finite() { head } else { viewport.center() };
    log::trace!("[sim] recovered runaway thread at ({:.1},{:.1})", head.x, head.y);
    thread.relayout(
        head,
        rng.gen_range(0.0..TAU),
        cfg.segment_length,
        cfg.rest_stiffness > 0.0,
    );
}
