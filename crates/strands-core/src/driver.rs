//! Frame loop lifecycle: Idle → Running → Stopped.
//!
//! The driver owns the simulation context and renderer. The host supplies a
//! [`FrameScheduler`] (e.g. `requestAnimationFrame`) and calls [`LoopDriver::frame`]
//! whenever a scheduled frame fires; the driver reschedules itself until stopped.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use glam::Vec2;
use instant::Instant;

use crate::config::SimConfig;
use crate::error::{Result, StrandsError};
use crate::render::{Renderer, Surface};
use crate::seed::Viewport;
use crate::sim::Simulation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Host hook for "call me on the next display refresh".
pub trait FrameScheduler {
    type Handle;

    /// Ask for one frame callback. `None` means the host could not schedule it.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Shared flag flipped once when the loop stops; callbacks check it before
/// touching the driver.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Completed ticks per wall-clock second.
#[derive(Clone, Debug, Default)]
pub struct FpsCounter {
    window_start: Option<Instant>,
    frames: u32,
    fps: Option<f32>,
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished tick; returns a fresh reading when a window closes.
    ///
    /// The very first tick only opens the window.
    pub fn record(&mut self, now: Instant) -> Option<f32> {
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            return None;
        };
        self.frames += 1;
        if now <= start {
            return None;
        }
        let elapsed = now.duration_since(start);
        if elapsed < Self::WINDOW {
            return None;
        }
        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.fps = Some(fps);
        self.frames = 0;
        self.window_start = Some(now);
        Some(fps)
    }

    /// Last completed reading.
    pub fn fps(&self) -> Option<f32> {
        self.fps
    }
}

pub struct LoopDriver<S: FrameScheduler> {
    config: SimConfig,
    scheduler: S,
    state: LoopState,
    pending: Option<S::Handle>,
    sim: Option<Simulation>,
    renderer: Renderer,
    fps: FpsCounter,
    token: CancelToken,
}

impl<S: FrameScheduler> LoopDriver<S> {
    pub fn new(config: SimConfig, scheduler: S) -> Result<Self> {
        config.validate()?;
        let renderer = Renderer::new(config.render.clone());
        Ok(Self {
            config,
            scheduler,
            state: LoopState::Idle,
            pending: None,
            sim: None,
            renderer,
            fps: FpsCounter::new(),
            token: CancelToken::new(),
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn simulation(&self) -> Option<&Simulation> {
        self.sim.as_ref()
    }

    pub fn simulation_mut(&mut self) -> Option<&mut Simulation> {
        self.sim.as_mut()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn fps(&self) -> Option<f32> {
        self.fps.fps()
    }

    /// Seed the bundle for `viewport` and schedule the first frame.
    pub fn start(&mut self, viewport: Viewport, now: Instant) -> Result<()> {
        if self.state != LoopState::Idle {
            return Err(StrandsError::InvalidTransition {
                from: self.state,
                to: LoopState::Running,
            });
        }
        self.sim = Some(Simulation::new(self.config.clone(), viewport, now)?);
        self.state = LoopState::Running;
        log::debug!("[loop] running {}x{}", viewport.width, viewport.height);
        self.schedule();
        Ok(())
    }

    /// Run one scheduled frame: simulate, render, reschedule.
    ///
    /// Returns `false` (doing nothing) once the loop is no longer running.
    pub fn frame<Surf: Surface + ?Sized>(&mut self, now: Instant, surface: &mut Surf) -> bool {
        if self.state != LoopState::Running || self.token.is_cancelled() {
            return false;
        }
        self.pending = None;
        let Some(sim) = self.sim.as_mut() else {
            return false;
        };
        sim.step(now);
        self.renderer.draw(&sim.threads, surface);
        self.fps.record(now);
        self.schedule();
        true
    }

    /// Re-seed the bundle for a new surface size.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.state != LoopState::Running {
            return;
        }
        if let Some(sim) = self.sim.as_mut() {
            sim.reseed(viewport);
        }
    }

    pub fn pointer_moved(&mut self, pos: Vec2, now: Instant) {
        if let Some(sim) = self.running_sim() {
            sim.input.pointer_moved(pos, now);
        }
    }

    pub fn pointer_down(&mut self, pos: Vec2, now: Instant) {
        if let Some(sim) = self.running_sim() {
            sim.input.pointer_down(pos, now);
        }
    }

    pub fn pointer_left(&mut self) {
        if let Some(sim) = self.running_sim() {
            sim.input.pointer_left();
        }
    }

    /// Cancel the pending frame and refuse any further work. Idempotent.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.token.cancel();
        log::debug!("[loop] stopped from {:?}", self.state);
        self.state = LoopState::Stopped;
    }

    fn running_sim(&mut self) -> Option<&mut Simulation> {
        match self.state {
            LoopState::Running => self.sim.as_mut(),
            _ => None,
        }
    }

    fn schedule(&mut self) {
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("[loop] host refused to schedule a frame");
        }
    }
}
