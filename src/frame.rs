use std::cell::RefCell;
use std::rc::{Rc, Weak};

use instant::Instant;
use strands_core::{CancelToken, FrameScheduler, LoopDriver};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::overlay;
use crate::render::Canvas2dSurface;

pub type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` behind the core scheduler hook.
///
/// Every request re-arms the same tick closure stored in `slot`.
pub struct RafScheduler {
    window: web::Window,
    slot: TickSlot,
}

impl RafScheduler {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            slot: Rc::new(RefCell::new(None)),
        }
    }

    pub fn slot(&self) -> TickSlot {
        self.slot.clone()
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let slot = self.slot.try_borrow().ok()?;
        let tick = slot.as_ref()?;
        match self.window.request_animation_frame(tick.as_ref().unchecked_ref()) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("[raf] request failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        _ = self.window.cancel_animation_frame(handle);
    }
}

pub struct FrameContext {
    pub driver: LoopDriver<RafScheduler>,
    pub surface: Canvas2dSurface,
    pub fps_readout: Option<web::Element>,
    shown_fps: Option<f32>,
}

impl FrameContext {
    pub fn new(
        driver: LoopDriver<RafScheduler>,
        surface: Canvas2dSurface,
        fps_readout: Option<web::Element>,
    ) -> Self {
        Self {
            driver,
            surface,
            fps_readout,
            shown_fps: None,
        }
    }

    pub fn frame(&mut self) {
        if !self.driver.frame(Instant::now(), &mut self.surface) {
            return;
        }
        if let Some(el) = &self.fps_readout {
            let fps = self.driver.fps();
            if overlay::fps_changed(self.shown_fps, fps) {
                overlay::update_fps(el, fps);
                self.shown_fps = fps;
            }
        }
    }
}

/// Store the per-frame callback in the scheduler's slot.
///
/// The closure only holds a weak handle to the context, and bails out once
/// `token` is cancelled so a frame already queued by the browser is a no-op.
pub fn install_tick(ctx: &Rc<RefCell<FrameContext>>, slot: &TickSlot, token: CancelToken) {
    let weak: Weak<RefCell<FrameContext>> = Rc::downgrade(ctx);
    let tick = Closure::wrap(Box::new(move |_ts: f64| {
        if token.is_cancelled() {
            return;
        }
        let Some(ctx) = weak.upgrade() else {
            return;
        };
        // Re-entrancy from a nested event handler; skip this frame.
        let Ok(mut ctx) = ctx.try_borrow_mut() else {
            return;
        };
        ctx.frame();
    }) as Box<dyn FnMut(f64)>);
    *slot.borrow_mut() = Some(tick);
}
