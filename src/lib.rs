#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use strands_core::{CancelToken, LoopDriver};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod config;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use constants::{CANVAS_ID, FPS_ELEMENT_ID};
use frame::{FrameContext, RafScheduler, TickSlot};

struct Mounted {
    ctx: Rc<RefCell<FrameContext>>,
    slot: TickSlot,
    token: CancelToken,
    listeners: Vec<dom::Listener>,
}

impl Mounted {
    fn shutdown(&mut self) {
        self.listeners.clear();
        self.token.cancel();
        if let Ok(mut ctx) = self.ctx.try_borrow_mut() {
            ctx.driver.stop();
        }
        if let Ok(mut slot) = self.slot.try_borrow_mut() {
            slot.take();
        }
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Handle to a running background animation.
#[wasm_bindgen]
pub struct StrandsBackground {
    inner: Option<Mounted>,
}

#[wasm_bindgen]
impl StrandsBackground {
    /// Start the animation on the canvas with id `canvas_id`.
    ///
    /// Never throws: without a usable canvas the handle is inert and
    /// `running` reports `false`.
    pub fn mount(canvas_id: &str) -> StrandsBackground {
        match mount_canvas(canvas_id) {
            Ok(m) => StrandsBackground { inner: Some(m) },
            Err(e) => {
                log::error!("[strands] mount failed: {:#}", e);
                StrandsBackground { inner: None }
            }
        }
    }

    /// Stop the loop and detach every listener. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        if let Some(mut m) = self.inner.take() {
            m.shutdown();
            log::info!("[strands] unmounted");
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.inner.is_some()
    }

    /// Latest ticks-per-second reading, if a full window has elapsed.
    pub fn fps(&self) -> Option<f32> {
        let m = self.inner.as_ref()?;
        let ctx = m.ctx.try_borrow().ok()?;
        ctx.driver.fps()
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let has_canvas = dom::window_document()
        .and_then(|d| d.get_element_by_id(CANVAS_ID))
        .is_some();
    if has_canvas {
        match mount_canvas(CANVAS_ID) {
            // Page-lifetime animation; nothing will ever unmount it.
            Ok(m) => std::mem::forget(m),
            Err(e) => log::error!("[strands] auto-mount failed: {:#}", e),
        }
    }
    Ok(())
}

fn mount_canvas(canvas_id: &str) -> anyhow::Result<Mounted> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", canvas_id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let cfg = config::from_attributes(|name| canvas.get_attribute(name), rand::random());
    let scheduler = RafScheduler::new(window.clone());
    let slot = scheduler.slot();
    let driver = LoopDriver::new(cfg, scheduler)?;

    let mut surface = render::Canvas2dSurface::new(&canvas)?;
    let viewport = surface.sync_size(&window)?;
    let fps_readout = document.get_element_by_id(FPS_ELEMENT_ID);

    let ctx = Rc::new(RefCell::new(FrameContext::new(driver, surface, fps_readout)));
    let token = ctx.borrow().driver.token();
    frame::install_tick(&ctx, &slot, token.clone());
    ctx.borrow_mut().driver.start(viewport, Instant::now())?;

    let listeners = events::wire(&window, &canvas, &ctx);
    {
        let c = ctx.borrow();
        if let Some(sim) = c.driver.simulation() {
            log::info!(
                "[strands] mounted #{} {}x{} threads={}",
                canvas_id,
                viewport.width,
                viewport.height,
                sim.threads.len()
            );
        }
    }
    Ok(Mounted {
        ctx,
        slot,
        token,
        listeners,
    })
}
