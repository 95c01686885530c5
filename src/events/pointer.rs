use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use web_sys as web;

use crate::dom::{self, Listener};
use crate::frame::FrameContext;
use crate::input;

/// Pointer tracking is window-wide: the canvas sits behind page content and
/// never receives events itself.
pub fn wire_pointer(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    ctx: &Rc<RefCell<FrameContext>>,
) -> Vec<Listener> {
    let mut out = Vec::with_capacity(4);

    let (c, cv) = (ctx.clone(), canvas.clone());
    out.push(Listener::new(window, "pointermove", move |ev: web::PointerEvent| {
        let pos = input::pointer_surface_px(&ev, &cv);
        if let Ok(mut ctx) = c.try_borrow_mut() {
            ctx.driver.pointer_moved(pos, Instant::now());
        }
    }));

    let (c, cv) = (ctx.clone(), canvas.clone());
    out.push(Listener::new(window, "pointerdown", move |ev: web::PointerEvent| {
        let pos = input::pointer_surface_px(&ev, &cv);
        if let Ok(mut ctx) = c.try_borrow_mut() {
            ctx.driver.pointer_down(pos, Instant::now());
        }
    }));

    if let Some(root) = dom::window_document().and_then(|d| d.document_element()) {
        let c = ctx.clone();
        out.push(Listener::new(&root, "pointerleave", move |_: web::PointerEvent| {
            if let Ok(mut ctx) = c.try_borrow_mut() {
                ctx.driver.pointer_left();
            }
        }));
    }

    let c = ctx.clone();
    out.push(Listener::new(window, "blur", move |_: web::Event| {
        if let Ok(mut ctx) = c.try_borrow_mut() {
            ctx.driver.pointer_left();
        }
    }));

    out
}
