mod pointer;
mod viewport;

use std::cell::RefCell;
use std::rc::Rc;

use web_sys as web;

use crate::dom::Listener;
use crate::frame::FrameContext;

/// Attach every DOM listener the animation needs. Dropping the returned
/// guards detaches them.
pub fn wire(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    ctx: &Rc<RefCell<FrameContext>>,
) -> Vec<Listener> {
    let mut listeners = pointer::wire_pointer(window, canvas, ctx);
    listeners.extend(viewport::wire_viewport(window, ctx));
    listeners
}
