use std::cell::RefCell;
use std::rc::Rc;

use web_sys as web;

use crate::dom::Listener;
use crate::frame::FrameContext;

/// Window resizes re-sync the backing store and re-seed the bundle.
pub fn wire_viewport(window: &web::Window, ctx: &Rc<RefCell<FrameContext>>) -> Vec<Listener> {
    let (c, w) = (ctx.clone(), window.clone());
    vec![Listener::new(window, "resize", move |_: web::Event| {
        let Ok(mut ctx) = c.try_borrow_mut() else {
            return;
        };
        match ctx.surface.sync_size(&w) {
            Ok(viewport) => ctx.driver.resize(viewport),
            Err(e) => log::warn!("[resize] {:?}", e),
        }
    })]
}
