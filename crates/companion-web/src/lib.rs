#![cfg(target_arch = "wasm32")]
pub mod color;
pub mod dom;
pub mod events;
pub mod frame;
pub mod input;
pub mod mount;
pub mod paint;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub const CANVAS_ID: &str = "companion-canvas";

thread_local! {
    static MOUNT: RefCell<Option<mount::Mount>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("companion-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::find_canvas(&document, CANVAS_ID)?;
    let config = dom::read_config(&canvas);
    let mount = mount::Mount::new(canvas, config)?;
    MOUNT.with(|m| m.replace(Some(mount)));
    Ok(())
}

/// Detach the companion from the page. Safe to call more than once.
#[wasm_bindgen]
pub fn unmount() {
    if let Some(mount) = MOUNT.with(|m| m.borrow_mut().take()) {
        drop(mount);
    }
}

#[wasm_bindgen]
pub fn set_enabled(enabled: bool) {
    MOUNT.with(|m| {
        if let Some(mount) = m.borrow_mut().as_mut() {
            mount.set_enabled(enabled);
        }
    });
}
