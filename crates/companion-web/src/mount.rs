use crate::dom;
use crate::events::{self, InputWiring, Listener};
use crate::frame::{Pump, PumpAction};
use crate::paint::Painter;
use companion_core::constants::MAX_CATCH_UP_STEPS;
use companion_core::{compose, Companion, CompanionConfig};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A companion attached to one canvas. Owns every listener and the pump
/// interval; dropping it detaches all of them.
pub struct Mount {
    engine: Rc<RefCell<Companion>>,
    painter: Rc<Painter>,
    canvas: web::HtmlCanvasElement,
    origin: Instant,
    listeners: Vec<Listener>,
    pump_state: Rc<RefCell<Pump>>,
    interval: Option<i32>,
    pump: Option<Closure<dyn FnMut()>>,
}

impl Mount {
    pub fn new(canvas: web::HtmlCanvasElement, config: CompanionConfig) -> anyhow::Result<Self> {
        dom::sync_canvas_backing_size(&canvas);
        let painter = Rc::new(Painter::new(&canvas)?);
        let engine = Rc::new(RefCell::new(Companion::new(config)));
        let step = engine.borrow().config().physics_step;

        let mut mount = Self {
            engine,
            painter,
            canvas,
            origin: Instant::now(),
            listeners: Vec::new(),
            pump_state: Rc::new(RefCell::new(Pump::new(step, MAX_CATCH_UP_STEPS))),
            interval: None,
            pump: None,
        };
        if mount.engine.borrow().config().enabled {
            mount.attach()?;
        }
        log::info!(
            "[mount] mounted (enabled {}, step {:?})",
            mount.engine.borrow().config().enabled,
            step
        );
        Ok(mount)
    }

    /// Wire listeners and start the pump.
    fn attach(&mut self) -> anyhow::Result<()> {
        self.listeners = events::wire_input_handlers(&InputWiring {
            engine: self.engine.clone(),
            canvas: self.canvas.clone(),
            origin: self.origin,
        });
        self.pump_state.borrow_mut().reset();
        if let Err(e) = self.start_pump() {
            self.detach();
            return Err(e);
        }
        Ok(())
    }

    /// Stop the pump and remove every listener.
    fn detach(&mut self) {
        if let Some(handle) = self.interval.take() {
            if let Some(w) = web::window() {
                w.clear_interval_with_handle(handle);
            }
        }
        self.pump = None;
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
    }

    fn start_pump(&mut self) -> anyhow::Result<()> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let state = self.pump_state.clone();
        let period = state.borrow().interval_ms();

        let engine = self.engine.clone();
        let painter = self.painter.clone();
        let origin = self.origin;
        let closure = Closure::wrap(Box::new(move || {
            let now = origin.elapsed();
            let mut eng = engine.borrow_mut();
            if state.borrow_mut().tick(now) == PumpAction::SkipBacklog {
                log::debug!("[mount] skipping backlog at {:?}", now);
                eng.skip_backlog(now);
            }
            eng.advance(now);
            let scene = compose(&eng.snapshot(), eng.palette());
            drop(eng);
            if let Err(e) = painter.paint(&scene, dom::device_pixel_ratio()) {
                log::error!("[mount] paint failed: {:?}", e);
            }
        }) as Box<dyn FnMut()>);

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period,
            )
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        self.interval = Some(handle);
        self.pump = Some(closure);
        Ok(())
    }

    /// Nothing is registered with the page while disabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        let was = self.engine.borrow().config().enabled;
        self.engine
            .borrow_mut()
            .set_enabled(enabled, self.origin.elapsed());
        if was == enabled || self.engine.borrow().is_torn_down() {
            return;
        }
        if enabled {
            if let Err(e) = self.attach() {
                log::error!("[mount] could not resume: {:?}", e);
            }
        } else {
            self.detach();
            self.painter.clear();
        }
    }

    /// Idempotent.
    pub fn teardown(&mut self) {
        self.detach();
        let cancelled = self.engine.borrow_mut().teardown();
        self.painter.clear();
        if cancelled > 0 {
            log::info!("[mount] torn down, {} timers cancelled", cancelled);
        }
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.teardown();
    }
}
