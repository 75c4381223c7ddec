use crate::input;
use companion_core::Companion;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A registered DOM listener. The closure is invalidated on drop, so call
/// `detach` first.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn attach(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                kind,
                closure,
            }),
            Err(e) => {
                log::warn!("[events] could not attach {}: {:?}", kind, e);
                None
            }
        }
    }

    pub fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

pub struct InputWiring {
    pub engine: Rc<RefCell<Companion>>,
    pub canvas: web::HtmlCanvasElement,
    pub origin: Instant,
}

/// Pointer moves are watched on the window; leaving is detected on the root
/// element so the overlay canvas never has to take pointer events.
pub fn wire_input_handlers(w: &InputWiring) -> Vec<Listener> {
    let mut listeners = Vec::new();
    let window = match web::window() {
        Some(w) => w,
        None => return listeners,
    };

    {
        let engine = w.engine.clone();
        let canvas = w.canvas.clone();
        let origin = w.origin;
        let target: &web::EventTarget = window.as_ref();
        listeners.extend(Listener::attach(target, "pointermove", move |ev| {
            if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
                let pos = input::pointer_css_px(ev, &canvas);
                engine
                    .borrow_mut()
                    .pointer_move(origin.elapsed(), pos.x, pos.y);
            }
        }));
    }

    if let Some(root) = window.document().and_then(|d| d.document_element()) {
        let engine = w.engine.clone();
        let origin = w.origin;
        listeners.extend(Listener::attach(root.as_ref(), "pointerleave", move |_| {
            engine.borrow_mut().pointer_leave(origin.elapsed());
        }));
    }

    {
        let canvas = w.canvas.clone();
        listeners.extend(Listener::attach(window.as_ref(), "resize", move |_| {
            crate::dom::sync_canvas_backing_size(&canvas);
        }));
    }

    listeners
}
