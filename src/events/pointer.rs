use crate::core::DragState;
use crate::dom::{self, Listener};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct DragWiring {
    pub document: web::Document,
    pub handle: web::HtmlElement,
    pub target: web::HtmlElement,
    pub margin: f64,
}

/// Press on the handle, move/release anywhere on the document.
///
/// The move and release listeners stay registered for the lifetime of the
/// returned handles and ignore events while no drag is active.
pub fn wire_drag(w: DragWiring) -> anyhow::Result<SmallVec<[Listener; 3]>> {
    let drag = Rc::new(RefCell::new(DragState::new(w.margin)));
    let mut listeners = SmallVec::new();
    listeners.push(wire_pointerdown(&w, &drag)?);
    listeners.push(wire_pointermove(&w, &drag)?);
    listeners.push(wire_pointerup(&w, &drag)?);
    Ok(listeners)
}

fn wire_pointerdown(w: &DragWiring, drag: &Rc<RefCell<DragState>>) -> anyhow::Result<Listener> {
    let w = w.clone();
    let drag = drag.clone();
    let handle = w.handle.clone();
    Listener::new(&handle, "pointerdown", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        if ev.button() != 0 {
            return;
        }
        let rect = w.target.get_bounding_client_rect();
        drag.borrow_mut().begin(
            [ev.client_x() as f64, ev.client_y() as f64],
            [rect.left(), rect.top()],
        );
    })
}

fn wire_pointermove(w: &DragWiring, drag: &Rc<RefCell<DragState>>) -> anyhow::Result<Listener> {
    let w = w.clone();
    let drag = drag.clone();
    let document = w.document.clone();
    Listener::new(&document, "pointermove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let pos = drag
            .borrow()
            .position([ev.client_x() as f64, ev.client_y() as f64]);
        if let Some([left, top]) = pos {
            dom::set_style(&w.target, "left", &format!("{}px", left));
            dom::set_style(&w.target, "bottom", "auto");
            dom::set_style(&w.target, "top", &format!("{}px", top));
            ev.prevent_default();
        }
    })
}

fn wire_pointerup(w: &DragWiring, drag: &Rc<RefCell<DragState>>) -> anyhow::Result<Listener> {
    let drag = drag.clone();
    Listener::new(&w.document, "pointerup", move |_| {
        drag.borrow_mut().end();
    })
}
