use anyhow::anyhow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Owning handle for a requestAnimationFrame chain.
///
/// Every tick schedules the next one. Dropping the handle cancels the pending
/// request and frees the callback.
pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Tick,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: Tick = Rc::new(RefCell::new(None));

        let tick_clone = tick.clone();
        let raf_id_tick = raf_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            raf_id_tick.set(None);
            on_frame(now);
            if let Some(w) = web::window() {
                if let Some(cb) = tick_clone.borrow().as_ref() {
                    if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        raf_id_tick.set(Some(id));
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let frames = Self { raf_id, tick };
        let first = frames
            .tick
            .borrow()
            .as_ref()
            .map(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()));
        match first {
            Some(Ok(id)) => frames.raf_id.set(Some(id)),
            Some(Err(e)) => return Err(anyhow!("requestAnimationFrame: {:?}", e)),
            None => return Err(anyhow!("frame callback missing")),
        }
        Ok(frames)
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // breaks the closure -> tick -> closure cycle
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
