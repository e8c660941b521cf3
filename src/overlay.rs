use crate::api::GlobalApi;
use crate::console::{self, ConsoleCapture};
use crate::core::{format_line, LogLevel, OverlayConfig, PanelState, Tab};
use crate::dom::{self, Listener};
use crate::events::{self, DragWiring, MarkerEvent, MarkerObserver};
use crate::frame::FrameLoop;
use crate::render::Views;
use wasm_bindgen::JsValue;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use web_sys as web;

/// The debug panel controller.
///
/// Cloning yields another handle to the same panel. Event closures only hold
/// weak references, so the panel lives as long as some handle does, and
/// [`Overlay::dispose`] releases every subscription eagerly.
#[derive(Clone)]
pub struct Overlay {
    inner: Rc<Inner>,
}

struct Inner {
    config: OverlayConfig,
    state: RefCell<PanelState>,
    views: Views,
    listeners: RefCell<Vec<Listener>>,
    markers: RefCell<Option<MarkerObserver>>,
    console: RefCell<Option<ConsoleCapture>>,
    frames: RefCell<Option<FrameLoop>>,
    api: RefCell<Option<GlobalApi>>,
    disposed: Cell<bool>,
}

/// Non-owning counterpart of [`Overlay`].
#[derive(Clone)]
pub struct WeakOverlay(Weak<Inner>);

impl WeakOverlay {
    pub fn upgrade(&self) -> Option<Overlay> {
        self.0.upgrade().map(|inner| Overlay { inner })
    }
}

impl Overlay {
    /// Build the panel in `document` and start capturing.
    ///
    /// Only a failure to build the panel itself is returned. Console capture,
    /// frame sampling and marker observation each fail on their own, and the
    /// failure is logged into the panel.
    pub fn attach(document: &web::Document, config: OverlayConfig) -> anyhow::Result<Self> {
        let views = Views::build(document)?;
        let state = PanelState::new(
            config.max_logs,
            config.log_view_limit,
            config.fps_sample_ms,
            dom::now_ms(),
        );
        let overlay = Overlay {
            inner: Rc::new(Inner {
                config,
                state: RefCell::new(state),
                views,
                listeners: RefCell::new(Vec::new()),
                markers: RefCell::new(None),
                console: RefCell::new(None),
                frames: RefCell::new(None),
                api: RefCell::new(None),
                disposed: Cell::new(false),
            }),
        };

        if let Err(e) = overlay.wire_ui() {
            overlay.report("wiring panel controls failed", &e);
        }
        if overlay.inner.config.capture_console {
            if let Err(e) = overlay.start_console_capture() {
                overlay.report("console capture failed", &e);
            }
        }
        if let Err(e) = overlay.start_fps() {
            overlay.report("fps sampling failed", &e);
        }
        if let Err(e) = overlay.start_marker_tracking() {
            overlay.report("setupMarkerTracking failed", &e);
        }
        match GlobalApi::install(&overlay.inner.config.global_name, overlay.downgrade()) {
            Ok(api) => *overlay.inner.api.borrow_mut() = Some(api),
            Err(e) => overlay.report("installing global API failed", &e),
        }

        let (open, tab) = (overlay.inner.config.start_open, overlay.inner.config.initial_tab);
        overlay.switch_tab(tab);
        if open {
            overlay.open();
        }
        if let Ok(state) = overlay.inner.state.try_borrow() {
            overlay.inner.views.render_all(&state);
        }
        log::info!("[overlay] attached");
        Ok(overlay)
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.inner
            .state
            .try_borrow()
            .map(|s| s.open)
            .unwrap_or(false)
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    pub fn toggle(&self) {
        if self.is_disposed() {
            return;
        }
        let open = match self.inner.state.try_borrow_mut() {
            Ok(mut s) => s.toggle(),
            Err(_) => return,
        };
        self.inner.views.set_open(open);
    }

    fn set_open(&self, open: bool) {
        if self.is_disposed() {
            return;
        }
        let changed = match self.inner.state.try_borrow_mut() {
            Ok(mut s) => s.set_open(open),
            Err(_) => return,
        };
        if changed {
            self.inner.views.set_open(open);
        }
    }

    /// Activate a tab and project current state into it right away.
    pub fn switch_tab(&self, tab: Tab) {
        if self.is_disposed() {
            return;
        }
        match self.inner.state.try_borrow_mut() {
            Ok(mut s) => s.switch_tab(tab),
            Err(_) => return,
        }
        self.inner.views.show_tab(tab);
        self.render(tab);
    }

    #[inline]
    pub fn active_tab(&self) -> Tab {
        self.inner
            .state
            .try_borrow()
            .map(|s| s.active_tab)
            .unwrap_or_default()
    }

    /// Append a line built from already formatted parts.
    pub fn log<S: AsRef<str>>(&self, level: LogLevel, parts: &[S]) {
        if self.is_disposed() {
            return;
        }
        let line = format_line(&console::iso_now(), parts);
        // a call made while the state is borrowed (re-entrant console use)
        // is dropped rather than allowed to panic
        let rerender = match self.inner.state.try_borrow_mut() {
            Ok(mut s) => s.push_log(level, line),
            Err(_) => return,
        };
        if rerender {
            self.render(Tab::Logs);
        }
    }

    /// Append a line built from raw JS values, as a console call would.
    pub fn log_values(&self, level: LogLevel, args: impl IntoIterator<Item = JsValue>) {
        if self.is_disposed() {
            return;
        }
        self.log(level, &console::stringify_all(args));
    }

    pub fn clear_logs(&self) {
        if let Ok(mut s) = self.inner.state.try_borrow_mut() {
            s.logs.clear();
        } else {
            return;
        }
        self.render(Tab::Logs);
    }

    pub fn fps(&self) -> u32 {
        self.inner
            .state
            .try_borrow()
            .map(|s| s.fps.fps())
            .unwrap_or(0)
    }

    pub fn log_count(&self) -> usize {
        self.inner
            .state
            .try_borrow()
            .map(|s| s.logs.len())
            .unwrap_or(0)
    }

    pub fn visible_markers(&self) -> Vec<String> {
        self.inner
            .state
            .try_borrow()
            .map(|s| s.markers.iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Restore the console, stop sampling, drop every listener and remove
    /// the panel from the page. Idempotent.
    pub fn dispose(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        self.inner.release();
        log::info!("[overlay] disposed");
    }

    /// Put the native console functions back. The panel keeps working for
    /// everything but captured console output.
    pub fn restore_console(&self) {
        if let Some(mut capture) = self.inner.console.borrow_mut().take() {
            capture.restore();
        }
    }

    #[inline]
    pub fn is_capturing(&self) -> bool {
        self.inner.console.borrow().is_some()
    }

    fn render(&self, tab: Tab) {
        if let Ok(state) = self.inner.state.try_borrow() {
            self.inner.views.render(tab, &state);
        }
    }

    fn report(&self, what: &str, err: &anyhow::Error) {
        self.log(LogLevel::Error, &[what.to_string(), format!("{:#}", err)]);
        // with capture active a log call would land in the panel a second time
        if !self.is_capturing() {
            log::error!("[overlay] {}: {:?}", what, err);
        }
    }

    /// Handle for closures that must not keep the panel alive.
    pub fn downgrade(&self) -> WeakOverlay {
        WeakOverlay(Rc::downgrade(&self.inner))
    }

    fn on_event(&self, handler: impl Fn(&Overlay) + 'static) -> impl Fn(web::Event) + 'static {
        let weak = self.downgrade();
        move |_| {
            if let Some(overlay) = weak.upgrade() {
                handler(&overlay);
            }
        }
    }

    fn wire_ui(&self) -> anyhow::Result<()> {
        let views = &self.inner.views;
        let mut listeners = Vec::new();
        listeners.push(Listener::new(
            &views.toggle,
            "click",
            self.on_event(Overlay::toggle),
        )?);
        for tab in Tab::ALL {
            listeners.push(Listener::new(
                views.tab_button(tab),
                "click",
                self.on_event(move |o| o.switch_tab(tab)),
            )?);
        }
        listeners.extend(events::wire_drag(DragWiring {
            document: views.document.clone(),
            handle: views.header.clone(),
            target: views.panel.clone(),
            margin: self.inner.config.drag_margin_px,
        })?);
        if let Some(window) = web::window() {
            // a cancelled navigation keeps the page alive, so only the
            // console goes back; the panel stays until an explicit dispose
            listeners.push(Listener::new(
                &window,
                "beforeunload",
                self.on_event(Overlay::restore_console),
            )?);
            let key = self.inner.config.toggle_key.clone();
            if !key.is_empty() {
                let weak = self.downgrade();
                listeners.push(events::wire_toggle_key(&window, key, move || {
                    if let Some(overlay) = weak.upgrade() {
                        overlay.toggle();
                    }
                })?);
            }
        }
        self.inner.listeners.borrow_mut().extend(listeners);
        Ok(())
    }

    fn start_console_capture(&self) -> anyhow::Result<()> {
        let weak = self.downgrade();
        let capture = ConsoleCapture::install(move |level, args| {
            if let Some(overlay) = weak.upgrade() {
                overlay.log_values(level, args.iter());
            }
        })?;
        *self.inner.console.borrow_mut() = Some(capture);
        Ok(())
    }

    fn start_fps(&self) -> anyhow::Result<()> {
        let weak = self.downgrade();
        let frames = FrameLoop::start(move |now| {
            let Some(overlay) = weak.upgrade() else {
                return;
            };
            let rerender = match overlay.inner.state.try_borrow_mut() {
                Ok(mut s) => s.frame(now),
                Err(_) => false,
            };
            if rerender {
                overlay.render(Tab::Stats);
            }
        })?;
        *self.inner.frames.borrow_mut() = Some(frames);
        Ok(())
    }

    fn start_marker_tracking(&self) -> anyhow::Result<()> {
        let weak = self.downgrade();
        let sink: events::MarkerSink = Rc::new(move |event: MarkerEvent| {
            if let Some(overlay) = weak.upgrade() {
                overlay.on_marker_event(event);
            }
        });
        let config = &self.inner.config;
        let observer = MarkerObserver::observe(
            &self.inner.views.document,
            &config.scene_selector,
            &config.marker_selector,
            config.observe_new_markers,
            sink,
        )?;
        if observer.is_none() {
            log::info!("[markers] no {} in page; marker tracking inactive", config.scene_selector);
        }
        *self.inner.markers.borrow_mut() = observer;
        Ok(())
    }

    fn on_marker_event(&self, event: MarkerEvent) {
        if self.is_disposed() {
            return;
        }
        match event {
            MarkerEvent::Ready => self.log(LogLevel::Info, &["arReady"]),
            MarkerEvent::Error(detail) => self.log(LogLevel::Error, &["arError", detail.as_str()]),
            MarkerEvent::Found(id) => {
                let rerender = match self.inner.state.try_borrow_mut() {
                    Ok(mut s) => s.marker_found(&id),
                    Err(_) => return,
                };
                self.log(LogLevel::Info, &["markerFound", id.as_str()]);
                if rerender {
                    self.render(Tab::Markers);
                }
            }
            MarkerEvent::Removed(id) => {
                let rerender = match self.inner.state.try_borrow_mut() {
                    Ok(mut s) => s.marker_removed(&id),
                    Err(_) => return,
                };
                // only a marker that was visible has anything to report
                let Some(rerender) = rerender else {
                    return;
                };
                self.log(LogLevel::Info, &["markerLost", id.as_str(), "(removed)"]);
                if rerender {
                    self.render(Tab::Markers);
                }
            }
            MarkerEvent::Lost(id) => {
                let rerender = match self.inner.state.try_borrow_mut() {
                    Ok(mut s) => s.marker_lost(&id),
                    Err(_) => return,
                };
                self.log(LogLevel::Info, &["markerLost", id.as_str()]);
                if rerender {
                    self.render(Tab::Markers);
                }
            }
        }
    }
}

impl Inner {
    fn release(&self) {
        // console first so nothing below is captured mid-teardown
        if let Some(mut capture) = self.console.borrow_mut().take() {
            capture.restore();
        }
        self.api.borrow_mut().take();
        self.frames.borrow_mut().take();
        self.markers.borrow_mut().take();
        self.listeners.borrow_mut().clear();
        self.views.remove();
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if !self.disposed.replace(true) {
            self.release();
        }
    }
}
