use crate::console::{ArgsSink, Variadic};
use crate::core::{LogLevel, Tab};
use crate::overlay::{Overlay, WeakOverlay};
use anyhow::anyhow;
use js_sys::{Array, Object, Reflect};
use smallvec::SmallVec;
use wasm_bindgen::prelude::*;

/// `window[<globalName>]`: `open`, `close`, `log`, `warn` and `error` for
/// host pages that talk to the panel from plain script.
///
/// Dropping it releases the functions and removes the property, unless a
/// host script has put something else there in the meantime. Released
/// functions stay callable and do nothing.
pub struct GlobalApi {
    name: String,
    object: Object,
    functions: SmallVec<[(Variadic, ArgsSink); 5]>,
}

type Action = Box<dyn Fn(&Overlay, Array)>;

impl GlobalApi {
    pub fn install(name: &str, overlay: WeakOverlay) -> anyhow::Result<Self> {
        let object = Object::new();
        let set = |key: &str, value: &JsValue| {
            Reflect::set(&object, &JsValue::from_str(key), value)
                .map(|_| ())
                .map_err(|e| anyhow!("set {}.{}: {:?}", name, key, e))
        };

        let actions: [(&str, Action); 5] = [
            ("open", Box::new(|o: &Overlay, _: Array| o.open())),
            ("close", Box::new(|o: &Overlay, _: Array| o.close())),
            ("log", Box::new(|o: &Overlay, args: Array| {
                o.log_values(LogLevel::Info, args.iter())
            })),
            ("warn", Box::new(|o: &Overlay, args: Array| {
                o.log_values(LogLevel::Warn, args.iter())
            })),
            ("error", Box::new(|o: &Overlay, args: Array| {
                o.log_values(LogLevel::Error, args.iter())
            })),
        ];
        let mut functions: SmallVec<[(Variadic, ArgsSink); 5]> = SmallVec::new();
        for (key, action) in actions {
            let target = overlay.clone();
            let sink: ArgsSink = Closure::wrap(Box::new(move |args: Array| {
                if let Some(o) = target.upgrade() {
                    action(&o, args);
                }
            }) as Box<dyn FnMut(Array)>);
            // no native function behind these; they only reach the panel
            let function = Variadic::new(&JsValue::UNDEFINED, &sink, &JsValue::UNDEFINED)?;
            set(key, &function.function)?;
            functions.push((function, sink));
        }

        let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
        Reflect::set(&window, &JsValue::from_str(name), &object)
            .map_err(|e| anyhow!("set window.{}: {:?}", name, e))?;

        Ok(Self {
            name: name.to_string(),
            object,
            functions,
        })
    }
}

impl Drop for GlobalApi {
    fn drop(&mut self) {
        for (function, _) in &self.functions {
            function.release();
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let key = JsValue::from_str(&self.name);
        let ours = Reflect::get(&window, &key)
            .map(|current| Object::is(&current, &self.object))
            .unwrap_or(false);
        if ours {
            _ = Reflect::delete_property(&window, &key);
        }
    }
}

/// Handle returned to JS by `attach()` / `current()`.
#[wasm_bindgen]
pub struct DebugOverlay {
    overlay: Overlay,
}

impl DebugOverlay {
    pub(crate) fn new(overlay: Overlay) -> Self {
        Self { overlay }
    }
}

#[wasm_bindgen]
impl DebugOverlay {
    /// Show the panel; no-op when already open.
    pub fn open(&self) {
        self.overlay.open();
    }

    /// Hide the panel; no-op when already closed.
    pub fn close(&self) {
        self.overlay.close();
    }

    pub fn toggle(&self) {
        self.overlay.toggle();
    }

    /// Append an info line, independent of the console capture. `args` are
    /// the arguments of one call, stringified like console arguments.
    pub fn log(&self, args: Vec<JsValue>) {
        self.overlay.log_values(LogLevel::Info, args);
    }

    pub fn warn(&self, args: Vec<JsValue>) {
        self.overlay.log_values(LogLevel::Warn, args);
    }

    pub fn error(&self, args: Vec<JsValue>) {
        self.overlay.log_values(LogLevel::Error, args);
    }

    /// Switch to `logs`, `stats` or `markers`.
    #[wasm_bindgen(js_name = switchTab)]
    pub fn switch_tab(&self, name: &str) -> Result<(), JsValue> {
        let tab: Tab = name
            .parse()
            .map_err(|e: crate::core::UnknownTab| JsValue::from_str(&e.to_string()))?;
        self.overlay.switch_tab(tab);
        Ok(())
    }

    #[wasm_bindgen(js_name = clearLogs)]
    pub fn clear_logs(&self) {
        self.overlay.clear_logs();
    }

    #[wasm_bindgen(getter, js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    #[wasm_bindgen(getter, js_name = activeTab)]
    pub fn active_tab(&self) -> String {
        self.overlay.active_tab().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn fps(&self) -> u32 {
        self.overlay.fps()
    }

    #[wasm_bindgen(getter, js_name = logCount)]
    pub fn log_count(&self) -> usize {
        self.overlay.log_count()
    }

    #[wasm_bindgen(getter, js_name = visibleMarkers)]
    pub fn visible_markers(&self) -> Array {
        self.overlay
            .visible_markers()
            .into_iter()
            .map(|id| JsValue::from_str(&id))
            .collect()
    }

    /// Tear the panel down and allow a later `attach()`.
    pub fn dispose(&self) {
        crate::detach(&self.overlay);
    }
}
