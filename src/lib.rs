pub mod constants;
pub mod core;

#[cfg(target_arch = "wasm32")]
mod api;
#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod overlay;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use api::DebugOverlay;
#[cfg(target_arch = "wasm32")]
pub use entry::*;

#[cfg(target_arch = "wasm32")]
mod entry {
    use crate::api::DebugOverlay;
    use crate::constants::CONFIG_GLOBAL;
    use crate::core::OverlayConfig;
    use crate::overlay::Overlay;
    use crate::{dom, render};
    use anyhow::anyhow;
    use std::cell::RefCell;
    use wasm_bindgen::prelude::*;
    use web_sys as web;

    thread_local! {
        // The one attached panel for this module instance.
        static ATTACHED: RefCell<Option<Overlay>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("ar-debug-overlay starting");

        if let Err(e) = attach_root() {
            log::error!("[overlay] attach error: {:?}", e);
        }
        Ok(())
    }

    /// Attach the panel if no panel is attached yet.
    ///
    /// Returns `undefined` when a panel already exists, including one put
    /// there by another copy of this module.
    #[wasm_bindgen]
    pub fn attach() -> Result<Option<DebugOverlay>, JsValue> {
        attach_root()
            .map(|o| o.map(DebugOverlay::new))
            .map_err(|e| JsValue::from_str(&format!("{:#}", e)))
    }

    /// Handle to the attached panel, if any.
    #[wasm_bindgen]
    pub fn current() -> Option<DebugOverlay> {
        live().map(DebugOverlay::new)
    }

    fn live() -> Option<Overlay> {
        ATTACHED.with(|a| a.borrow().clone().filter(|o| !o.is_disposed()))
    }

    fn attach_root() -> anyhow::Result<Option<Overlay>> {
        if live().is_some() {
            log::warn!("[overlay] already attached; ignoring");
            return Ok(None);
        }
        let document = dom::window_document().ok_or_else(|| anyhow!("no window/document"))?;
        if render::panel_present(&document) {
            log::warn!("[overlay] a debug panel is already in the page; ignoring");
            return Ok(None);
        }
        let (config, config_error) = match load_config() {
            Ok(config) => (config, None),
            Err(e) => (OverlayConfig::default(), Some(e)),
        };
        let overlay = Overlay::attach(&document, config)?;
        if let Some(e) = config_error {
            overlay.log(
                crate::core::LogLevel::Error,
                &[format!("{} ignored: {:#}", CONFIG_GLOBAL, e)],
            );
        }
        ATTACHED.with(|a| *a.borrow_mut() = Some(overlay.clone()));
        Ok(Some(overlay))
    }

    /// Read `window.ARDebugConfig`; absent means defaults.
    fn load_config() -> anyhow::Result<OverlayConfig> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let raw = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
            .map_err(|e| anyhow!("read {}: {:?}", CONFIG_GLOBAL, e))?;
        if raw.is_undefined() || raw.is_null() {
            return Ok(OverlayConfig::default());
        }
        let json = js_sys::JSON::stringify(&raw)
            .map_err(|e| anyhow!("stringify {}: {:?}", CONFIG_GLOBAL, e))?
            .as_string()
            .ok_or_else(|| anyhow!("{} is not serializable", CONFIG_GLOBAL))?;
        Ok(OverlayConfig::from_json(&json)?)
    }

    pub(crate) fn release(overlay: &Overlay) {
        overlay.dispose();
        ATTACHED.with(|a| {
            let mut slot = a.borrow_mut();
            if slot.as_ref().map_or(false, |o| o.is_disposed()) {
                *slot = None;
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) use entry::release as detach;
