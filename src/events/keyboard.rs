use crate::core::is_toggle_key;
use crate::dom::Listener;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keystrokes aimed at text inputs never toggle the panel.
fn is_typing_target(ev: &web::KeyboardEvent) -> bool {
    let Some(el) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
        return false;
    };
    let tag = el.tag_name();
    tag.eq_ignore_ascii_case("input")
        || tag.eq_ignore_ascii_case("textarea")
        || tag.eq_ignore_ascii_case("select")
        || el
            .dyn_ref::<web::HtmlElement>()
            .map(|h| h.is_content_editable())
            .unwrap_or(false)
}

// Wire a configurable key to toggle the panel
pub fn wire_toggle_key(
    window: &web::Window,
    key: String,
    on_toggle: impl Fn() + 'static,
) -> anyhow::Result<Listener> {
    Listener::new(window, "keydown", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() || is_typing_target(ev) {
            return;
        }
        if is_toggle_key(&ev.key(), &key) {
            on_toggle();
            ev.prevent_default();
        }
    })
}
