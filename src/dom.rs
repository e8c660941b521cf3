use anyhow::anyhow;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// `performance.now()` in milliseconds, or 0 when unavailable.
#[inline]
pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Create an element with an optional class and text content.
pub fn el(
    document: &web::Document,
    tag: &str,
    class: Option<&str>,
    text: Option<&str>,
) -> anyhow::Result<web::HtmlElement> {
    let node = document
        .create_element(tag)
        .map_err(|e| anyhow!("create <{}>: {:?}", tag, e))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow!("<{}> is not an HtmlElement: {:?}", tag, e))?;
    if let Some(class) = class {
        node.set_class_name(class);
    }
    if let Some(text) = text {
        node.set_text_content(Some(text));
    }
    Ok(node)
}

#[inline]
pub fn set_style(node: &web::HtmlElement, property: &str, value: &str) {
    _ = node.style().set_property(property, value);
}

#[inline]
pub fn set_visible(node: &web::HtmlElement, visible: bool) {
    set_style(node, "display", if visible { "block" } else { "none" });
}

#[inline]
pub fn clear_children(node: &web::Element) {
    node.set_inner_html("");
}

#[inline]
pub fn detach(node: &web::Element) {
    node.remove();
}

/// Event subscription that removes itself from its target when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow!("addEventListener({}): {:?}", event, e))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
