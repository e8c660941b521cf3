use crate::console;
use crate::constants::{EVENT_AR_ERROR, EVENT_AR_READY, EVENT_MARKER_FOUND, EVENT_MARKER_LOST};
use crate::core::marker_identity;
use crate::dom::Listener;
use anyhow::anyhow;
use js_sys::{Array, Reflect};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// What the scene tells the overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkerEvent {
    Ready,
    Error(String),
    Found(String),
    Lost(String),
    /// A wired marker left the scene; it is no longer observed.
    Removed(String),
}

pub type MarkerSink = Rc<dyn Fn(MarkerEvent)>;

/// Identity of a marker element, read from its `id`/`type`/`value` attributes.
pub fn element_identity(el: &web::Element) -> String {
    let id = el.get_attribute("id");
    let kind = el.get_attribute("type");
    let value = el.get_attribute("value");
    marker_identity(id.as_deref(), kind.as_deref(), value.as_deref())
}

struct WiredMarker {
    element: web::Element,
    id: String,
    _listeners: SmallVec<[Listener; 2]>,
}

type Wired = Rc<RefCell<Vec<WiredMarker>>>;

struct Insertions {
    observer: web::MutationObserver,
    _callback: Closure<dyn FnMut(Array, web::MutationObserver)>,
}

/// Scene and marker subscriptions. Dropping it removes every listener and
/// disconnects the insertion observer.
pub struct MarkerObserver {
    _scene_listeners: SmallVec<[Listener; 2]>,
    markers: Wired,
    insertions: Option<Insertions>,
}

impl MarkerObserver {
    /// Returns `Ok(None)` when the page has no scene root.
    pub fn observe(
        document: &web::Document,
        scene_selector: &str,
        marker_selector: &str,
        watch_insertions: bool,
        sink: MarkerSink,
    ) -> anyhow::Result<Option<Self>> {
        let scene = match document
            .query_selector(scene_selector)
            .map_err(|e| anyhow!("bad scene selector '{}': {:?}", scene_selector, e))?
        {
            Some(scene) => scene,
            None => return Ok(None),
        };

        let mut scene_listeners: SmallVec<[Listener; 2]> = SmallVec::new();
        let on_ready = sink.clone();
        scene_listeners.push(Listener::new(&scene, EVENT_AR_READY, move |_| {
            on_ready(MarkerEvent::Ready)
        })?);
        let on_error = sink.clone();
        scene_listeners.push(Listener::new(&scene, EVENT_AR_ERROR, move |ev| {
            on_error(MarkerEvent::Error(describe_error(&ev)))
        })?);

        let markers: Wired = Rc::new(RefCell::new(Vec::new()));
        let found = scene
            .query_selector_all(marker_selector)
            .map_err(|e| anyhow!("bad marker selector '{}': {:?}", marker_selector, e))?;
        for i in 0..found.length() {
            if let Some(el) = found.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                wire_marker(&markers, &el, &sink)?;
            }
        }
        log::info!(
            "[markers] observing {} marker(s) under {}",
            markers.borrow().len(),
            scene_selector
        );

        let insertions = if watch_insertions {
            Some(watch(&scene, marker_selector, &markers, &sink)?)
        } else {
            None
        };

        Ok(Some(Self {
            _scene_listeners: scene_listeners,
            markers,
            insertions,
        }))
    }
}

impl Drop for MarkerObserver {
    fn drop(&mut self) {
        if let Some(ins) = self.insertions.take() {
            ins.observer.disconnect();
        }
        self.markers.borrow_mut().clear();
    }
}

fn wire_marker(markers: &Wired, el: &web::Element, sink: &MarkerSink) -> anyhow::Result<()> {
    if markers
        .borrow()
        .iter()
        .any(|m| js_sys::Object::is(m.element.as_ref(), el.as_ref()))
    {
        return Ok(());
    }
    // identity is fixed when wired, like the marker's listeners
    let id = element_identity(el);
    let mut listeners: SmallVec<[Listener; 2]> = SmallVec::new();
    let (found_id, on_found) = (id.clone(), sink.clone());
    listeners.push(Listener::new(el, EVENT_MARKER_FOUND, move |_| {
        on_found(MarkerEvent::Found(found_id.clone()))
    })?);
    let (lost_id, on_lost) = (id.clone(), sink.clone());
    listeners.push(Listener::new(el, EVENT_MARKER_LOST, move |_| {
        on_lost(MarkerEvent::Lost(lost_id.clone()))
    })?);
    markers.borrow_mut().push(WiredMarker {
        element: el.clone(),
        id,
        _listeners: listeners,
    });
    Ok(())
}

fn watch(
    scene: &web::Element,
    marker_selector: &str,
    markers: &Wired,
    sink: &MarkerSink,
) -> anyhow::Result<Insertions> {
    let selector = marker_selector.to_string();
    let root = scene.clone();
    let markers = markers.clone();
    let sink = sink.clone();
    let callback = Closure::wrap(Box::new(move |records: Array, _: web::MutationObserver| {
        for record in records.iter() {
            let Ok(record) = record.dyn_into::<web::MutationRecord>() else {
                continue;
            };
            let removed = record.removed_nodes();
            for i in 0..removed.length() {
                if let Some(node) = removed.item(i) {
                    unwire_removed(&root, &markers, &node, &sink);
                }
            }
            let added = record.added_nodes();
            for i in 0..added.length() {
                let Some(el) = added.item(i).and_then(|n| n.dyn_into::<web::Element>().ok())
                else {
                    continue;
                };
                if let Err(e) = wire_inserted(&markers, &el, &selector, &sink) {
                    log::warn!("[markers] could not wire inserted marker: {:?}", e);
                }
            }
        }
    }) as Box<dyn FnMut(Array, web::MutationObserver)>);

    let observer = web::MutationObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|e| anyhow!("MutationObserver: {:?}", e))?;
    let init = web::MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    observer
        .observe_with_options(scene, &init)
        .map_err(|e| anyhow!("observe scene: {:?}", e))?;
    Ok(Insertions {
        observer,
        _callback: callback,
    })
}

fn wire_inserted(
    markers: &Wired,
    el: &web::Element,
    selector: &str,
    sink: &MarkerSink,
) -> anyhow::Result<()> {
    if el.matches(selector).unwrap_or(false) {
        wire_marker(markers, el, sink)?;
        log::info!("[markers] now observing {}", element_identity(el));
    }
    let nested = el
        .query_selector_all(selector)
        .map_err(|e| anyhow!("query markers: {:?}", e))?;
    for i in 0..nested.length() {
        if let Some(m) = nested.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
            wire_marker(markers, &m, sink)?;
        }
    }
    Ok(())
}

// Drop every wired marker that is `node` or sits inside it. Listeners
// unsubscribe as the entries drop. A marker re-inserted later is wired again.
fn unwire_removed(scene: &web::Element, markers: &Wired, node: &web::Node, sink: &MarkerSink) {
    let gone: Vec<WiredMarker> = {
        let mut wired = markers.borrow_mut();
        let (gone, kept) = wired
            .drain(..)
            .partition(|m| {
                let el: &web::Node = &m.element;
                node.contains(Some(el))
            });
        *wired = kept;
        gone
    };
    for marker in gone {
        // an element moved within the scene is still under it
        let el: &web::Node = &marker.element;
        if scene.contains(Some(el)) {
            markers.borrow_mut().push(marker);
            continue;
        }
        log::info!("[markers] no longer observing {}", marker.id);
        sink(MarkerEvent::Removed(marker.id.clone()));
    }
}

// `detail`, then `message`, then the event itself, whichever is truthy first.
fn describe_error(ev: &web::Event) -> String {
    let field = |name: &str| Reflect::get(ev, &JsValue::from_str(name)).ok();
    let value = field("detail")
        .filter(|v| v.is_truthy())
        .or_else(|| field("message").filter(|v| v.is_truthy()))
        .unwrap_or_else(|| ev.clone().into());
    console::stringify(&value)
}
