// Browser tests for the attached panel: DOM nodes, console capture, the
// global namespace object and marker tracking.
// Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use ar_debug_overlay::{attach, current, DebugOverlay};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

fn document() -> web_sys::Document {
    window().document().unwrap()
}

fn count(selector: &str) -> u32 {
    document().query_selector_all(selector).unwrap().length()
}

fn detach_current() {
    if let Some(o) = current() {
        o.dispose();
    }
}

fn fresh() -> DebugOverlay {
    detach_current();
    attach().unwrap().expect("panel attached")
}

fn console() -> JsValue {
    Reflect::get(&js_sys::global(), &"console".into()).unwrap()
}

fn console_fn(method: &str) -> JsValue {
    Reflect::get(&console(), &method.into()).unwrap()
}

fn call_console(method: &str, args: &Array) {
    let f: Function = console_fn(method).dyn_into().unwrap();
    f.apply(&console(), args).unwrap();
}

fn global_api() -> JsValue {
    Reflect::get(&window(), &"ARDebug".into()).unwrap()
}

fn global_fn(api: &JsValue, method: &str) -> Function {
    Reflect::get(api, &method.into()).unwrap().dyn_into().unwrap()
}

// (class, text) of every line in the Logs view, oldest first
fn log_lines() -> Vec<(String, String)> {
    let nodes = document()
        .query_selector_all(".__ar_dbg_logs > div")
        .unwrap();
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|n| n.dyn_into::<web_sys::Element>().ok())
        .map(|e| (e.class_name(), e.text_content().unwrap_or_default()))
        .collect()
}

fn visible(o: &DebugOverlay) -> Vec<String> {
    o.visible_markers()
        .iter()
        .filter_map(|v| v.as_string())
        .collect()
}

fn fire(target: &web_sys::Element, event: &str) {
    let ev = web_sys::Event::new(event).unwrap();
    target.dispatch_event(&ev).unwrap();
}

// Mutation observer callbacks are queued before this microtask.
async fn settle() {
    JsFuture::from(js_sys::Promise::resolve(&JsValue::NULL))
        .await
        .unwrap();
}

#[wasm_bindgen_test]
fn attach_twice_keeps_single_panel() {
    let o = fresh();
    assert!(attach().unwrap().is_none());
    assert_eq!(count(".__ar_dbg_panel"), 1);
    assert_eq!(count(".__ar_dbg_toggle"), 1);
    assert!(current().is_some());
    o.dispose();
}

#[wasm_bindgen_test]
fn dispose_removes_panel_and_global() {
    let o = fresh();
    assert!(global_api().is_object());
    o.dispose();
    assert_eq!(count(".__ar_dbg_panel"), 0);
    assert_eq!(count(".__ar_dbg_toggle"), 0);
    assert!(global_api().is_undefined());
    assert!(current().is_none());

    // a disposed panel can be replaced
    let again = attach().unwrap().expect("attached again");
    assert_eq!(count(".__ar_dbg_panel"), 1);
    again.dispose();
}

#[wasm_bindgen_test]
fn toggle_button_opens_and_closes() {
    let o = fresh();
    assert!(!o.is_open());
    let toggle = document()
        .query_selector(".__ar_dbg_toggle")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    toggle.click();
    assert!(o.is_open());
    toggle.click();
    assert!(!o.is_open());
    o.dispose();
}

#[wasm_bindgen_test]
fn console_calls_reach_panel_until_restored() {
    detach_current();
    let native = console_fn("warn");
    let o = attach().unwrap().expect("attached");
    assert!(!Object::is(&console_fn("warn"), &native));

    let before = o.log_count();
    call_console("warn", &Array::of2(&"careful".into(), &JsValue::from_f64(3.0)));
    assert_eq!(o.log_count(), before + 1);
    let (class, text) = log_lines().pop().unwrap();
    assert!(class.contains("__warn"), "{}", class);
    assert!(text.ends_with("] careful 3"), "{}", text);

    let stale: Function = console_fn("warn").dyn_into().unwrap();
    o.dispose();
    assert!(Object::is(&console_fn("warn"), &native));

    // neither the restored function nor a cached wrapper reaches the buffer
    let after = o.log_count();
    call_console("warn", &Array::of1(&"ignored".into()));
    assert!(stale.call1(&console(), &"stale".into()).is_ok());
    assert_eq!(o.log_count(), after);
}

#[wasm_bindgen_test]
fn beforeunload_restores_console_but_keeps_panel() {
    detach_current();
    let native = console_fn("log");
    let o = attach().unwrap().expect("attached");

    let ev = web_sys::Event::new("beforeunload").unwrap();
    window().dispatch_event(&ev).unwrap();

    assert!(Object::is(&console_fn("log"), &native));
    assert_eq!(count(".__ar_dbg_panel"), 1);
    assert!(global_api().is_object());
    assert!(!o.is_open());

    let before = o.log_count();
    call_console("log", &Array::of1(&"after unload".into()));
    assert_eq!(o.log_count(), before);
    o.log(vec!["still here".into()]);
    assert_eq!(o.log_count(), before + 1);
    o.dispose();
}

#[wasm_bindgen_test]
fn global_api_logs_with_severity() {
    let o = fresh();
    let api = global_api();
    let before = o.log_count();

    let obj = Object::new();
    Reflect::set(&obj, &"k".into(), &JsValue::TRUE).unwrap();
    global_fn(&api, "log")
        .apply(&api, &Array::of2(&"a".into(), &JsValue::from_f64(1.0)))
        .unwrap();
    global_fn(&api, "warn").call1(&api, &"b".into()).unwrap();
    global_fn(&api, "error").call1(&api, &obj).unwrap();
    assert_eq!(o.log_count(), before + 3);

    let lines = log_lines();
    let tail = &lines[lines.len() - 3..];
    assert!(tail[0].0.contains("__info") && tail[0].1.ends_with("] a 1"), "{:?}", tail[0]);
    assert!(tail[1].0.contains("__warn") && tail[1].1.ends_with("] b"), "{:?}", tail[1]);
    assert!(
        tail[2].0.contains("__error") && tail[2].1.ends_with(r#"] {"k":true}"#),
        "{:?}",
        tail[2]
    );

    global_fn(&api, "open").call0(&api).unwrap();
    assert!(o.is_open());
    global_fn(&api, "close").call0(&api).unwrap();
    assert!(!o.is_open());
    o.dispose();
}

#[wasm_bindgen_test]
fn handle_logs_take_argument_lists() {
    let o = fresh();
    o.error(vec!["failed".into(), JsValue::from_f64(404.0), JsValue::NULL]);
    let (class, text) = log_lines().pop().unwrap();
    assert!(class.contains("__error"), "{}", class);
    assert!(text.ends_with("] failed 404 null"), "{}", text);
    o.dispose();
}

#[wasm_bindgen_test]
fn cached_global_is_harmless_after_dispose() {
    let o = fresh();
    let api = global_api();
    let open = global_fn(&api, "open");
    let log = global_fn(&api, "log");
    let count_before = o.log_count();
    o.dispose();

    assert!(open.call0(&api).is_ok());
    assert!(log.call1(&api, &"late".into()).is_ok());
    assert!(!o.is_open());
    assert_eq!(o.log_count(), count_before);
}

#[wasm_bindgen_test]
fn logs_view_shows_newest_300() {
    let o = fresh();
    o.clear_logs();
    for i in 0..350 {
        o.log(vec![JsValue::from_f64(i as f64)]);
    }
    assert_eq!(o.log_count(), 350);
    let lines = log_lines();
    assert_eq!(lines.len(), 300);
    assert!(lines[0].1.ends_with("] 50"), "{}", lines[0].1);
    assert!(lines[299].1.ends_with("] 349"), "{}", lines[299].1);

    for i in 350..520 {
        o.log(vec![JsValue::from_f64(i as f64)]);
    }
    assert_eq!(o.log_count(), 500);
    assert_eq!(log_lines().len(), 300);
    o.dispose();
}

#[wasm_bindgen_test]
async fn removed_marker_leaves_visible_set() {
    detach_current();
    let doc = document();
    let scene = doc.create_element("a-scene").unwrap();
    let marker = doc.create_element("a-marker").unwrap();
    marker.set_attribute("id", "m1").unwrap();
    scene.append_child(&marker).unwrap();
    doc.body().unwrap().append_child(&scene).unwrap();

    let o = attach().unwrap().expect("attached");
    o.switch_tab("markers").unwrap();
    fire(&marker, "markerFound");
    assert_eq!(visible(&o), vec!["m1"]);
    assert_eq!(count(".__ar_dbg_marker"), 1);

    marker.remove();
    settle().await;
    assert!(visible(&o).is_empty());
    assert_eq!(count(".__ar_dbg_marker"), 0);

    // the detached element is no longer observed
    fire(&marker, "markerFound");
    assert!(visible(&o).is_empty());

    // markers inserted later are picked up
    let late = doc.create_element("a-marker").unwrap();
    late.set_attribute("type", "barcode").unwrap();
    late.set_attribute("value", "7").unwrap();
    scene.append_child(&late).unwrap();
    settle().await;
    fire(&late, "markerFound");
    assert_eq!(visible(&o), vec!["barcode:7"]);
    fire(&late, "markerLost");
    assert!(visible(&o).is_empty());

    o.dispose();
    scene.remove();
}
