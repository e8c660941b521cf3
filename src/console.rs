use crate::constants::OBJECT_PLACEHOLDER;
use crate::core::LogLevel;
use anyhow::anyhow;
use js_sys::{Array, Function, Reflect};
use smallvec::SmallVec;
use wasm_bindgen::prelude::*;

// JS has no way to hand a variadic call to a Rust closure, so a tiny shim
// collects `arguments` into an array. The sink sits behind a holder that the
// returned release function clears; a stale reference to the wrapper then
// keeps forwarding to the native console without reaching Rust.
#[wasm_bindgen(inline_js = "
export function wrap_variadic(original, sink, target) {
  const holder = { sink };
  const wrapped = function (...args) {
    if (typeof original === 'function') { original.apply(target, args); }
    const s = holder.sink;
    if (s) { try { s(args); } catch (_) {} }
  };
  return [wrapped, () => { holder.sink = null; }];
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn wrap_variadic(original: &JsValue, sink: &JsValue, target: &JsValue) -> Result<Array, JsValue>;
}

pub type ArgsSink = Closure<dyn FnMut(Array)>;

/// A JS function that forwards to `original` (if any) and hands its
/// arguments to `sink` until released.
pub struct Variadic {
    pub function: Function,
    release: Function,
}

impl Variadic {
    pub fn new(original: &JsValue, sink: &ArgsSink, target: &JsValue) -> anyhow::Result<Self> {
        let pair = wrap_variadic(original, sink.as_ref(), target)
            .map_err(|e| anyhow!("wrapper shim: {:?}", e))?;
        let function = pair
            .get(0)
            .dyn_into::<Function>()
            .map_err(|e| anyhow!("wrapper is not callable: {:?}", e))?;
        let release = pair
            .get(1)
            .dyn_into::<Function>()
            .map_err(|e| anyhow!("release is not callable: {:?}", e))?;
        Ok(Self { function, release })
    }

    pub fn release(&self) {
        _ = self.release.call0(&JsValue::NULL);
    }
}

struct Wrapped {
    level: LogLevel,
    original: JsValue,
    wrapper: Variadic,
    _sink: ArgsSink,
}

/// `console.log/warn/error` replaced by forwarding wrappers.
///
/// Dropping the capture puts the original functions back.
pub struct ConsoleCapture {
    console: JsValue,
    wrapped: SmallVec<[Wrapped; 3]>,
}

impl ConsoleCapture {
    pub fn install(on_call: impl Fn(LogLevel, Array) + Clone + 'static) -> anyhow::Result<Self> {
        let console = Reflect::get(&js_sys::global(), &JsValue::from_str("console"))
            .map_err(|e| anyhow!("no console: {:?}", e))?;
        if !console.is_object() {
            return Err(anyhow!("console is not an object"));
        }
        let mut capture = Self {
            console,
            wrapped: SmallVec::new(),
        };
        for level in LogLevel::ALL {
            let key = JsValue::from_str(level.console_method());
            let original = Reflect::get(&capture.console, &key)
                .map_err(|e| anyhow!("console.{}: {:?}", level.console_method(), e))?;
            let on_call = on_call.clone();
            let sink: ArgsSink = Closure::wrap(Box::new(move |args: Array| on_call(level, args))
                as Box<dyn FnMut(Array)>);
            let wrapper = Variadic::new(&original, &sink, &capture.console)?;
            Reflect::set(&capture.console, &key, &wrapper.function)
                .map_err(|e| anyhow!("replace console.{}: {:?}", level.console_method(), e))?;
            // pushed right away so a later failure still restores this one
            capture.wrapped.push(Wrapped {
                level,
                original,
                wrapper,
                _sink: sink,
            });
        }
        Ok(capture)
    }

    pub fn restore(&mut self) {
        for w in self.wrapped.drain(..) {
            w.wrapper.release();
            let key = JsValue::from_str(w.level.console_method());
            _ = Reflect::set(&self.console, &key, &w.original);
        }
    }
}

impl Drop for ConsoleCapture {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Render one console argument as text.
///
/// Errors show their stack (or `name: message`), objects go through
/// `JSON.stringify` with a placeholder on failure, everything else is
/// coerced with `String(..)`.
pub fn stringify(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        let stack = Reflect::get(err, &JsValue::from_str("stack"))
            .ok()
            .and_then(|s| s.as_string())
            .filter(|s| !s.is_empty());
        return stack.unwrap_or_else(|| {
            format!("{}: {}", String::from(err.name()), String::from(err.message()))
        });
    }
    if value.is_object() {
        return js_sys::JSON::stringify(value)
            .ok()
            .and_then(|s| s.as_string())
            .unwrap_or_else(|| OBJECT_PLACEHOLDER.to_string());
    }
    coerce(value)
}

fn coerce(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    Reflect::get(&js_sys::global(), &JsValue::from_str("String"))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .and_then(|f| f.call1(&JsValue::UNDEFINED, value).ok())
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Stringify every argument of one call.
pub fn stringify_all(args: impl IntoIterator<Item = JsValue>) -> Vec<String> {
    args.into_iter().map(|v| stringify(&v)).collect()
}

/// `new Date().toISOString()`
#[inline]
pub fn iso_now() -> String {
    String::from(js_sys::Date::new_0().to_iso_string())
}
