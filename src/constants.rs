//! Panel tuning constants and DOM vocabulary.
//!
//! Defaults for `OverlayConfig` live here so that magic numbers stay out of
//! the code and the host-side tests can check their relationships.

// Log buffer capacity; oldest entries are evicted past this
pub const MAX_LOGS: usize = 500;
// Entries projected into the Logs view
pub const LOG_VIEW_LIMIT: usize = 300;

// FPS sample window (milliseconds of frame time)
pub const FPS_SAMPLE_MS: f64 = 1000.0;

// Minimum top/left distance from the viewport edge while dragging
pub const DRAG_MARGIN_PX: f64 = 4.0;

// Host scene vocabulary (A-Frame + AR.js)
pub const SCENE_SELECTOR: &str = "a-scene";
pub const MARKER_SELECTOR: &str = "a-marker";
pub const EVENT_AR_READY: &str = "arReady";
pub const EVENT_AR_ERROR: &str = "arError";
pub const EVENT_MARKER_FOUND: &str = "markerFound";
pub const EVENT_MARKER_LOST: &str = "markerLost";

// Global namespace object and config lookup on `window`
pub const GLOBAL_NAME: &str = "ARDebug";
pub const CONFIG_GLOBAL: &str = "ARDebugConfig";

// Visible text
pub const TOGGLE_LABEL: &str = "Debug";
pub const PANEL_TITLE: &str = "Debug Panel";
pub const NO_MARKERS_TEXT: &str = "No markers visible";
pub const FPS_LABEL: &str = "FPS";
pub const OBJECT_PLACEHOLDER: &str = "[Object]";

// Class names
pub const CLASS_TOGGLE: &str = "__ar_dbg_toggle";
pub const CLASS_PANEL: &str = "__ar_dbg_panel";
pub const CLASS_HEADER: &str = "__ar_dbg_header";
pub const CLASS_TABS: &str = "__ar_dbg_tabs";
pub const CLASS_TAB: &str = "__ar_dbg_tab";
pub const CLASS_ACTIVE: &str = "__active";
pub const CLASS_BODY: &str = "__ar_dbg_body";
pub const CLASS_LOGS: &str = "__ar_dbg_logs";
pub const CLASS_LOG: &str = "__ar_dbg_log";
pub const CLASS_ROW: &str = "__ar_dbg_row";
pub const CLASS_STAT: &str = "__ar_dbg_stat";
pub const CLASS_MARKER: &str = "__ar_dbg_marker";

pub const PANEL_CSS: &str = "
.__ar_dbg_toggle{position:fixed;left:12px;bottom:12px;z-index:2147483000;background:#111;color:#fff;border:1px solid #333;border-radius:6px;padding:8px 10px;font:12px/1.2 system-ui,Segoe UI,Roboto,Helvetica,Arial;cursor:pointer;opacity:.8}.__ar_dbg_toggle:hover{opacity:1}
.__ar_dbg_panel{position:fixed;left:12px;bottom:48px;width:340px;max-height:55vh;z-index:2147483000;background:#0b0b0c;color:#f2f2f2;border:1px solid #333;border-radius:8px;box-shadow:0 6px 24px rgba(0,0,0,.35);display:none;overflow:hidden;font:12px/1.3 system-ui,Segoe UI,Roboto,Helvetica,Arial}
.__ar_dbg_header{display:flex;align-items:center;justify-content:space-between;background:#141416;border-bottom:1px solid #2a2a2e;padding:6px 8px;cursor:move;touch-action:none}
.__ar_dbg_tabs{display:flex;gap:6px}
.__ar_dbg_tab{padding:4px 8px;border:1px solid #2a2a2e;border-radius:5px;background:#1a1b1e;color:#d9d9dc;cursor:pointer}.__ar_dbg_tab.__active{background:#2a2b30;color:#fff;border-color:#3a3b40}
.__ar_dbg_body{background:#0f1012;padding:8px;overflow:auto;max-height:calc(55vh - 38px)}
.__ar_dbg_logs{white-space:pre-wrap;font-family:ui-monospace,SFMono-Regular,Consolas,Menlo,monospace;font-size:11px}
.__ar_dbg_log.__info{color:#cfe3ff}
.__ar_dbg_log.__warn{color:#ffe08a}
.__ar_dbg_log.__error{color:#ffb0b0}
.__ar_dbg_row{display:flex;align-items:center;justify-content:space-between;gap:8px}
.__ar_dbg_stat{font-family:ui-monospace,SFMono-Regular,Consolas,Menlo,monospace}
.__ar_dbg_marker{display:inline-block;margin:2px 6px 2px 0;padding:2px 6px;border-radius:4px;background:#1e2127;border:1px solid #343840}
";
