// Host-side tests for tuning constants and their relationships.

use ar_debug_overlay::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn log_limits_are_consistent() {
    assert!(MAX_LOGS > 0);
    assert!(LOG_VIEW_LIMIT > 0);
    // the view shows a window into the buffer, never more than it holds
    assert!(LOG_VIEW_LIMIT <= MAX_LOGS);
    assert_eq!(MAX_LOGS, 500);
    assert_eq!(LOG_VIEW_LIMIT, 300);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timing_and_margin_are_positive() {
    assert!(FPS_SAMPLE_MS > 0.0);
    assert!(DRAG_MARGIN_PX >= 0.0);
}

#[test]
fn stylesheet_covers_every_class() {
    for class in [
        CLASS_TOGGLE,
        CLASS_PANEL,
        CLASS_HEADER,
        CLASS_TABS,
        CLASS_TAB,
        CLASS_ACTIVE,
        CLASS_BODY,
        CLASS_LOGS,
        CLASS_LOG,
        CLASS_ROW,
        CLASS_STAT,
        CLASS_MARKER,
    ] {
        assert!(PANEL_CSS.contains(class), "missing CSS for {}", class);
    }
    for level in ["__info", "__warn", "__error"] {
        assert!(PANEL_CSS.contains(level), "missing CSS for {}", level);
    }
}

#[test]
fn panel_starts_hidden() {
    let panel_rule = PANEL_CSS
        .lines()
        .find(|l| l.starts_with(".__ar_dbg_panel{"))
        .expect("panel rule");
    assert!(panel_rule.contains("display:none"));
}
