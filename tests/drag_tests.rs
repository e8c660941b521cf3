// Host-side tests for header drag positioning.

use ar_debug_overlay::core::DragState;

#[test]
fn moves_by_pointer_delta() {
    let mut drag = DragState::new(4.0);
    drag.begin([100.0, 200.0], [12.0, 300.0]);
    assert_eq!(drag.position([150.0, 180.0]), Some([62.0, 280.0]));
}

#[test]
fn top_left_clamped_to_margin() {
    let mut drag = DragState::new(4.0);
    drag.begin([100.0, 100.0], [12.0, 40.0]);
    assert_eq!(drag.position([0.0, 0.0]), Some([4.0, 4.0]));
}

#[test]
fn bottom_right_not_clamped() {
    let mut drag = DragState::new(4.0);
    drag.begin([0.0, 0.0], [12.0, 40.0]);
    assert_eq!(drag.position([5000.0, 9000.0]), Some([5012.0, 9040.0]));
}

#[test]
fn inactive_drag_yields_nothing() {
    let mut drag = DragState::new(4.0);
    assert_eq!(drag.position([10.0, 10.0]), None);
    drag.begin([0.0, 0.0], [0.0, 0.0]);
    drag.end();
    assert!(!drag.active);
    assert_eq!(drag.position([10.0, 10.0]), None);
}
