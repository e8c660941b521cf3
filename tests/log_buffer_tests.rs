// Host-side tests for the bounded log buffer and line formatting.

use ar_debug_overlay::core::*;

fn entry(i: usize) -> LogEntry {
    LogEntry::new(LogLevel::Info, format!("line {}", i))
}

#[test]
fn buffer_keeps_most_recent_entries() {
    let mut buf = LogBuffer::new(500);
    for i in 0..520 {
        buf.push(entry(i));
    }
    assert_eq!(buf.len(), 500);
    let first = buf.iter().next().unwrap();
    assert_eq!(first.text(), "line 20");
    let last = buf.iter().last().unwrap();
    assert_eq!(last.text(), "line 519");
}

#[test]
fn push_reports_evicted_entry() {
    let mut buf = LogBuffer::new(2);
    assert!(buf.push(entry(0)).is_none());
    assert!(buf.push(entry(1)).is_none());
    let evicted = buf.push(entry(2)).expect("oldest evicted");
    assert_eq!(evicted.text(), "line 0");
    assert_eq!(buf.len(), 2);
}

#[test]
fn recent_returns_newest_window_in_order() {
    let mut buf = LogBuffer::new(500);
    for i in 0..450 {
        buf.push(entry(i));
    }
    let shown: Vec<&str> = buf.recent(300).map(|e| e.text()).collect();
    assert_eq!(shown.len(), 300);
    assert_eq!(shown[0], "line 150");
    assert_eq!(shown[299], "line 449");

    // fewer entries than the window: everything
    let mut small = LogBuffer::new(500);
    small.push(entry(0));
    assert_eq!(small.recent(300).count(), 1);
}

#[test]
fn zero_capacity_is_raised_to_one() {
    let mut buf = LogBuffer::new(0);
    assert_eq!(buf.capacity(), 1);
    buf.push(entry(0));
    buf.push(entry(1));
    assert_eq!(buf.len(), 1);
    assert_eq!(buf.iter().next().unwrap().text(), "line 1");
}

#[test]
fn clear_empties_buffer() {
    let mut buf = LogBuffer::default();
    assert_eq!(buf.capacity(), 500);
    buf.push(entry(0));
    buf.clear();
    assert!(buf.is_empty());
}

#[test]
fn time_of_day_strips_date_and_zone() {
    assert_eq!(time_of_day("2024-05-01T12:34:56.789Z"), "12:34:56.789");
    assert_eq!(time_of_day("2024-05-01T00:00:00.000Z"), "00:00:00.000");
    assert_eq!(time_of_day("not-a-timestamp"), "not-a-timestamp");
}

#[test]
fn format_line_joins_parts_with_spaces() {
    let line = format_line("2024-05-01T12:34:56.789Z", &["markerFound", "m1"]);
    assert_eq!(line, "[12:34:56.789] markerFound m1");

    let no_args: [&str; 0] = [];
    assert_eq!(format_line("2024-05-01T01:02:03.004Z", &no_args), "[01:02:03.004]");

    let owned = vec!["a".to_string(), String::new(), "b".to_string()];
    assert_eq!(format_line("x T10:00:00.000Z", &owned), "[10:00:00.000] a  b");
}

#[test]
fn levels_map_to_console_methods_and_classes() {
    assert_eq!(LogLevel::Info.console_method(), "log");
    assert_eq!(LogLevel::Warn.console_method(), "warn");
    assert_eq!(LogLevel::Error.console_method(), "error");
    assert_eq!(LogLevel::Info.class_suffix(), "info");
    assert_eq!(LogLevel::Warn.class_suffix(), "warn");
    assert_eq!(LogLevel::Error.class_suffix(), "error");
}
