pub mod keyboard;
pub mod markers;
pub mod pointer;

pub use keyboard::wire_toggle_key;
pub use markers::{MarkerEvent, MarkerObserver, MarkerSink};
pub use pointer::{wire_drag, DragWiring};
