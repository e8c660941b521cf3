pub mod config;
pub mod drag;
pub mod fps;
pub mod logs;
pub mod markers;
pub mod state;

pub use config::*;
pub use drag::*;
pub use fps::*;
pub use logs::*;
pub use markers::*;
pub use state::*;
