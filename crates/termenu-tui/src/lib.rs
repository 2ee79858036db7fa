//! termenu-tui - crossterm terminal port for termenu
//!
//! Connects the engine's [`TerminalPort`](termenu_engine::TerminalPort) to a
//! real terminal: key conversion, raw mode handling and the stdout-backed
//! port itself.

pub mod event;
pub mod port;
pub mod terminal;

pub use event::key_event_to_input;
pub use port::CrosstermPort;
pub use terminal::{install_panic_hook, RawModeGuard};
