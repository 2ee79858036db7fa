//! # termenu-engine - Menu Engine
//!
//! Keyboard-driven menus for plain text terminals. Depends on
//! `termenu-core` for errors, escape sequences and display metrics; does no
//! terminal I/O of its own beyond the [`TerminalPort`] trait.
//!
//! ## Public API
//!
//! ### Session
//! - [`Menu`] - builder and state machine (`start`, `handle_key`, `draw`, `run`)
//! - [`MenuHook`] - render/key/selection/exit observers with override values
//!
//! ### Items
//! - [`MenuItem`] - capability trait every item implements
//! - [`items`] - `Label`, `Button`, `Toggle`, `Choice`, `Slider`, `TextField`
//!
//! ### Building blocks
//! - [`KeyBindings`] - six semantic actions bound to physical keys
//! - [`ScrollWindow`] - visible range over the item list
//! - [`selection`] - wrap-around selection skipping unselectable items
//! - [`render`] - frame assembly through the hook chain
//! - [`LineEditor`] - in-place single-line editing
//!
//! ### Configuration
//! - [`config::Settings`] loaded from `.termenu/config.toml`
//!
//! ## Testing
//!
//! With the `test-helpers` feature, [`test_utils::ScriptedTerminal`]
//! provides an in-memory port driven by a queue of keys.

pub mod bindings;
pub mod config;
pub mod hooks;
pub mod input_key;
pub mod item;
pub mod items;
pub mod line_editor;
pub mod menu;
pub mod port;
pub mod render;
pub mod scroll;
pub mod selection;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use bindings::{Action, IgnoreContext, KeyBinding, KeyBindings};
pub use config::Settings;
pub use hooks::{ExitDecision, Intercept, KeyDecision, MenuHook};
pub use input_key::InputKey;
pub use item::{CursorIcon, IconPair, ItemContext, ItemSlot, ItemText, KeyOutcome, MenuItem, Redraw};
pub use line_editor::{
    ContentValidator, EditKey, EditOutcome, KeyValidator, LineEditState, LineEditor, Validation,
    ValidatorMode,
};
pub use menu::{Flow, Menu, Phase};
pub use port::TerminalPort;
pub use render::{FrameContext, RenderedFrame, Stage};
pub use scroll::{ScrollIndicators, ScrollSettings, ScrollWindow};
pub use selection::{Direction, SelectionChange};
