//! Hook system for observing and overriding a menu session.
//!
//! A `MenuHook` registered on a [`crate::Menu`] receives callbacks around
//! rendering, key handling, selection changes and exit. Every callback has a
//! default no-op implementation, so a hook only overrides what it cares
//! about.
//!
//! # Ordering
//!
//! Hooks run in registration order. A hook that returns an override value
//! (a replaced frame, a consumed key, a cancelled exit) stops the hooks
//! registered after it from seeing that event.

use std::fmt;

use crate::bindings::Action;
use crate::input_key::InputKey;
use crate::item::Redraw;
use crate::render::{FrameContext, RenderedFrame, Stage};
use crate::selection::SelectionChange;

/// What a hook does with one render stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intercept {
    /// Keep the stage text as it is
    Continue,
    /// Substitute this stage's text
    ReplaceText(String),
    /// Substitute the whole frame and skip the remaining stages
    ReplaceFrame(String),
}

/// What a hook does with a key before the menu resolves it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDecision {
    /// Let the menu handle the key
    Continue,
    /// The hook handled the key; the menu skips it
    Consumed(Redraw),
}

/// What a hook does with a pending exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    Proceed,
    /// Stay in the menu, optionally forcing a redraw
    Cancel(Redraw),
}

/// Observer and override points of a menu session.
pub trait MenuHook<T>: fmt::Debug {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Called once per render stage with the stage's current text.
    ///
    /// Title, clear and indicator stages are offered even when their text
    /// is empty.
    fn on_render(&mut self, _stage: Stage, _text: &str, _frame: &FrameContext<'_>) -> Intercept {
        Intercept::Continue
    }

    /// Called after the frame has been written to the terminal
    fn after_render(&mut self, _frame: &RenderedFrame) {}

    /// Called with every key before binding resolution
    fn before_key(&mut self, _key: &InputKey, _selected: usize) -> KeyDecision {
        KeyDecision::Continue
    }

    /// Called after the menu handled a key it did not exit on
    fn after_key(&mut self, _key: &InputKey, _action: Option<Action>, _selected: usize) {}

    /// Called when Up/Down moved the selection; may override the redraw
    fn selection_changed(&mut self, _change: &mut SelectionChange) {}

    /// Called before the session ends, with the item result or `None` when
    /// escaping
    fn before_exit(&mut self, _result: Option<&T>) -> ExitDecision {
        ExitDecision::Proceed
    }
}
