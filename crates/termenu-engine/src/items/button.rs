//! Button running a closure on Enter

use std::fmt;

use termenu_core::prelude::*;

use crate::bindings::Action;
use crate::item::{ItemContext, ItemText, KeyOutcome, MenuItem};

type ButtonAction<T> = Box<dyn FnMut(&mut ItemContext<'_>) -> Result<KeyOutcome<T>>>;

/// Clickable item; Enter runs its action.
///
/// The action receives the session's [`ItemContext`], so it can open a
/// nested [`crate::Menu`] on `ctx.port` and return
/// `KeyOutcome::Redraw(true)` to repaint the parent afterwards.
pub struct Button<T> {
    label: String,
    action: ButtonAction<T>,
}

impl<T> Button<T> {
    pub fn new(
        label: impl Into<String>,
        action: impl FnMut(&mut ItemContext<'_>) -> Result<KeyOutcome<T>> + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            action: Box::new(action),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<T: Clone + 'static> Button<T> {
    /// Button that ends the session with `value`
    pub fn exit(label: impl Into<String>, value: T) -> Self {
        Self::new(label, move |_| Ok(KeyOutcome::Exit(value.clone())))
    }
}

impl<T> fmt::Debug for Button<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<T> MenuItem<T> for Button<T> {
    fn text(&self) -> ItemText {
        ItemText::plain(&self.label)
    }

    fn is_clickable(&self) -> bool {
        true
    }

    fn handle_key(&mut self, action: Action, ctx: &mut ItemContext<'_>) -> Result<KeyOutcome<T>> {
        match action {
            Action::Enter => (self.action)(ctx),
            _ => Ok(KeyOutcome::Redraw(false)),
        }
    }
}
