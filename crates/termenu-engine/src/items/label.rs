//! Plain text line

use termenu_core::prelude::*;

use crate::bindings::Action;
use crate::item::{ItemContext, ItemText, KeyOutcome, MenuItem};

/// Unselectable text, such as a heading or a hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
    multiline: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            multiline: false,
        }
    }

    /// Repeat the cursor icons on every line of a multi-line label
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }
}

impl<T> MenuItem<T> for Label {
    fn text(&self) -> ItemText {
        ItemText::plain(&self.text).multiline(self.multiline)
    }

    fn is_selectable(&self) -> bool {
        false
    }

    fn handle_key(&mut self, _action: Action, _ctx: &mut ItemContext<'_>) -> Result<KeyOutcome<T>> {
        Ok(KeyOutcome::Redraw(false))
    }
}
