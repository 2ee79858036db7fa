//! On/off switch

use termenu_core::prelude::*;

use crate::bindings::Action;
use crate::item::{ItemContext, ItemText, KeyOutcome, MenuItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    label: String,
    value: bool,
    on_text: String,
    off_text: String,
}

impl Toggle {
    pub fn new(label: impl Into<String>, value: bool) -> Self {
        Self {
            label: label.into(),
            value,
            on_text: "on".to_string(),
            off_text: "off".to_string(),
        }
    }

    pub fn with_labels(mut self, on: impl Into<String>, off: impl Into<String>) -> Self {
        self.on_text = on.into();
        self.off_text = off.into();
        self
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

impl<T> MenuItem<T> for Toggle {
    fn text(&self) -> ItemText {
        let value = if self.value {
            &self.on_text
        } else {
            &self.off_text
        };
        ItemText::labelled(&self.label, ": ", value)
    }

    fn handle_key(&mut self, _action: Action, _ctx: &mut ItemContext<'_>) -> Result<KeyOutcome<T>> {
        // Left, Right and Enter all flip
        self.value = !self.value;
        Ok(KeyOutcome::Redraw(true))
    }
}
