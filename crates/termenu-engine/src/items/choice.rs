//! Pick one of several options

use termenu_core::prelude::*;

use crate::bindings::Action;
use crate::item::{ItemContext, ItemText, KeyOutcome, MenuItem};

/// Cycles through a fixed list of options. Left steps back, Right and Enter
/// step forward, both wrapping around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    label: String,
    options: Vec<String>,
    index: usize,
}

impl Choice {
    pub fn new<S: Into<String>>(label: impl Into<String>, options: impl IntoIterator<Item = S>) -> Self {
        Self {
            label: label.into(),
            options: options.into_iter().map(Into::into).collect(),
            index: 0,
        }
    }

    /// Start on option `index`, clamped to the list
    pub fn with_selected(mut self, index: usize) -> Self {
        self.index = index.min(self.options.len().saturating_sub(1));
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The current option, `None` when there are no options
    pub fn value(&self) -> Option<&str> {
        self.options.get(self.index).map(String::as_str)
    }

    fn step(&mut self, forward: bool) {
        let len = self.options.len();
        if len == 0 {
            return;
        }
        self.index = if forward {
            (self.index + 1) % len
        } else {
            (self.index + len - 1) % len
        };
    }
}

impl<T> MenuItem<T> for Choice {
    fn text(&self) -> ItemText {
        ItemText {
            pre_text: self.label.clone(),
            pre_value: ": < ".to_string(),
            value: Some(self.value().unwrap_or_default().to_string()),
            post_value: " >".to_string(),
            ..ItemText::default()
        }
    }

    fn handle_key(&mut self, action: Action, _ctx: &mut ItemContext<'_>) -> Result<KeyOutcome<T>> {
        let before = self.index;
        self.step(action != Action::Left);
        Ok(KeyOutcome::Redraw(before != self.index))
    }
}
