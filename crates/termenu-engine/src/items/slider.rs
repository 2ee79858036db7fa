//! Integer slider

use termenu_core::prelude::*;

use crate::bindings::Action;
use crate::item::{ItemContext, ItemText, KeyOutcome, MenuItem};

const DEFAULT_BAR_WIDTH: usize = 10;

/// Integer value within `[min, max]`, stepped by Left/Right
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slider {
    label: String,
    min: i64,
    max: i64,
    step: i64,
    value: i64,
    bar_width: usize,
}

impl Slider {
    /// Slider over `[min, max]` starting at `min`; the bounds are swapped
    /// when given in the wrong order.
    pub fn new(label: impl Into<String>, min: i64, max: i64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            label: label.into(),
            min,
            max,
            step: 1,
            value: min,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }

    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step.max(1);
        self
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value.clamp(self.min, self.max);
        self
    }

    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    fn bar(&self) -> String {
        if self.bar_width == 0 {
            return String::new();
        }
        let span = (i128::from(self.max) - i128::from(self.min)).max(1);
        let offset = i128::from(self.value) - i128::from(self.min);
        let filled = (offset * self.bar_width as i128 / span) as usize;
        format!(
            " [{}{}]",
            "#".repeat(filled),
            " ".repeat(self.bar_width - filled)
        )
    }
}

impl<T> MenuItem<T> for Slider {
    fn text(&self) -> ItemText {
        ItemText {
            pre_text: self.label.clone(),
            special: self.bar(),
            pre_value: " ".to_string(),
            value: Some(self.value.to_string()),
            ..ItemText::default()
        }
    }

    fn handle_key(&mut self, action: Action, _ctx: &mut ItemContext<'_>) -> Result<KeyOutcome<T>> {
        let before = self.value;
        self.value = match action {
            Action::Left => self.value.saturating_sub(self.step).max(self.min),
            Action::Right => self.value.saturating_add(self.step).min(self.max),
            _ => self.value,
        };
        Ok(KeyOutcome::Redraw(before != self.value))
    }
}
