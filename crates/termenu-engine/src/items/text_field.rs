//! Free text edited in place

use std::fmt;

use termenu_core::prelude::*;

use crate::bindings::Action;
use crate::item::{ItemContext, ItemText, KeyOutcome, MenuItem};
use crate::line_editor::{ContentValidator, EditOutcome, KeyValidator, LineEditor};

/// Only-clickable text field. Enter opens the line editor over the value
/// where it is drawn; Left/Right are left to the editor.
pub struct TextField {
    label: String,
    value: String,
    key_validator: Option<KeyValidator>,
    content_validator: Option<ContentValidator>,
    accept_invalid: bool,
    max_width: Option<usize>,
    last_message: Option<String>,
}

impl TextField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            key_validator: None,
            content_validator: None,
            accept_invalid: false,
            max_width: None,
            last_message: None,
        }
    }

    pub fn with_key_validator(mut self, validator: KeyValidator) -> Self {
        self.key_validator = Some(validator);
        self
    }

    pub fn with_content_validator(mut self, validator: ContentValidator) -> Self {
        self.content_validator = Some(validator);
        self
    }

    /// Keep text the content validator rejected instead of the old value
    pub fn accept_invalid(mut self, accept: bool) -> Self {
        self.accept_invalid = accept;
        self
    }

    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Message of the last rejected edit, cleared by the next accepted one
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    fn edit(&mut self, ctx: &mut ItemContext<'_>) -> Result<()> {
        let text = self.item_text();
        let icons = ctx.icons.pair(true);
        let origin = text.value_origin(icons, ctx.row, ctx.escape_codes);

        let mut editor = LineEditor::new(&self.value, origin)
            .with_trailing(text.value_suffix(icons))
            .escape_codes(ctx.escape_codes);
        if let Some(max_width) = self.max_width {
            editor = editor.with_max_width(max_width);
        }
        if let Some(validator) = self.key_validator.as_mut() {
            editor = editor.with_key_validator(validator);
        }
        if let Some(validator) = self.content_validator.as_mut() {
            editor = editor.with_content_validator(validator);
        }

        match editor.run(&mut *ctx.port)? {
            EditOutcome::Committed(value) => {
                self.value = value;
                self.last_message = None;
            }
            EditOutcome::Cancelled => {}
            EditOutcome::Rejected { text, message } => {
                if self.accept_invalid {
                    self.value = text;
                }
                self.last_message = Some(message);
            }
        }
        Ok(())
    }

    fn item_text(&self) -> ItemText {
        ItemText {
            pre_text: self.label.clone(),
            pre_value: ": [".to_string(),
            value: Some(self.value.clone()),
            post_value: "]".to_string(),
            ..ItemText::default()
        }
    }
}

impl fmt::Debug for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextField")
            .field("label", &self.label)
            .field("value", &self.value)
            .field("accept_invalid", &self.accept_invalid)
            .finish_non_exhaustive()
    }
}

impl<T> MenuItem<T> for TextField {
    fn text(&self) -> ItemText {
        self.item_text()
    }

    fn is_clickable(&self) -> bool {
        true
    }

    fn is_only_clickable(&self) -> bool {
        true
    }

    fn handle_key(&mut self, action: Action, ctx: &mut ItemContext<'_>) -> Result<KeyOutcome<T>> {
        if action != Action::Enter {
            return Ok(KeyOutcome::Redraw(false));
        }
        self.edit(ctx)?;
        Ok(KeyOutcome::Redraw(true))
    }
}
