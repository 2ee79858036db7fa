//! In-place single-line editor
//!
//! Edits a buffer drawn at a fixed screen origin, redrawing the buffer and
//! whatever decoration follows it after every key:
//! - Cursor movement (Left/Right, Home/End)
//! - Insert, Backspace, Delete with optional per-key validation
//! - Maximum display width measured from the origin column
//! - Whole-buffer validation on commit (valid / retry / invalid)
//!
//! Enter commits, Esc cancels and restores the original text.

use termenu_core::ansi::CLEAR_TO_EOL;
use termenu_core::metrics::{display_width, offset_for_width, prefix_width};
use termenu_core::prelude::*;

use crate::input_key::InputKey;
use crate::port::TerminalPort;

/// Buffer-changing key offered to a key validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Insert(char),
    Backspace,
    Delete,
}

/// How a key validator combines with the default key checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidatorMode {
    /// Both the default checks and the validator must accept
    #[default]
    Additional,
    /// Only the validator decides; the maximum width is not enforced
    Override,
}

/// Per-key validator
pub struct KeyValidator {
    check: Box<dyn FnMut(&LineEditState, EditKey) -> bool>,
    mode: ValidatorMode,
}

impl KeyValidator {
    pub fn new(check: impl FnMut(&LineEditState, EditKey) -> bool + 'static) -> Self {
        Self {
            check: Box::new(check),
            mode: ValidatorMode::Additional,
        }
    }

    pub fn overriding(mut self) -> Self {
        self.mode = ValidatorMode::Override;
        self
    }

    pub fn mode(&self) -> ValidatorMode {
        self.mode
    }

    fn accepts(&mut self, state: &LineEditState, key: EditKey) -> bool {
        (self.check)(state, key)
    }
}

/// Verdict of a content validator on a committed buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// Edit again, starting from the committed buffer
    Retry,
    /// Show the message, then hand the text back to the caller
    Invalid(String),
}

/// Whole-buffer validator run on commit
pub struct ContentValidator {
    check: Box<dyn FnMut(&str) -> Validation>,
}

impl ContentValidator {
    pub fn new(check: impl FnMut(&str) -> Validation + 'static) -> Self {
        Self {
            check: Box::new(check),
        }
    }

    pub fn validate(&mut self, text: &str) -> Validation {
        (self.check)(text)
    }
}

/// Buffer, cursor and placement of one edit session.
///
/// The cursor is a character offset and always lies in `[0, len]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEditState {
    buffer: Vec<char>,
    cursor: usize,
    origin: (u16, u16),
    trailing: String,
}

impl LineEditState {
    /// New state with the cursor at the end of `text`
    pub fn new(text: &str, origin: (u16, u16)) -> Self {
        let buffer: Vec<char> = text.chars().collect();
        Self {
            cursor: buffer.len(),
            buffer,
            origin,
            trailing: String::new(),
        }
    }

    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn origin(&self) -> (u16, u16) {
        self.origin
    }

    pub fn trailing(&self) -> &str {
        &self.trailing
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.buffer.len());
    }

    /// Replace the buffer, keeping the cursor in bounds
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.chars().collect();
        self.cursor = self.cursor.min(self.buffer.len());
    }

    /// Buffer as it would read after inserting `c` at the cursor
    fn with_inserted(&self, c: char) -> String {
        let mut text: String = self.buffer[..self.cursor].iter().collect();
        text.push(c);
        text.extend(&self.buffer[self.cursor..]);
        text
    }

    fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.buffer.remove(self.cursor);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.len());
    }
}

/// What the edit loop does after one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStep {
    Continue,
    Commit,
    Cancel,
}

/// Result of an edit session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Committed(String),
    /// Esc was pressed; the original text is back on screen
    Cancelled,
    /// The content validator rejected `text`; the caller decides whether to
    /// keep it
    Rejected { text: String, message: String },
}

/// Raw single-line editor bound to a fixed screen origin
pub struct LineEditor<'v> {
    state: LineEditState,
    key_validator: Option<&'v mut KeyValidator>,
    content_validator: Option<&'v mut ContentValidator>,
    max_width: Option<usize>,
    escape_codes: bool,
}

impl<'v> LineEditor<'v> {
    pub fn new(initial: &str, origin: (u16, u16)) -> Self {
        Self {
            state: LineEditState::new(initial, origin),
            key_validator: None,
            content_validator: None,
            max_width: None,
            escape_codes: true,
        }
    }

    /// Decoration drawn after the buffer and kept in place while typing
    pub fn with_trailing(mut self, trailing: impl Into<String>) -> Self {
        self.state.trailing = trailing.into();
        self
    }

    /// Maximum display width of the buffer, measured from the origin column
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn with_key_validator(mut self, validator: &'v mut KeyValidator) -> Self {
        self.key_validator = Some(validator);
        self
    }

    pub fn with_content_validator(mut self, validator: &'v mut ContentValidator) -> Self {
        self.content_validator = Some(validator);
        self
    }

    pub fn escape_codes(mut self, enabled: bool) -> Self {
        self.escape_codes = enabled;
        self
    }

    pub fn state(&self) -> &LineEditState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut LineEditState {
        &mut self.state
    }

    /// Width of `text` as drawn at the origin column
    fn width_at_origin(&self, text: &str) -> usize {
        display_width(text, usize::from(self.state.origin.0), self.escape_codes)
    }

    /// Remaining console width after the origin and the first trailing line
    fn default_max_width(&self, columns: u16) -> usize {
        let trailing = self.state.trailing.split('\n').next().unwrap_or("");
        usize::from(columns)
            .saturating_sub(usize::from(self.state.origin.0))
            .saturating_sub(display_width(trailing, 0, self.escape_codes))
            .saturating_sub(1)
    }

    fn allows(&mut self, key: EditKey, default_ok: bool) -> bool {
        match self.key_validator.as_deref_mut() {
            None => default_ok,
            Some(validator) => match validator.mode() {
                ValidatorMode::Additional => default_ok && validator.accepts(&self.state, key),
                ValidatorMode::Override => validator.accepts(&self.state, key),
            },
        }
    }

    /// Apply one key to the buffer.
    ///
    /// Cursor bounds are always enforced; a rejected key leaves the state
    /// unchanged.
    pub fn apply(&mut self, key: InputKey, max_width: usize) -> EditStep {
        match key {
            InputKey::Enter => return EditStep::Commit,
            InputKey::Esc => return EditStep::Cancel,
            InputKey::Left => self.state.move_left(),
            InputKey::Right => self.state.move_right(),
            InputKey::Home => self.state.cursor = 0,
            InputKey::End => self.state.cursor = self.state.len(),
            InputKey::Backspace => {
                if self.state.cursor > 0 && self.allows(EditKey::Backspace, true) {
                    self.state.backspace();
                }
            }
            InputKey::Delete => {
                if self.state.cursor < self.state.len() && self.allows(EditKey::Delete, true) {
                    self.state.delete();
                }
            }
            other => {
                if let Some(c) = other.printable() {
                    let fits = self.width_at_origin(&self.state.with_inserted(c)) <= max_width;
                    if self.allows(EditKey::Insert(c), fits) {
                        self.state.insert(c);
                    } else {
                        trace!("Rejected {:?} at cursor {}", c, self.state.cursor);
                    }
                }
            }
        }
        EditStep::Continue
    }

    /// Clear from the origin, draw buffer and trailing text, then place the
    /// cursor after `cursor` characters.
    pub fn redraw(&self, port: &mut dyn TerminalPort) -> Result<()> {
        let (col, row) = self.state.origin;
        port.set_cursor_position(col, row)?;
        port.write(CLEAR_TO_EOL)?;
        port.write(&self.state.text())?;
        port.write(&self.state.trailing)?;

        let offset = prefix_width(
            &self.state.buffer,
            self.state.cursor,
            usize::from(col),
            self.escape_codes,
        );
        let cursor_col = usize::from(col).saturating_add(offset);
        port.set_cursor_position(u16::try_from(cursor_col).unwrap_or(u16::MAX), row)?;
        port.flush()
    }

    fn show_message(&self, port: &mut dyn TerminalPort, message: &str) -> Result<()> {
        let (col, row) = self.state.origin;
        port.set_cursor_position(col, row)?;
        port.write(CLEAR_TO_EOL)?;
        port.write(message)?;
        port.flush()
    }

    /// One pass of the key loop; `true` when committed
    fn edit_pass(&mut self, port: &mut dyn TerminalPort, max_width: usize) -> Result<bool> {
        loop {
            self.redraw(port)?;
            let key = port.read_key(false)?;
            match self.apply(key, max_width) {
                EditStep::Continue => {}
                EditStep::Commit => return Ok(true),
                EditStep::Cancel => return Ok(false),
            }
        }
    }

    /// Run the edit session on `port`.
    pub fn run(&mut self, port: &mut dyn TerminalPort) -> Result<EditOutcome> {
        let original = self.state.text();
        let max_width = match self.max_width {
            Some(max_width) => max_width,
            None => self.default_max_width(port.size()?.0),
        };

        // An initial value wider than the field is cut at the width limit
        if self.width_at_origin(&original) > max_width {
            let origin_col = usize::from(self.state.origin.0);
            if let Some(cut) = offset_for_width(&original, max_width, 0, origin_col, self.escape_codes) {
                let kept: String = original.chars().take(cut).collect();
                self.state.set_text(&kept);
                self.state.cursor = self.state.len();
            }
        }
        debug!(
            "Line edit at {:?}, max width {}",
            self.state.origin, max_width
        );

        loop {
            if !self.edit_pass(port, max_width)? {
                self.state.set_text(&original);
                self.state.cursor = self.state.len();
                self.redraw(port)?;
                return Ok(EditOutcome::Cancelled);
            }

            let text = self.state.text();
            let verdict = match self.content_validator.as_deref_mut() {
                Some(validator) => validator.validate(&text),
                None => Validation::Valid,
            };
            match verdict {
                Validation::Valid => return Ok(EditOutcome::Committed(text)),
                Validation::Retry => {
                    debug!("Content validator asked to retry {:?}", text);
                }
                Validation::Invalid(message) => {
                    debug!("Content validator rejected {:?}: {}", text, message);
                    self.show_message(port, &message)?;
                    port.read_key(false)?;
                    self.redraw(port)?;
                    return Ok(EditOutcome::Rejected { text, message });
                }
            }
        }
    }
}
