//! Menu item capability interface
//!
//! An item is one line-entry of a menu. The engine only ever sees the
//! capabilities declared by [`MenuItem`]; concrete widget kinds live in
//! [`crate::items`] or in user code.
//!
//! Items never hold a reference back to their menu. Whatever session state
//! they need while rendering or handling a key is passed in explicitly: the
//! icon pair for rendering, an [`ItemContext`] for key handling.

use termenu_core::metrics::display_width;
use termenu_core::prelude::*;

use crate::bindings::{Action, KeyBindings};
use crate::input_key::InputKey;
use crate::port::TerminalPort;

/// A slot in a menu's item list. `None` is a blank, unselectable line.
pub type ItemSlot<T> = Option<Box<dyn MenuItem<T>>>;

/// Whether `slot` holds a selectable item
pub fn is_selectable_slot<T>(slot: &ItemSlot<T>) -> bool {
    slot.as_ref().is_some_and(|item| item.is_selectable())
}

/// Redraw request that may defer to the caller's default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Redraw {
    /// Let the caller decide
    #[default]
    UseDefault,
    /// Explicitly redraw (`true`) or not (`false`)
    Force(bool),
}

impl Redraw {
    pub fn resolve(self, default: bool) -> bool {
        match self {
            Redraw::UseDefault => default,
            Redraw::Force(redraw) => redraw,
        }
    }
}

/// Result of an item handling a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome<T> {
    /// Stay in the menu; redraw if `true`
    Redraw(bool),
    /// End the session with this value
    Exit(T),
}

/// Cursor glyphs drawn around the selected and unselected items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorIcon {
    pub selected_left: String,
    pub selected_right: String,
    pub unselected_left: String,
    pub unselected_right: String,
}

impl Default for CursorIcon {
    fn default() -> Self {
        Self {
            selected_left: "> ".to_string(),
            selected_right: String::new(),
            unselected_left: "  ".to_string(),
            unselected_right: String::new(),
        }
    }
}

impl CursorIcon {
    pub fn new(
        selected_left: impl Into<String>,
        selected_right: impl Into<String>,
        unselected_left: impl Into<String>,
        unselected_right: impl Into<String>,
    ) -> Self {
        Self {
            selected_left: selected_left.into(),
            selected_right: selected_right.into(),
            unselected_left: unselected_left.into(),
            unselected_right: unselected_right.into(),
        }
    }

    pub fn pair(&self, selected: bool) -> IconPair<'_> {
        if selected {
            IconPair {
                left: &self.selected_left,
                right: &self.selected_right,
            }
        } else {
            IconPair {
                left: &self.unselected_left,
                right: &self.unselected_right,
            }
        }
    }
}

/// The left/right glyphs for one item line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconPair<'a> {
    pub left: &'a str,
    pub right: &'a str,
}

/// The pieces an item line is composed from, in drawing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemText {
    pub pre_text: String,
    pub special: String,
    pub pre_value: String,
    pub value: Option<String>,
    pub post_value: String,
    /// Continue the icons onto every line when parts contain newlines
    pub multiline: bool,
}

impl ItemText {
    /// Text with no value
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            pre_text: text.into(),
            ..Self::default()
        }
    }

    /// `label` followed by `pre_value` and a value
    pub fn labelled(
        label: impl Into<String>,
        pre_value: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            pre_text: label.into(),
            pre_value: pre_value.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    fn part(&self, text: &str, icons: IconPair<'_>) -> String {
        if self.multiline && text.contains('\n') {
            text.replace('\n', &format!("{}\n{}", icons.right, icons.left))
        } else {
            text.to_string()
        }
    }

    /// Everything drawn before the value, left icon included
    pub fn value_prefix(&self, icons: IconPair<'_>) -> String {
        let mut out = String::from(icons.left);
        out.push_str(&self.part(&self.pre_text, icons));
        out.push_str(&self.part(&self.special, icons));
        out.push_str(&self.part(&self.pre_value, icons));
        out
    }

    /// Everything drawn after the value, right icon included, no newline
    pub fn value_suffix(&self, icons: IconPair<'_>) -> String {
        let mut out = self.part(&self.post_value, icons);
        out.push_str(icons.right);
        out
    }

    /// The complete item line(s), terminated by a newline
    pub fn compose(&self, icons: IconPair<'_>) -> String {
        let mut out = self.value_prefix(icons);
        if let Some(value) = &self.value {
            out.push_str(&self.part(value, icons));
        }
        out.push_str(&self.value_suffix(icons));
        out.push('\n');
        out
    }

    /// Screen position where the value starts when the item's first line is
    /// drawn at `row`, column 0.
    pub fn value_origin(&self, icons: IconPair<'_>, row: u16, escape_codes: bool) -> (u16, u16) {
        let prefix = self.value_prefix(icons);
        let lines_before = prefix.matches('\n').count();
        let last_line = prefix.rsplit('\n').next().unwrap_or("");
        let col = display_width(last_line, 0, escape_codes);
        (
            u16::try_from(col).unwrap_or(u16::MAX),
            row.saturating_add(u16::try_from(lines_before).unwrap_or(u16::MAX)),
        )
    }
}

/// Session state handed to an item while it handles a key
pub struct ItemContext<'a> {
    /// The session's terminal, exclusively borrowed for the call
    pub port: &'a mut dyn TerminalPort,
    pub icons: &'a CursorIcon,
    pub bindings: &'a KeyBindings,
    /// The physical key that resolved to the action
    pub key: InputKey,
    /// Screen row of the item's first line
    pub row: u16,
    pub escape_codes: bool,
}

/// Capabilities of a menu item
pub trait MenuItem<T> {
    /// The item's text pieces
    fn text(&self) -> ItemText;

    /// The full line(s) for this item, newline-terminated
    fn render(&self, icons: IconPair<'_>) -> String {
        self.text().compose(icons)
    }

    /// Can receive cursor focus during Up/Down navigation
    fn is_selectable(&self) -> bool {
        true
    }

    /// Consumes Enter to perform its own action
    fn is_clickable(&self) -> bool {
        false
    }

    /// Clickable, and Left/Right are switched off while focused
    fn is_only_clickable(&self) -> bool {
        false
    }

    /// Handle Left, Right or Enter while focused
    fn handle_key(&mut self, action: Action, ctx: &mut ItemContext<'_>) -> Result<KeyOutcome<T>>;
}
