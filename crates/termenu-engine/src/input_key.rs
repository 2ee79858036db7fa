//! Abstract input key event, independent of terminal library.
//!
//! This module defines the `InputKey` enum which abstracts keyboard input
//! from the underlying terminal library (crossterm). The engine, the line
//! editor and every item work on `InputKey`, so a menu can be driven by a
//! scripted terminal in tests or by any other terminal port.
//!
//! Keys also have a textual form (`Up`, `Ctrl+c`, `F5`, `q`, ...) used by
//! the configuration file.

use std::fmt;
use std::str::FromStr;

use termenu_core::Error;

/// Abstract input key event, independent of terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    // Character keys
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+a, Ctrl+c, etc.)
    CharCtrl(char),

    // Navigation
    /// Up arrow key
    Up,
    /// Down arrow key
    Down,
    /// Left arrow key
    Left,
    /// Right arrow key
    Right,
    /// Home key
    Home,
    /// End key
    End,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,

    // Action keys
    /// Enter/Return key
    Enter,
    /// Escape key
    Esc,
    /// Tab key
    Tab,
    /// Shift+Tab (BackTab)
    BackTab,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,

    // Function keys
    /// Function key (F1-F12)
    F(u8),
}

impl InputKey {
    /// Whether this key inserts a visible character into a text buffer
    pub fn printable(&self) -> Option<char> {
        match self {
            InputKey::Char(c) if !c.is_control() => Some(*c),
            _ => None,
        }
    }
}

const NAMED_KEYS: &[(&str, InputKey)] = &[
    ("Up", InputKey::Up),
    ("Down", InputKey::Down),
    ("Left", InputKey::Left),
    ("Right", InputKey::Right),
    ("Home", InputKey::Home),
    ("End", InputKey::End),
    ("PageUp", InputKey::PageUp),
    ("PageDown", InputKey::PageDown),
    ("Enter", InputKey::Enter),
    ("Esc", InputKey::Esc),
    ("Tab", InputKey::Tab),
    ("BackTab", InputKey::BackTab),
    ("Backspace", InputKey::Backspace),
    ("Delete", InputKey::Delete),
    ("Space", InputKey::Char(' ')),
];

impl fmt::Display for InputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, key)| key == self) {
            return write!(f, "{}", name);
        }
        match self {
            InputKey::Char(c) => write!(f, "{}", c),
            InputKey::CharCtrl(c) => write!(f, "Ctrl+{}", c),
            InputKey::F(n) => write!(f, "F{}", n),
            // Every remaining variant is in NAMED_KEYS
            other => write!(f, "{:?}", other),
        }
    }
}

impl FromStr for InputKey {
    type Err = Error;

    /// Parse a key name. Named keys are case-insensitive; a single character
    /// is taken literally, so `"q"` and `"Q"` are different keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(InputKey::Char(c));
        }

        if let Some((_, key)) = NAMED_KEYS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
        {
            return Ok(*key);
        }

        // "Escape" is accepted as an alias for "Esc"
        if s.eq_ignore_ascii_case("escape") {
            return Ok(InputKey::Esc);
        }

        if let Some(rest) = s
            .strip_prefix("Ctrl+")
            .or_else(|| s.strip_prefix("ctrl+"))
        {
            let mut rest_chars = rest.chars();
            if let (Some(c), None) = (rest_chars.next(), rest_chars.next()) {
                return Ok(InputKey::CharCtrl(c));
            }
        }

        if let Some(n) = s
            .strip_prefix('F')
            .or_else(|| s.strip_prefix('f'))
            .and_then(|n| n.parse::<u8>().ok())
        {
            if (1..=12).contains(&n) {
                return Ok(InputKey::F(n));
            }
        }

        Err(Error::invalid_key(s))
    }
}
