//! Settings types and their conversion into engine values

use serde::Deserialize;
use termenu_core::prelude::*;

use crate::bindings::{Action, IgnoreContext, KeyBinding, KeyBindings};
use crate::input_key::InputKey;
use crate::item::CursorIcon;
use crate::scroll::{ScrollIndicators, ScrollSettings};

/// Menu settings (.termenu/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub keys: KeySettings,

    #[serde(default)]
    pub scroll: ScrollConfig,

    #[serde(default)]
    pub cursor: CursorSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

/// Key names bound to each action
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeySettings {
    #[serde(default = "default_escape_keys")]
    pub escape: Vec<String>,

    #[serde(default = "default_up_keys")]
    pub up: Vec<String>,

    #[serde(default = "default_down_keys")]
    pub down: Vec<String>,

    #[serde(default = "default_left_keys")]
    pub left: Vec<String>,

    #[serde(default = "default_right_keys")]
    pub right: Vec<String>,

    #[serde(default = "default_enter_keys")]
    pub enter: Vec<String>,
}

impl Default for KeySettings {
    fn default() -> Self {
        Self {
            escape: default_escape_keys(),
            up: default_up_keys(),
            down: default_down_keys(),
            left: default_left_keys(),
            right: default_right_keys(),
            enter: default_enter_keys(),
        }
    }
}

fn default_escape_keys() -> Vec<String> {
    vec!["Esc".to_string()]
}

fn default_up_keys() -> Vec<String> {
    vec!["Up".to_string()]
}

fn default_down_keys() -> Vec<String> {
    vec!["Down".to_string()]
}

fn default_left_keys() -> Vec<String> {
    vec!["Left".to_string()]
}

fn default_right_keys() -> Vec<String> {
    vec!["Right".to_string()]
}

fn default_enter_keys() -> Vec<String> {
    vec!["Enter".to_string()]
}

impl KeySettings {
    fn names(&self, action: Action) -> &[String] {
        match action {
            Action::Escape => &self.escape,
            Action::Up => &self.up,
            Action::Down => &self.down,
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::Enter => &self.enter,
        }
    }

    /// Parse every key list into a binding table.
    ///
    /// Left and Right are switched off on only-clickable items, as in the
    /// default table.
    pub fn to_bindings(&self) -> Result<KeyBindings> {
        let mut bindings = Vec::with_capacity(Action::ALL.len());
        for action in Action::ALL {
            let names = self.names(action);
            if names.is_empty() {
                return Err(Error::config(format!("no keys bound to {}", action)));
            }
            let keys = names
                .iter()
                .map(|name| name.parse::<InputKey>())
                .collect::<Result<Vec<_>>>()?;
            let binding = KeyBinding::new(action, keys);
            bindings.push(match action {
                Action::Left | Action::Right => binding.ignoring(IgnoreContext::OnlyClickable),
                _ => binding,
            });
        }
        Ok(KeyBindings::new(bindings))
    }
}

/// Scroll window settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrollConfig {
    /// Maximum visible items; negative means unlimited
    #[serde(default = "default_max_visible")]
    pub max_visible: i64,

    #[serde(default = "default_margin")]
    pub up_margin: usize,

    #[serde(default = "default_margin")]
    pub down_margin: usize,

    #[serde(default)]
    pub top_continued: Option<String>,

    #[serde(default)]
    pub top_ended: Option<String>,

    #[serde(default)]
    pub bottom_continued: Option<String>,

    #[serde(default)]
    pub bottom_ended: Option<String>,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
            up_margin: default_margin(),
            down_margin: default_margin(),
            top_continued: None,
            top_ended: None,
            bottom_continued: None,
            bottom_ended: None,
        }
    }
}

fn default_max_visible() -> i64 {
    -1
}

fn default_margin() -> usize {
    1
}

/// Cursor glyphs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CursorSettings {
    #[serde(default = "default_selected_left")]
    pub selected_left: String,

    #[serde(default)]
    pub selected_right: String,

    #[serde(default = "default_unselected_left")]
    pub unselected_left: String,

    #[serde(default)]
    pub unselected_right: String,
}

impl Default for CursorSettings {
    fn default() -> Self {
        Self {
            selected_left: default_selected_left(),
            selected_right: String::new(),
            unselected_left: default_unselected_left(),
            unselected_right: String::new(),
        }
    }
}

fn default_selected_left() -> String {
    "> ".to_string()
}

fn default_unselected_left() -> String {
    "  ".to_string()
}

/// Display behaviour
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplaySettings {
    /// Text written before each frame; unset clears the screen
    #[serde(default)]
    pub clear_text: Option<String>,

    /// Treat escape sequences in item text as zero-width
    #[serde(default = "default_true")]
    pub escape_codes: bool,

    /// Let the escape key leave the menu
    #[serde(default = "default_true")]
    pub allow_escape: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            clear_text: None,
            escape_codes: true,
            allow_escape: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Binding table from `[keys]`, or the default table when a list is
    /// empty or names an unknown key
    pub fn key_bindings(&self) -> KeyBindings {
        match self.keys.to_bindings() {
            Ok(bindings) => bindings,
            Err(e) => {
                warn!("Invalid [keys] settings ({}), using default bindings", e);
                KeyBindings::default()
            }
        }
    }

    pub fn scroll_settings(&self) -> ScrollSettings {
        let scroll = &self.scroll;
        ScrollSettings {
            max_visible: usize::try_from(scroll.max_visible).ok(),
            up_margin: scroll.up_margin,
            down_margin: scroll.down_margin,
            indicators: ScrollIndicators {
                top_continued: scroll.top_continued.clone(),
                top_ended: scroll.top_ended.clone(),
                bottom_continued: scroll.bottom_continued.clone(),
                bottom_ended: scroll.bottom_ended.clone(),
            },
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        let cursor = &self.cursor;
        CursorIcon::new(
            cursor.selected_left.as_str(),
            cursor.selected_right.as_str(),
            cursor.unselected_left.as_str(),
            cursor.unselected_right.as_str(),
        )
    }
}
