//! Key binding table
//!
//! Maps physical keys to the six semantic menu actions. A table always holds
//! exactly one binding per action in the fixed order Escape, Up, Down, Left,
//! Right, Enter; anything else handed to [`KeyBindings::new`] is replaced by
//! the default table.

use std::fmt;

use termenu_core::prelude::*;

use crate::input_key::InputKey;

/// Semantic menu action, independent of the physical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Escape,
    Up,
    Down,
    Left,
    Right,
    Enter,
}

impl Action {
    /// Every action in table order
    pub const ALL: [Action; 6] = [
        Action::Escape,
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Enter,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Escape => "escape",
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Enter => "enter",
        };
        write!(f, "{}", name)
    }
}

/// Situation in which a binding is switched off.
///
/// Derived from the focused item: only-clickable items take the place of
/// plain clickable ones, since they are the stricter of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreContext {
    /// Focused item is clickable
    Clickable,
    /// Focused item is only-clickable
    OnlyClickable,
}

impl IgnoreContext {
    /// Context for an item with the given capabilities, `None` for plain items
    pub fn for_item(clickable: bool, only_clickable: bool) -> Option<Self> {
        if only_clickable {
            Some(IgnoreContext::OnlyClickable)
        } else if clickable {
            Some(IgnoreContext::Clickable)
        } else {
            None
        }
    }
}

/// One semantic action bound to a set of physical keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    action: Action,
    keys: Vec<InputKey>,
    ignore: Vec<IgnoreContext>,
}

impl KeyBinding {
    pub fn new(action: Action, keys: impl IntoIterator<Item = InputKey>) -> Self {
        Self {
            action,
            keys: keys.into_iter().collect(),
            ignore: Vec::new(),
        }
    }

    /// Switch this binding off while the focused item is in `context`
    pub fn ignoring(mut self, context: IgnoreContext) -> Self {
        if !self.ignore.contains(&context) {
            self.ignore.push(context);
        }
        self
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn keys(&self) -> &[InputKey] {
        &self.keys
    }

    pub fn ignored_in(&self) -> &[IgnoreContext] {
        &self.ignore
    }

    /// Whether `key` triggers this binding in `context`
    pub fn matches(&self, key: &InputKey, context: Option<IgnoreContext>) -> bool {
        if let Some(context) = context {
            if self.ignore.contains(&context) {
                return false;
            }
        }
        self.keys.contains(key)
    }
}

/// Well-formed binding table: one binding per [`Action`], in table order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: Vec<KeyBinding>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                KeyBinding::new(Action::Escape, [InputKey::Esc]),
                KeyBinding::new(Action::Up, [InputKey::Up]),
                KeyBinding::new(Action::Down, [InputKey::Down]),
                KeyBinding::new(Action::Left, [InputKey::Left])
                    .ignoring(IgnoreContext::OnlyClickable),
                KeyBinding::new(Action::Right, [InputKey::Right])
                    .ignoring(IgnoreContext::OnlyClickable),
                KeyBinding::new(Action::Enter, [InputKey::Enter]),
            ],
        }
    }
}

impl KeyBindings {
    /// Build a table, falling back to the defaults when `bindings` is not
    /// exactly one binding per action in table order.
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        if Self::is_well_formed(&bindings) {
            Self { bindings }
        } else {
            warn!(
                "Malformed key binding table ({} entries), using defaults",
                bindings.len()
            );
            Self::default()
        }
    }

    pub fn is_well_formed(bindings: &[KeyBinding]) -> bool {
        bindings.len() == Action::ALL.len()
            && bindings
                .iter()
                .zip(Action::ALL)
                .all(|(binding, action)| binding.action == action)
    }

    /// Resolve a physical key to an action, honouring ignore contexts.
    /// Earlier actions win when one key is bound twice.
    pub fn resolve(&self, key: &InputKey, context: Option<IgnoreContext>) -> Option<Action> {
        self.bindings
            .iter()
            .find(|binding| binding.matches(key, context))
            .map(KeyBinding::action)
    }

    /// The binding for `action`
    pub fn binding(&self, action: Action) -> &KeyBinding {
        // Well-formed tables are indexed by action order
        &self.bindings[action as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.iter()
    }
}
