//! Demo settings menu exercising every widget kind

use std::cell::RefCell;
use std::rc::Rc;

use termenu_core::prelude::*;
use termenu_engine::items::{Button, Choice, Label, Slider, TextField, Toggle};
use termenu_engine::{
    ContentValidator, EditKey, KeyOutcome, KeyValidator, Menu, Settings, Validation,
};

/// How the user left the demo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Save,
    Discard,
}

/// The top-level menu and the submenu it opens, kept for reporting values
pub struct Demo {
    pub menu: Menu<Outcome>,
    pub advanced: Rc<RefCell<Menu<()>>>,
}

fn port_number_validator() -> ContentValidator {
    ContentValidator::new(|text| match text.parse::<u32>() {
        Ok(port) if (1..=65535).contains(&port) => Validation::Valid,
        Ok(_) => Validation::Invalid("port must be between 1 and 65535".to_string()),
        Err(_) if text.is_empty() => Validation::Retry,
        Err(_) => Validation::Invalid(format!("{:?} is not a number", text)),
    })
}

fn digits_only() -> KeyValidator {
    KeyValidator::new(|_, key| match key {
        EditKey::Insert(c) => c.is_ascii_digit(),
        EditKey::Backspace | EditKey::Delete => true,
    })
}

fn advanced_menu(settings: &Settings) -> Menu<()> {
    Menu::new()
        .apply_settings(settings)
        .with_title("Advanced")
        .item(
            TextField::new("Port", "8080")
                .with_key_validator(digits_only())
                .with_content_validator(port_number_validator())
                .with_max_width(5),
        )
        .item(Toggle::new("Verbose logging", false).with_labels("yes", "no"))
        .item(Slider::new("Retries", 0, 10).with_value(3))
        .blank()
        .item(Button::exit("Back", ()))
}

/// Build the demo menu with `settings` applied to it and its submenu
pub fn build(settings: &Settings) -> Demo {
    let advanced = Rc::new(RefCell::new(advanced_menu(settings)));
    let submenu = Rc::clone(&advanced);

    let menu = Menu::new()
        .apply_settings(settings)
        .with_title("termenu demo: arrows move, Enter activates, Esc quits")
        .item(TextField::new("Name", "guest").with_max_width(24))
        .item(Toggle::new("Dark mode", true))
        .item(Choice::new("Theme", ["solarized", "gruvbox", "nord"]))
        .item(Slider::new("Volume", 0, 100).with_step(10).with_value(50))
        .item(Label::new("Values are printed on exit."))
        .blank()
        .item(Button::new("Advanced...", move |ctx| {
            let mut inner = submenu.borrow_mut();
            inner.run(&mut *ctx.port)?;
            Ok(KeyOutcome::Redraw(true))
        }))
        .item(Button::exit("Save", Outcome::Save))
        .item(Button::exit("Discard", Outcome::Discard));

    Demo { menu, advanced }
}

/// `label: value` for every item that carries a value
pub fn describe<T>(menu: &Menu<T>) -> Vec<String> {
    (0..menu.len())
        .filter_map(|index| menu.item_at(index))
        .filter_map(|item| {
            let text = item.text();
            text.value.map(|value| format!("{}: {}", text.pre_text, value))
        })
        .collect()
}

impl Demo {
    pub fn report(&self) -> Vec<String> {
        let mut lines = describe(&self.menu);
        lines.extend(
            describe(&self.advanced.borrow())
                .into_iter()
                .map(|line| format!("Advanced / {}", line)),
        );
        debug!("Demo finished with {} values", lines.len());
        lines
    }
}
