//! Tests for the menu session state machine

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::hooks::Intercept;
use crate::item::{ItemText, Redraw};
use crate::items::{Button, Label, TextField, Toggle};
use crate::render::Stage;
use crate::scroll::ScrollIndicators;
use crate::test_utils::ScriptedTerminal;

fn term() -> ScriptedTerminal {
    ScriptedTerminal::new(40, 12)
}

fn buttons(labels: &[&str]) -> Menu<u32> {
    labels
        .iter()
        .zip(1u32..)
        .fold(Menu::new(), |menu, (label, value)| {
            menu.item(Button::exit(*label, value))
        })
}

fn value_of(menu: &Menu<u32>, index: usize) -> Option<String> {
    menu.item_at(index).and_then(|item| item.text().value)
}

// ─────────────────────────────────────────────────────────────────────────────
// Session start
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_zero_selectable_items_fails_before_rendering() {
    let mut menu: Menu<u32> = Menu::new().item(Label::new("only text")).blank();
    let mut term = term();
    term.push_key(InputKey::Down);

    assert!(matches!(menu.run(&mut term), Err(Error::NoSelectableItems)));
    assert!(term.output().is_empty());
    assert_eq!(term.remaining_keys(), 1);
}

#[test]
fn test_empty_menu_fails() {
    let mut menu: Menu<u32> = Menu::new();
    assert!(matches!(menu.start(), Err(Error::NoSelectableItems)));
    assert!(menu.is_empty());
}

#[test]
fn test_start_lands_on_only_selectable_and_wraps_to_itself() {
    let mut menu: Menu<u32> = Menu::new()
        .item(Label::new("x"))
        .blank()
        .item(Toggle::new("t", false));
    let mut term = term();

    menu.start().unwrap();
    assert_eq!(menu.selected(), 2);

    let flow = menu.handle_key(&mut term, InputKey::Up).unwrap();
    assert_eq!(flow, Flow::Continue { redraw: false });
    assert_eq!(menu.selected(), 2);

    menu.handle_key(&mut term, InputKey::Down).unwrap();
    assert_eq!(menu.selected(), 2);
}

#[test]
fn test_handle_key_starts_session_on_first_use() {
    let mut menu: Menu<u32> = Menu::new().blank().item(Toggle::new("t", false));
    let mut term = term();
    menu.handle_key(&mut term, InputKey::Char('z')).unwrap();
    assert_eq!(menu.selected(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Navigation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_navigation_skips_unselectable_and_wraps() {
    let mut menu = Menu::new()
        .item(Button::exit("a", 1u32))
        .item(Label::new("--"))
        .item(Button::exit("b", 2))
        .blank()
        .item(Button::exit("c", 3));
    let mut term = term();
    menu.start().unwrap();

    let mut visited = Vec::new();
    for _ in 0..3 {
        let flow = menu.handle_key(&mut term, InputKey::Down).unwrap();
        assert_eq!(flow, Flow::Continue { redraw: true });
        visited.push(menu.selected());
    }
    assert_eq!(visited, vec![2, 4, 0]);

    menu.handle_key(&mut term, InputKey::Up).unwrap();
    assert_eq!(menu.selected(), 4);
}

#[test]
fn test_window_follows_selection() {
    let mut menu = buttons(&["a", "b", "c", "d", "e", "f"])
        .with_scroll(ScrollSettings::bounded(3).with_margins(1, 1));
    let mut term = term();
    menu.start().unwrap();
    assert_eq!(menu.window(), ScrollWindow { start: 0, end: 3 });

    menu.handle_key(&mut term, InputKey::Down).unwrap();
    assert_eq!(menu.window(), ScrollWindow { start: 0, end: 3 });

    menu.handle_key(&mut term, InputKey::Down).unwrap();
    assert_eq!(menu.window(), ScrollWindow { start: 1, end: 4 });

    // Wrap from the top lands on the last item with the window at the end
    menu.start().unwrap();
    menu.handle_key(&mut term, InputKey::Up).unwrap();
    assert_eq!(menu.selected(), 5);
    assert_eq!(menu.window(), ScrollWindow { start: 3, end: 6 });
}

#[test]
fn test_unbound_key_is_ignored() {
    let mut menu = buttons(&["a", "b"]);
    let mut term = term();
    menu.start().unwrap();
    let flow = menu.handle_key(&mut term, InputKey::Char('x')).unwrap();
    assert_eq!(flow, Flow::Continue { redraw: false });
    assert_eq!(menu.selected(), 0);
}

#[test]
fn test_custom_bindings() {
    let mut settings = Settings::default();
    settings.keys.down = vec!["j".to_string()];
    let mut menu = buttons(&["a", "b"]).apply_settings(&settings);
    let mut term = term();
    menu.start().unwrap();

    menu.handle_key(&mut term, InputKey::Down).unwrap();
    assert_eq!(menu.selected(), 0);
    menu.handle_key(&mut term, InputKey::Char('j')).unwrap();
    assert_eq!(menu.selected(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Escape
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_escape_returns_none() {
    let mut menu = buttons(&["a", "b"]);
    let mut term = term();
    term.push_keys([InputKey::Down, InputKey::Esc]);
    assert_eq!(menu.run(&mut term).unwrap(), None);
    assert_eq!(menu.phase(), Phase::Exiting);
}

#[test]
fn test_escape_disabled_keeps_state() {
    let mut menu = buttons(&["a", "b", "c", "d"])
        .with_scroll(ScrollSettings::bounded(2))
        .allow_escape(false);
    let mut term = term();
    menu.start().unwrap();
    menu.handle_key(&mut term, InputKey::Down).unwrap();
    menu.handle_key(&mut term, InputKey::Down).unwrap();

    let selected = menu.selected();
    let window = menu.window();
    let flow = menu.handle_key(&mut term, InputKey::Esc).unwrap();

    assert_eq!(flow, Flow::Continue { redraw: false });
    assert_eq!(menu.selected(), selected);
    assert_eq!(menu.window(), window);
    assert_eq!(menu.phase(), Phase::Selecting);
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_enter_on_button_returns_result() {
    let mut menu = buttons(&["one", "two"]);
    let mut term = term();
    term.push_keys([InputKey::Down, InputKey::Enter]);
    assert_eq!(menu.run(&mut term).unwrap(), Some(2));
}

#[test]
fn test_toggle_dispatch_requests_redraw() {
    let mut menu: Menu<u32> = Menu::new().item(Toggle::new("Sound", false));
    let mut term = term();
    menu.start().unwrap();

    let flow = menu.handle_key(&mut term, InputKey::Right).unwrap();
    assert_eq!(flow, Flow::Continue { redraw: true });
    assert_eq!(value_of(&menu, 0).as_deref(), Some("on"));
    assert_eq!(menu.phase(), Phase::Selecting);
}

#[test]
fn test_only_clickable_item_ignores_left_right() {
    let mut menu: Menu<u32> = Menu::new().item(TextField::new("Name", "bo"));
    let mut term = term();
    menu.start().unwrap();

    let flow = menu.handle_key(&mut term, InputKey::Left).unwrap();
    assert_eq!(flow, Flow::Continue { redraw: false });
    assert!(term.output().is_empty());
}

#[test]
fn test_text_field_edits_on_its_own_row() {
    let mut menu: Menu<u32> = Menu::new()
        .with_title("Profile")
        .item(Label::new("details"))
        .item(TextField::new("Name", "bo"));
    let mut term = term();
    term.push_keys([
        InputKey::Enter,
        InputKey::Char('b'),
        InputKey::Enter,
        InputKey::Esc,
    ]);

    assert_eq!(menu.run(&mut term).unwrap(), None);
    assert_eq!(value_of(&menu, 1).as_deref(), Some("bob"));
    assert_eq!(
        term.screen(),
        vec!["Profile", "  details", "> Name: [bob]"]
    );
}

#[test]
fn test_nested_menu_from_button() {
    let mut menu = Menu::new()
        .item(Button::exit("plain", 1u32))
        .item(Button::new("More...", |ctx| {
            let mut inner = Menu::new()
                .item(Button::exit("x", 1u32))
                .item(Button::exit("y", 2));
            Ok(match inner.run(&mut *ctx.port)? {
                Some(value) => KeyOutcome::Exit(value + 10),
                None => KeyOutcome::Redraw(true),
            })
        }));
    let mut term = term();
    term.push_keys([
        InputKey::Down,
        InputKey::Enter,
        InputKey::Down,
        InputKey::Enter,
    ]);
    assert_eq!(menu.run(&mut term).unwrap(), Some(12));
}

#[test]
fn test_escaping_nested_menu_returns_to_parent() {
    let mut menu = Menu::new()
        .with_clear_text("")
        .item(Button::new("Open", |ctx| {
            let mut inner = Menu::new().item(Button::exit("inner", 5u32));
            Ok(match inner.run(&mut *ctx.port)? {
                Some(value) => KeyOutcome::Exit(value),
                None => KeyOutcome::Redraw(true),
            })
        }))
        .item(Button::exit("Done", 9));
    let mut term = term();
    term.push_keys([
        InputKey::Enter,
        InputKey::Esc,
        InputKey::Down,
        InputKey::Enter,
    ]);
    assert_eq!(menu.run(&mut term).unwrap(), Some(9));
}

// ─────────────────────────────────────────────────────────────────────────────
// List changes between keys
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_losing_every_selectable_item_fails_mid_session() {
    let mut menu: Menu<u32> = Menu::new()
        .item(Toggle::new("a", false))
        .item(Toggle::new("b", false));
    let mut term = term();
    menu.start().unwrap();

    menu.set_item(0, None).unwrap();
    menu.set_item(1, Some(Box::new(Label::new("gone")))).unwrap();

    assert!(matches!(
        menu.handle_key(&mut term, InputKey::Down),
        Err(Error::NoSelectableItems)
    ));
}

#[test]
fn test_selection_rehomed_when_item_removed() {
    let mut menu: Menu<u32> = Menu::new()
        .item(Toggle::new("a", false))
        .item(Toggle::new("b", false));
    let mut term = term();
    menu.start().unwrap();
    menu.set_item(0, None).unwrap();

    menu.handle_key(&mut term, InputKey::Enter).unwrap();
    assert_eq!(menu.selected(), 1);
    assert_eq!(value_of(&menu, 1).as_deref(), Some("on"));
}

#[test]
fn test_set_item_out_of_range() {
    let mut menu: Menu<u32> = Menu::new().item(Toggle::new("a", false));
    assert!(matches!(
        menu.set_item(3, None),
        Err(Error::ItemOutOfRange { index: 3, len: 1 })
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Drawing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_draw_renders_title_items_and_icons() {
    let mut menu = buttons(&["one", "two"])
        .with_title("Pick")
        .with_clear_text("");
    let mut term = term();
    menu.start().unwrap();
    menu.draw(&mut term).unwrap();

    assert_eq!(term.screen(), vec!["Pick", "> one", "  two"]);
    let frame = menu.last_frame().unwrap();
    assert_eq!(frame.line_of(1), Some(2));
}

#[test]
fn test_run_redraws_after_move() {
    let mut menu = buttons(&["one", "two"]).with_title("Pick");
    let mut term = term();
    term.push_keys([InputKey::Down, InputKey::Esc]);
    menu.run(&mut term).unwrap();
    assert_eq!(term.screen(), vec!["Pick", "  one", "> two"]);
}

#[test]
fn test_redraw_without_clear_text_returns_to_origin() {
    let mut menu = buttons(&["one", "two"]).with_clear_text("");
    let mut term = term();
    term.write("prompt\n").unwrap();
    term.push_keys([InputKey::Down, InputKey::Esc]);
    menu.run(&mut term).unwrap();
    assert_eq!(term.screen(), vec!["prompt", "  one", "> two"]);
}

#[test]
fn test_frame_drawn_on_last_row_edits_scrolled_item_row() {
    let mut menu: Menu<u32> = Menu::new()
        .with_clear_text("")
        .with_title("T")
        .item(Label::new("a"))
        .item(TextField::new("Name", "x"));
    let mut term = ScriptedTerminal::new(40, 4);
    term.set_cursor_position(0, 3).unwrap();

    menu.start().unwrap();
    menu.draw(&mut term).unwrap();
    assert_eq!(term.screen(), vec!["T", "  a", "> Name: [x]"]);

    term.push_keys([InputKey::Char('y'), InputKey::Enter]);
    let flow = menu.handle_key(&mut term, InputKey::Enter).unwrap();
    assert_eq!(flow, Flow::Continue { redraw: true });
    assert_eq!(term.screen(), vec!["T", "  a", "> Name: [xy]"]);

    menu.draw(&mut term).unwrap();
    assert_eq!(term.screen(), vec!["T", "  a", "> Name: [xy]"]);
}

#[test]
fn test_scroll_indicators_drawn() {
    let indicators = ScrollIndicators {
        bottom_continued: Some("  v".to_string()),
        ..ScrollIndicators::default()
    };
    let mut menu = buttons(&["a", "b", "c"])
        .with_clear_text("")
        .with_scroll(ScrollSettings::bounded(2).with_indicators(indicators));
    let mut term = term();
    menu.start().unwrap();
    menu.draw(&mut term).unwrap();
    assert_eq!(term.screen(), vec!["> a", "  b", "  v"]);
}

#[test]
fn test_run_stops_when_input_exhausted() {
    let mut menu = buttons(&["a"]);
    let mut term = term();
    assert!(matches!(menu.run(&mut term), Err(Error::InputExhausted)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Hooks
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct CancelFirstExit {
    cancelled: bool,
}

impl MenuHook<u32> for CancelFirstExit {
    fn name(&self) -> &str {
        "cancel-first-exit"
    }

    fn before_exit(&mut self, _result: Option<&u32>) -> ExitDecision {
        if self.cancelled {
            ExitDecision::Proceed
        } else {
            self.cancelled = true;
            ExitDecision::Cancel(Redraw::Force(true))
        }
    }
}

#[test]
fn test_before_exit_hook_can_cancel() {
    let mut menu = buttons(&["a"]).with_hook(CancelFirstExit::default());
    let mut term = term();
    menu.start().unwrap();

    let flow = menu.handle_key(&mut term, InputKey::Enter).unwrap();
    assert_eq!(flow, Flow::Continue { redraw: true });
    assert_eq!(menu.phase(), Phase::Selecting);

    let flow = menu.handle_key(&mut term, InputKey::Enter).unwrap();
    assert_eq!(flow, Flow::Finished(Some(1)));
}

#[test]
fn test_before_exit_hook_cancels_escape() {
    let mut menu = buttons(&["a"]).with_hook(CancelFirstExit::default());
    let mut term = term();
    term.push_keys([InputKey::Esc, InputKey::Esc]);
    assert_eq!(menu.run(&mut term).unwrap(), None);
}

#[derive(Debug)]
struct Recorder {
    consume: Option<InputKey>,
    keys: Rc<RefCell<Vec<(InputKey, Option<Action>)>>>,
    changes: Rc<RefCell<Vec<(usize, usize)>>>,
    renders: Rc<RefCell<usize>>,
    suppress_redraw: bool,
}

impl Recorder {
    fn new() -> Self {
        Self {
            consume: None,
            keys: Rc::default(),
            changes: Rc::default(),
            renders: Rc::default(),
            suppress_redraw: false,
        }
    }
}

impl MenuHook<u32> for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn after_render(&mut self, _frame: &RenderedFrame) {
        *self.renders.borrow_mut() += 1;
    }

    fn before_key(&mut self, key: &InputKey, _selected: usize) -> KeyDecision {
        if self.consume == Some(*key) {
            KeyDecision::Consumed(Redraw::Force(false))
        } else {
            KeyDecision::Continue
        }
    }

    fn after_key(&mut self, key: &InputKey, action: Option<Action>, _selected: usize) {
        self.keys.borrow_mut().push((*key, action));
    }

    fn selection_changed(&mut self, change: &mut SelectionChange) {
        self.changes.borrow_mut().push((change.old, change.new));
        if self.suppress_redraw {
            change.redraw = Redraw::Force(false);
        }
    }
}

#[test]
fn test_before_key_hook_consumes_key() {
    let recorder = Recorder {
        consume: Some(InputKey::Down),
        ..Recorder::new()
    };
    let keys = recorder.keys.clone();
    let mut menu = buttons(&["a", "b"]).with_hook(recorder);
    let mut term = term();
    menu.start().unwrap();

    let flow = menu.handle_key(&mut term, InputKey::Down).unwrap();
    assert_eq!(flow, Flow::Continue { redraw: false });
    assert_eq!(menu.selected(), 0);
    assert!(keys.borrow().is_empty());
}

#[test]
fn test_selection_and_key_hooks_observe() {
    let recorder = Recorder {
        suppress_redraw: true,
        ..Recorder::new()
    };
    let keys = recorder.keys.clone();
    let changes = recorder.changes.clone();
    let mut menu = buttons(&["a", "b"]).with_hook(recorder);
    let mut term = term();
    menu.start().unwrap();

    let flow = menu.handle_key(&mut term, InputKey::Down).unwrap();
    assert_eq!(flow, Flow::Continue { redraw: false });
    menu.handle_key(&mut term, InputKey::Char('x')).unwrap();

    assert_eq!(*changes.borrow(), vec![(0, 1)]);
    assert_eq!(
        *keys.borrow(),
        vec![
            (InputKey::Down, Some(Action::Down)),
            (InputKey::Char('x'), None),
        ]
    );
}

#[test]
fn test_after_render_called_per_draw() {
    let recorder = Recorder::new();
    let renders = recorder.renders.clone();
    let mut menu = buttons(&["a", "b"]).with_hook(recorder);
    let mut term = term();
    term.push_keys([InputKey::Down, InputKey::Char('x'), InputKey::Esc]);
    menu.run(&mut term).unwrap();
    // Initial frame plus the redraw after Down
    assert_eq!(*renders.borrow(), 2);
}

#[derive(Debug)]
struct Banner;

impl MenuHook<u32> for Banner {
    fn name(&self) -> &str {
        "banner"
    }

    fn on_render(&mut self, stage: Stage, _text: &str, frame: &FrameContext<'_>) -> Intercept {
        match stage {
            Stage::Title => Intercept::ReplaceText(format!("{} items\n", frame.total)),
            _ => Intercept::Continue,
        }
    }
}

#[test]
fn test_render_hook_replaces_title() {
    let mut menu = buttons(&["a", "b"]).with_clear_text("").with_hook(Banner);
    let mut term = term();
    menu.start().unwrap();
    menu.draw(&mut term).unwrap();
    assert_eq!(term.screen(), vec!["2 items", "> a", "  b"]);
}

#[test]
fn test_item_at_exposes_item_text() {
    let menu: Menu<u32> = Menu::new().item(TextField::new("Name", "ann"));
    let text: ItemText = menu.item_at(0).unwrap().text();
    assert_eq!(text.value.as_deref(), Some("ann"));
    assert!(menu.item_at(5).is_none());
}
