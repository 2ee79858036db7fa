//! Menu session: the top-level state machine
//!
//! A [`Menu`] owns its item list, binding table, scroll and cursor settings
//! and registered hooks. [`Menu::run`] drives it on a terminal port until an
//! item returns a result or the user escapes; [`Menu::handle_key`] advances
//! it by one key for callers that own the input loop.

#[cfg(test)]
mod tests;

use termenu_core::ansi::CLEAR_SCREEN;
use termenu_core::prelude::*;

use crate::bindings::{Action, IgnoreContext, KeyBindings};
use crate::config::Settings;
use crate::hooks::{ExitDecision, KeyDecision, MenuHook};
use crate::input_key::InputKey;
use crate::item::{is_selectable_slot, CursorIcon, ItemContext, ItemSlot, KeyOutcome, MenuItem};
use crate::port::TerminalPort;
use crate::render::{render_frame, FrameContext, FrameText, RenderedFrame};
use crate::scroll::{ScrollSettings, ScrollWindow};
use crate::selection::{first_selectable, move_selection, Direction, SelectionChange};

/// Where the session is in its key cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a key
    #[default]
    Selecting,
    /// The focused item is handling a key
    Dispatching,
    /// An exit is pending or complete
    Exiting,
}

/// Result of handling one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow<T> {
    /// Stay in the menu; redraw if `redraw`
    Continue { redraw: bool },
    /// The session ended: `Some` with an item result, `None` when escaped
    Finished(Option<T>),
}

/// An interactive menu over items producing results of type `T`
pub struct Menu<T> {
    title: Option<String>,
    items: Vec<ItemSlot<T>>,
    selected: usize,
    window: ScrollWindow,
    bindings: KeyBindings,
    scroll: ScrollSettings,
    icons: CursorIcon,
    clear_text: String,
    allow_escape: bool,
    escape_codes: bool,
    hooks: Vec<Box<dyn MenuHook<T>>>,
    phase: Phase,
    started: bool,
    last_frame: Option<RenderedFrame>,
    frame_origin: Option<(u16, u16)>,
}

impl<T> Default for Menu<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Menu<T> {
    pub fn new() -> Self {
        Self {
            title: None,
            items: Vec::new(),
            selected: 0,
            window: ScrollWindow::default(),
            bindings: KeyBindings::default(),
            scroll: ScrollSettings::default(),
            icons: CursorIcon::default(),
            clear_text: CLEAR_SCREEN.to_string(),
            allow_escape: true,
            escape_codes: true,
            hooks: Vec::new(),
            phase: Phase::Selecting,
            started: false,
            last_frame: None,
            frame_origin: None,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Builder
    // ─────────────────────────────────────────────────────────

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn item(mut self, item: impl MenuItem<T> + 'static) -> Self {
        self.items.push(Some(Box::new(item)));
        self
    }

    /// Append a blank, unselectable line
    pub fn blank(mut self) -> Self {
        self.items.push(None);
        self
    }

    pub fn push_item(&mut self, slot: ItemSlot<T>) {
        self.items.push(slot);
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_scroll(mut self, scroll: ScrollSettings) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn with_cursor(mut self, icons: CursorIcon) -> Self {
        self.icons = icons;
        self
    }

    /// Text written before every frame; clears the screen by default
    pub fn with_clear_text(mut self, clear_text: impl Into<String>) -> Self {
        self.clear_text = clear_text.into();
        self
    }

    pub fn allow_escape(mut self, allow: bool) -> Self {
        self.allow_escape = allow;
        self
    }

    /// Treat escape sequences in item text as zero-width
    pub fn escape_codes(mut self, enabled: bool) -> Self {
        self.escape_codes = enabled;
        self
    }

    pub fn with_hook(mut self, hook: impl MenuHook<T> + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Take bindings, scrolling, cursor and display options from settings
    pub fn apply_settings(mut self, settings: &Settings) -> Self {
        self.bindings = settings.key_bindings();
        self.scroll = settings.scroll_settings();
        self.icons = settings.cursor_icon();
        if let Some(clear_text) = &settings.display.clear_text {
            self.clear_text = clear_text.clone();
        }
        self.allow_escape = settings.display.allow_escape;
        self.escape_codes = settings.display.escape_codes;
        self
    }

    // ─────────────────────────────────────────────────────────
    // State
    // ─────────────────────────────────────────────────────────

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn window(&self) -> ScrollWindow {
        self.window
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `index`, `None` for blank slots and out-of-range indices
    pub fn item_at(&self, index: usize) -> Option<&dyn MenuItem<T>> {
        self.items.get(index)?.as_deref()
    }

    /// Replace the slot at `index`
    pub fn set_item(&mut self, index: usize, slot: ItemSlot<T>) -> Result<()> {
        let len = self.items.len();
        let target = self
            .items
            .get_mut(index)
            .ok_or_else(|| Error::item_out_of_range(index, len))?;
        *target = slot;
        Ok(())
    }

    /// The most recently drawn frame
    pub fn last_frame(&self) -> Option<&RenderedFrame> {
        self.last_frame.as_ref()
    }

    // ─────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────

    /// Validate the item list and select the first selectable item.
    pub fn start(&mut self) -> Result<()> {
        let first = first_selectable(&self.items).ok_or(Error::NoSelectableItems)?;
        self.selected = first;
        self.window = ScrollWindow::compute(self.items.len(), first, 0, &self.scroll);
        self.phase = Phase::Selecting;
        self.started = true;
        self.last_frame = None;
        self.frame_origin = None;
        debug!(
            "Menu session started: {} items, selected {}, window {:?}",
            self.items.len(),
            first,
            self.window
        );
        Ok(())
    }

    /// Fail fast when nothing is selectable; re-home a selection that no
    /// longer points at a selectable item.
    fn ensure_selection(&mut self) -> Result<()> {
        if self.items.get(self.selected).is_some_and(is_selectable_slot) {
            return Ok(());
        }
        let first = first_selectable(&self.items).ok_or(Error::NoSelectableItems)?;
        warn!(
            "Selected item {} is no longer selectable, moving to {}",
            self.selected, first
        );
        self.selected = first;
        self.update_window();
        Ok(())
    }

    fn update_window(&mut self) {
        self.window = ScrollWindow::compute(
            self.items.len(),
            self.selected,
            self.window.start,
            &self.scroll,
        );
    }

    /// Assemble the current frame without drawing it
    pub fn render(&mut self) -> RenderedFrame {
        let ctx = FrameContext {
            selected: self.selected,
            window: self.window,
            total: self.items.len(),
            icons: &self.icons,
        };
        let text = FrameText {
            clear: &self.clear_text,
            title: self.title.as_deref(),
            indicators: &self.scroll.indicators,
        };
        render_frame(text, &self.items, &ctx, &mut self.hooks)
    }

    /// Render and write the current frame.
    ///
    /// The frame origin is where the body starts on screen; item rows handed
    /// to items are measured from it. Writing the body may scroll the
    /// terminal, so the origin row is counted back from where the body ends.
    pub fn draw(&mut self, port: &mut dyn TerminalPort) -> Result<()> {
        let frame = self.render();
        if !frame.clear.is_empty() {
            port.write(&frame.clear)?;
        } else if let Some((col, row)) = self.frame_origin {
            port.set_cursor_position(col, row)?;
        }
        let (col, start_row) = port.cursor_position()?;
        port.write(&frame.body)?;
        port.flush()?;

        let (_, end_row) = port.cursor_position()?;
        let lines = u16::try_from(frame.body.matches('\n').count()).unwrap_or(u16::MAX);
        let row = end_row.saturating_sub(lines).min(start_row);
        if row != start_row {
            trace!("Frame scrolled the terminal, origin row {} -> {}", start_row, row);
        }
        self.frame_origin = Some((col, row));

        for hook in self.hooks.iter_mut() {
            hook.after_render(&frame);
        }
        self.last_frame = Some(frame);
        Ok(())
    }

    /// Screen row of the first line of item `index` in the last frame
    fn item_row(&self, index: usize) -> u16 {
        let origin_row = self.frame_origin.map(|(_, row)| row).unwrap_or(0);
        let line = self
            .last_frame
            .as_ref()
            .and_then(|frame| frame.line_of(index))
            .unwrap_or(0);
        origin_row.saturating_add(u16::try_from(line).unwrap_or(u16::MAX))
    }

    /// Handle one key.
    ///
    /// Starts the session on first use. Fails with
    /// [`Error::NoSelectableItems`] when the item list has lost every
    /// selectable item.
    pub fn handle_key(&mut self, port: &mut dyn TerminalPort, key: InputKey) -> Result<Flow<T>> {
        if !self.started {
            self.start()?;
        }
        self.ensure_selection()?;

        for hook in self.hooks.iter_mut() {
            if let KeyDecision::Consumed(redraw) = hook.before_key(&key, self.selected) {
                trace!("Hook '{}' consumed {}", hook.name(), key);
                return Ok(Flow::Continue {
                    redraw: redraw.resolve(true),
                });
            }
        }

        let context = self.items[self.selected]
            .as_ref()
            .and_then(|item| IgnoreContext::for_item(item.is_clickable(), item.is_only_clickable()));
        let action = self.bindings.resolve(&key, context);
        trace!("Key {} -> {:?} (context {:?})", key, action, context);

        let flow = match action {
            None => Flow::Continue { redraw: false },
            Some(Action::Up) => self.move_selection(Direction::Up)?,
            Some(Action::Down) => self.move_selection(Direction::Down)?,
            Some(Action::Escape) if self.allow_escape => self.finish(None),
            Some(Action::Escape) => {
                trace!("Escape ignored, escaping is disabled");
                Flow::Continue { redraw: false }
            }
            Some(action) => self.dispatch(port, action, key)?,
        };

        if let Flow::Continue { .. } = flow {
            for hook in self.hooks.iter_mut() {
                hook.after_key(&key, action, self.selected);
            }
        }
        Ok(flow)
    }

    fn move_selection(&mut self, direction: Direction) -> Result<Flow<T>> {
        let old = self.selected;
        self.selected = move_selection(old, direction, &self.items)?;
        self.update_window();

        let mut change = SelectionChange::new(old, self.selected);
        if change.changed() {
            trace!("Selection {} -> {}", old, self.selected);
            for hook in self.hooks.iter_mut() {
                hook.selection_changed(&mut change);
            }
        }
        Ok(Flow::Continue {
            redraw: change.redraw.resolve(change.changed()),
        })
    }

    fn dispatch(
        &mut self,
        port: &mut dyn TerminalPort,
        action: Action,
        key: InputKey,
    ) -> Result<Flow<T>> {
        let row = self.item_row(self.selected);
        let Some(item) = self.items[self.selected].as_mut() else {
            return Ok(Flow::Continue { redraw: false });
        };

        self.phase = Phase::Dispatching;
        let mut ctx = ItemContext {
            port,
            icons: &self.icons,
            bindings: &self.bindings,
            key,
            row,
            escape_codes: self.escape_codes,
        };
        let outcome = item.handle_key(action, &mut ctx);
        self.phase = Phase::Selecting;

        match outcome? {
            KeyOutcome::Redraw(redraw) => {
                trace!("Item {} handled {} (redraw {})", self.selected, action, redraw);
                Ok(Flow::Continue { redraw })
            }
            KeyOutcome::Exit(value) => {
                debug!("Item {} returned a result", self.selected);
                Ok(self.finish(Some(value)))
            }
        }
    }

    /// Offer a pending exit to the hooks
    fn finish(&mut self, result: Option<T>) -> Flow<T> {
        self.phase = Phase::Exiting;
        for hook in self.hooks.iter_mut() {
            if let ExitDecision::Cancel(redraw) = hook.before_exit(result.as_ref()) {
                debug!("Hook '{}' cancelled the exit", hook.name());
                self.phase = Phase::Selecting;
                return Flow::Continue {
                    redraw: redraw.resolve(false),
                };
            }
        }
        debug!(
            "Menu session finished ({})",
            if result.is_some() { "result" } else { "escaped" }
        );
        Flow::Finished(result)
    }

    /// Run the session on `port` until it finishes.
    ///
    /// Returns `Some` with an item's result, or `None` when the user escaped.
    pub fn run(&mut self, port: &mut dyn TerminalPort) -> Result<Option<T>> {
        self.start()?;
        self.draw(port)?;
        loop {
            let key = port.read_key(false)?;
            match self.handle_key(port, key)? {
                Flow::Continue { redraw: true } => self.draw(port)?,
                Flow::Continue { redraw: false } => {}
                Flow::Finished(result) => return Ok(result),
            }
        }
    }
}
