//! Render pipeline
//!
//! Assembles one frame of a menu as text: clear text, title, top scroll
//! indicator, one line per visible item and the bottom scroll indicator.
//! Each stage is offered to the registered hooks, which may replace the
//! stage text or the whole frame.

use termenu_core::prelude::*;

use crate::hooks::{Intercept, MenuHook};
use crate::item::{CursorIcon, ItemSlot};
use crate::scroll::{ScrollIndicators, ScrollWindow};

/// One stage of frame assembly, in drawing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Clear,
    Title,
    TopIndicator,
    /// A visible item slot, by index into the item list
    Item(usize),
    BottomIndicator,
}

/// Read-only view of the session state a frame is built from
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub selected: usize,
    pub window: ScrollWindow,
    pub total: usize,
    pub icons: &'a CursorIcon,
}

/// An assembled frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFrame {
    /// Written before the frame origin is measured
    pub clear: String,
    /// Title, indicators and items
    pub body: String,
    /// Line offset of each drawn item within `body`
    pub item_lines: Vec<(usize, usize)>,
    /// A hook substituted the whole frame
    pub replaced: bool,
}

impl RenderedFrame {
    /// Line offset of item `index` within the body, if it was drawn
    pub fn line_of(&self, index: usize) -> Option<usize> {
        self.item_lines
            .iter()
            .find(|(item, _)| *item == index)
            .map(|(_, line)| *line)
    }

    /// The full text written to the terminal
    pub fn text(&self) -> String {
        format!("{}{}", self.clear, self.body)
    }
}

/// Inputs of a frame that are not session state
#[derive(Debug, Clone, Copy)]
pub struct FrameText<'a> {
    pub clear: &'a str,
    pub title: Option<&'a str>,
    pub indicators: &'a ScrollIndicators,
}

fn line(text: Option<&str>) -> String {
    match text {
        Some(text) if text.ends_with('\n') => text.to_string(),
        Some(text) => format!("{}\n", text),
        None => String::new(),
    }
}

/// Run one stage through the hook chain.
///
/// Returns `Err(frame)` when a hook replaced the whole frame.
fn intercept<T>(
    stage: Stage,
    mut text: String,
    ctx: &FrameContext<'_>,
    hooks: &mut [Box<dyn MenuHook<T>>],
) -> std::result::Result<String, String> {
    for hook in hooks.iter_mut() {
        match hook.on_render(stage, &text, ctx) {
            Intercept::Continue => {}
            Intercept::ReplaceText(replacement) => {
                trace!("Hook '{}' replaced {:?}", hook.name(), stage);
                text = replacement;
            }
            Intercept::ReplaceFrame(frame) => {
                debug!("Hook '{}' replaced the frame at {:?}", hook.name(), stage);
                return Err(frame);
            }
        }
    }
    Ok(text)
}

/// Assemble a frame for `items` as seen through `ctx.window`.
pub fn render_frame<T>(
    text: FrameText<'_>,
    items: &[ItemSlot<T>],
    ctx: &FrameContext<'_>,
    hooks: &mut [Box<dyn MenuHook<T>>],
) -> RenderedFrame {
    match assemble(text, items, ctx, hooks) {
        Ok(frame) => frame,
        Err(replacement) => RenderedFrame {
            clear: String::new(),
            body: replacement,
            item_lines: Vec::new(),
            replaced: true,
        },
    }
}

fn assemble<T>(
    text: FrameText<'_>,
    items: &[ItemSlot<T>],
    ctx: &FrameContext<'_>,
    hooks: &mut [Box<dyn MenuHook<T>>],
) -> std::result::Result<RenderedFrame, String> {
    let mut frame = RenderedFrame {
        clear: intercept(Stage::Clear, text.clear.to_string(), ctx, hooks)?,
        ..RenderedFrame::default()
    };

    frame
        .body
        .push_str(&intercept(Stage::Title, line(text.title), ctx, hooks)?);

    let indicators = text.indicators;
    let top = if ctx.window.has_hidden_above() {
        indicators.top_continued.as_deref()
    } else {
        indicators.top_ended.as_deref()
    };
    frame
        .body
        .push_str(&intercept(Stage::TopIndicator, line(top), ctx, hooks)?);

    for index in ctx.window.start..ctx.window.end.min(items.len()) {
        let rendered = match &items[index] {
            Some(item) => item.render(ctx.icons.pair(index == ctx.selected)),
            None => "\n".to_string(),
        };
        let rendered = intercept(Stage::Item(index), rendered, ctx, hooks)?;
        frame
            .item_lines
            .push((index, frame.body.matches('\n').count()));
        frame.body.push_str(&rendered);
    }

    let bottom = if ctx.window.has_hidden_below(ctx.total) {
        indicators.bottom_continued.as_deref()
    } else {
        indicators.bottom_ended.as_deref()
    };
    frame
        .body
        .push_str(&intercept(Stage::BottomIndicator, line(bottom), ctx, hooks)?);

    Ok(frame)
}
