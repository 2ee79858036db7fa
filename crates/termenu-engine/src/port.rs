//! Terminal port: the raw terminal I/O the engine consumes
//!
//! Implemented over crossterm by `termenu-tui` and in memory by
//! [`crate::test_utils::ScriptedTerminal`]. A port is used by exactly one
//! session at a time; nested menus borrow it for the duration of their run.

use termenu_core::prelude::*;

use crate::input_key::InputKey;

/// Raw terminal capabilities. Positions are zero-based `(column, row)`.
pub trait TerminalPort {
    /// Buffer size as `(columns, rows)`
    fn size(&self) -> Result<(u16, u16)>;

    /// Current absolute cursor position
    fn cursor_position(&mut self) -> Result<(u16, u16)>;

    /// Move the cursor to an absolute position
    fn set_cursor_position(&mut self, col: u16, row: u16) -> Result<()>;

    /// Move the cursor by a relative offset, clamped to the buffer bounds
    fn move_cursor(&mut self, dx: i32, dy: i32) -> Result<()> {
        let (cols, rows) = self.size()?;
        let (col, row) = self.cursor_position()?;
        let col = (i32::from(col) + dx).clamp(0, i32::from(cols.saturating_sub(1)));
        let row = (i32::from(row) + dy).clamp(0, i32::from(rows.saturating_sub(1)));
        self.set_cursor_position(col as u16, row as u16)
    }

    /// Write raw text, escape sequences included
    fn write(&mut self, text: &str) -> Result<()>;

    /// Write raw text followed by a newline
    fn write_line(&mut self, text: &str) -> Result<()> {
        self.write(text)?;
        self.write("\n")
    }

    /// Flush buffered output
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Block until one key is pressed, optionally echoing printable keys
    fn read_key(&mut self, echo: bool) -> Result<InputKey>;

    /// Block until a full line has been entered
    fn read_line(&mut self) -> Result<String>;
}
