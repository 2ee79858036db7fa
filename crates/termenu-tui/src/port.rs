//! crossterm-backed terminal port

use std::io::{self, Stdout, Write};

use crossterm::{cursor, terminal};
use termenu_core::ansi;
use termenu_core::prelude::*;
use termenu_engine::{InputKey, TerminalPort};

use crate::event;

/// Terminal port writing to `out` and reading keys from the terminal.
///
/// Meant to run inside a [`RawModeGuard`](crate::RawModeGuard): line feeds
/// are written as CR LF because raw mode disables output translation.
#[derive(Debug)]
pub struct CrosstermPort<W: Write = Stdout> {
    out: W,
}

impl CrosstermPort<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CrosstermPort<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        let mut last = '\0';
        let mut converted = String::with_capacity(text.len());
        for c in text.chars() {
            if c == '\n' && last != '\r' {
                converted.push('\r');
            }
            converted.push(c);
            last = c;
        }
        self.out.write_all(converted.as_bytes())?;
        Ok(())
    }
}

impl<W: Write> TerminalPort for CrosstermPort<W> {
    fn size(&self) -> Result<(u16, u16)> {
        terminal::size().map_err(|e| Error::terminal(e.to_string()))
    }

    fn cursor_position(&mut self) -> Result<(u16, u16)> {
        // Pending output must reach the terminal before it reports a position
        self.out.flush()?;
        cursor::position().map_err(|e| Error::terminal(e.to_string()))
    }

    fn set_cursor_position(&mut self, col: u16, row: u16) -> Result<()> {
        self.emit(&ansi::move_to(col, row))
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) -> Result<()> {
        let mut seq = String::new();
        let clamp = |n: i32| u16::try_from(n.unsigned_abs()).unwrap_or(u16::MAX);
        match dx {
            0 => {}
            dx if dx > 0 => seq.push_str(&ansi::move_right(clamp(dx))),
            dx => seq.push_str(&ansi::move_left(clamp(dx))),
        }
        match dy {
            0 => {}
            dy if dy > 0 => seq.push_str(&ansi::move_down(clamp(dy))),
            dy => seq.push_str(&ansi::move_up(clamp(dy))),
        }
        self.emit(&seq)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.emit(text)
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn read_key(&mut self, echo: bool) -> Result<InputKey> {
        self.flush()?;
        let key = event::read_key()?;
        if echo {
            if let Some(c) = key.printable() {
                self.emit(&c.to_string())?;
                self.flush()?;
            }
        }
        Ok(key)
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        loop {
            let key = self.read_key(true)?;
            match key {
                InputKey::Enter => break,
                InputKey::Backspace => {
                    if line.pop().is_some() {
                        self.emit("\u{8} \u{8}")?;
                        self.flush()?;
                    }
                }
                key => {
                    if let Some(c) = key.printable() {
                        line.push(c);
                    }
                }
            }
        }
        self.emit("\n")?;
        self.flush()?;
        Ok(line)
    }
}
