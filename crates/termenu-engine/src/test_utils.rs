//! Test utilities for driving menus without a real terminal
//!
//! [`ScriptedTerminal`] is an in-memory [`TerminalPort`]: it keeps a
//! character grid and a cursor, interprets the escape sequences the engine
//! emits, and replays a queue of scripted keys. When the queue runs dry it
//! returns [`Error::InputExhausted`] instead of blocking.

use std::collections::VecDeque;

use termenu_core::ansi::ESC;
use termenu_core::metrics::TAB_WIDTH;
use termenu_core::prelude::*;

use crate::input_key::InputKey;
use crate::port::TerminalPort;

/// In-memory terminal with a virtual screen and scripted input
#[derive(Debug, Clone)]
pub struct ScriptedTerminal {
    cols: u16,
    rows: u16,
    screen: Vec<Vec<char>>,
    cursor: (u16, u16),
    saved: Option<(u16, u16)>,
    keys: VecDeque<InputKey>,
    lines: VecDeque<String>,
    output: String,
}

impl ScriptedTerminal {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            screen: vec![vec![' '; usize::from(cols)]; usize::from(rows)],
            cursor: (0, 0),
            saved: None,
            keys: VecDeque::new(),
            lines: VecDeque::new(),
            output: String::new(),
        }
    }

    pub fn push_key(&mut self, key: InputKey) {
        self.keys.push_back(key);
    }

    pub fn push_keys(&mut self, keys: impl IntoIterator<Item = InputKey>) {
        self.keys.extend(keys);
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    /// Keys not yet read
    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }

    /// Everything written so far, escape sequences included
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Return and clear the captured output
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Row `row` of the virtual screen with trailing blanks removed
    pub fn screen_line(&self, row: u16) -> String {
        self.screen
            .get(usize::from(row))
            .map(|line| line.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// Every screen row, trailing blank rows removed
    pub fn screen(&self) -> Vec<String> {
        let mut lines: Vec<String> = (0..self.rows).map(|row| self.screen_line(row)).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        lines
    }

    /// Virtual cursor as `(column, row)`
    pub fn cursor(&self) -> (u16, u16) {
        (self.cursor.0.min(self.cols - 1), self.cursor.1)
    }

    fn newline(&mut self) {
        self.cursor.0 = 0;
        if self.cursor.1 + 1 >= self.rows {
            self.screen.remove(0);
            self.screen.push(vec![' '; usize::from(self.cols)]);
        } else {
            self.cursor.1 += 1;
        }
    }

    fn put(&mut self, c: char) {
        let (col, row) = self.cursor;
        if col < self.cols {
            self.screen[usize::from(row)][usize::from(col)] = c;
            self.cursor.0 += 1;
        }
    }

    fn clear_line(&mut self, mode: u16) {
        let row = usize::from(self.cursor.1);
        let col = usize::from(self.cursor.0.min(self.cols));
        let range = match mode {
            1 => 0..(col + 1).min(usize::from(self.cols)),
            2 => 0..usize::from(self.cols),
            _ => col..usize::from(self.cols),
        };
        for cell in &mut self.screen[row][range] {
            *cell = ' ';
        }
    }

    fn clear_screen(&mut self, mode: u16) {
        match mode {
            2 | 3 => {
                for line in &mut self.screen {
                    line.fill(' ');
                }
            }
            _ => {
                self.clear_line(0);
                for line in self.screen.iter_mut().skip(usize::from(self.cursor.1) + 1) {
                    line.fill(' ');
                }
            }
        }
    }

    fn apply_csi(&mut self, params: &str, action: char) {
        let numbers: Vec<u16> = params
            .split(';')
            .map(|p| p.parse::<u16>().unwrap_or(0))
            .collect();
        let first = numbers.first().copied().unwrap_or(0);
        let count = first.max(1);
        let max_col = self.cols - 1;
        let max_row = self.rows - 1;

        match action {
            'H' | 'f' => {
                let row = first.max(1) - 1;
                let col = numbers.get(1).copied().unwrap_or(1).max(1) - 1;
                self.cursor = (col.min(max_col), row.min(max_row));
            }
            'A' => self.cursor.1 = self.cursor.1.saturating_sub(count),
            'B' => self.cursor.1 = self.cursor.1.saturating_add(count).min(max_row),
            'C' => self.cursor.0 = self.cursor.0.saturating_add(count).min(max_col),
            'D' => self.cursor.0 = self.cursor.0.min(max_col).saturating_sub(count),
            'K' => self.clear_line(first),
            'J' => self.clear_screen(first),
            's' => self.saved = Some(self.cursor),
            'u' => {
                if let Some(saved) = self.saved {
                    self.cursor = saved;
                }
            }
            // Styling and anything else has no effect on the grid
            _ => {}
        }
    }

    fn interpret(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                ESC => {
                    if chars.peek() != Some(&'[') {
                        chars.next();
                        continue;
                    }
                    chars.next();
                    let mut params = String::new();
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            self.apply_csi(&params, next);
                            break;
                        }
                        params.push(next);
                    }
                }
                '\n' => self.newline(),
                '\r' => self.cursor.0 = 0,
                '\t' => {
                    let tab = TAB_WIDTH as u16;
                    let next_stop = (self.cursor.0 / tab + 1) * tab;
                    self.cursor.0 = next_stop.min(self.cols - 1);
                }
                '\u{8}' => self.cursor.0 = self.cursor.0.min(self.cols).saturating_sub(1),
                c => self.put(c),
            }
        }
    }
}

impl TerminalPort for ScriptedTerminal {
    fn size(&self) -> Result<(u16, u16)> {
        Ok((self.cols, self.rows))
    }

    fn cursor_position(&mut self) -> Result<(u16, u16)> {
        Ok(self.cursor())
    }

    fn set_cursor_position(&mut self, col: u16, row: u16) -> Result<()> {
        self.cursor = (col.min(self.cols - 1), row.min(self.rows - 1));
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.output.push_str(text);
        self.interpret(text);
        Ok(())
    }

    fn read_key(&mut self, echo: bool) -> Result<InputKey> {
        let key = self.keys.pop_front().ok_or(Error::InputExhausted)?;
        if echo {
            if let Some(c) = key.printable() {
                self.write(&c.to_string())?;
            }
        }
        Ok(key)
    }

    fn read_line(&mut self) -> Result<String> {
        let line = self.lines.pop_front().ok_or(Error::InputExhausted)?;
        self.write(&line)?;
        self.write("\n")?;
        Ok(line)
    }
}
