//! Display metrics: on-screen width of raw terminal text
//!
//! Text drawn by a menu mixes ordinary glyphs with tabs, carriage returns,
//! backspaces and invisible escape sequences. [`display_width`] measures the
//! number of columns such text occupies when printed from a known starting
//! column, and [`offset_for_width`] maps a target width back to a character
//! index in the original string.
//!
//! Scanning rules, applied left to right:
//! - tab: jump to the next multiple-of-8 column (measured from the absolute
//!   starting column), then occupy one cell there
//! - carriage return: remember the widest line so far, then move back to
//!   absolute column 0
//! - backspace: step back one column
//! - escape (only when escape processing is on and the escape is not part of
//!   a complete CSI sequence): swallow itself and the following character
//! - anything else: one column
//!
//! Every index is a `char` index.

use crate::ansi::{self, SegmentKind, ESC};

/// Tab stop interval
pub const TAB_WIDTH: i64 = 8;

/// Incremental width scanner.
///
/// `length` may go negative: a carriage return resets it to `-starting_column`
/// so that the next character lands on absolute column 0.
#[derive(Debug, Clone)]
struct Scanner {
    starting_column: i64,
    length: i64,
    max_seen: i64,
    escape_codes: bool,
}

impl Scanner {
    fn new(starting_column: usize, escape_codes: bool) -> Self {
        Self {
            starting_column: starting_column as i64,
            length: 0,
            max_seen: 0,
            escape_codes,
        }
    }

    fn width(&self) -> usize {
        self.length.max(self.max_seen).max(0) as usize
    }

    /// Consume the character at `index`, returning the index of the next
    /// unconsumed character.
    fn step(&mut self, chars: &[char], index: usize) -> usize {
        match chars[index] {
            '\t' => {
                let column = self.starting_column + self.length;
                let next_stop = column - column.rem_euclid(TAB_WIDTH) + TAB_WIDTH;
                self.length = next_stop - self.starting_column + 1;
            }
            '\r' => {
                self.max_seen = self.max_seen.max(self.length);
                self.length = -self.starting_column;
            }
            '\x08' => self.length -= 1,
            ESC if self.escape_codes => return (index + 2).min(chars.len()),
            _ => self.length += 1,
        }
        index + 1
    }
}

fn measured_chars(text: &str, escape_codes: bool) -> Vec<char> {
    if escape_codes {
        ansi::strip_escape_codes(text).chars().collect()
    } else {
        text.chars().collect()
    }
}

/// Number of terminal columns `text` occupies when printed starting at
/// `starting_column`.
///
/// With `escape_codes` set, complete CSI sequences are stripped before
/// measuring and count as zero width.
///
/// # Examples
///
/// ```
/// use termenu_core::metrics::display_width;
///
/// assert_eq!(display_width("abc", 0, false), 3);
/// assert_eq!(display_width("a\tb", 0, false), 10);
/// assert_eq!(display_width("\x1b[1mbold\x1b[0m", 0, true), 4);
/// ```
pub fn display_width(text: &str, starting_column: usize, escape_codes: bool) -> usize {
    let chars = measured_chars(text, escape_codes);
    let mut scanner = Scanner::new(starting_column, escape_codes);
    let mut index = 0;
    while index < chars.len() {
        index = scanner.step(&chars, index);
    }
    scanner.width()
}

/// Width of the first `count` characters of `chars`.
pub fn prefix_width(
    chars: &[char],
    count: usize,
    starting_column: usize,
    escape_codes: bool,
) -> usize {
    let prefix: String = chars[..count.min(chars.len())].iter().collect();
    display_width(&prefix, starting_column, escape_codes)
}

/// Char index at which the width of `text[start_index..index]` first reaches
/// `target_width`.
///
/// When the whole text is narrower than `target_width` the text length is
/// returned. Returns `None` when there is nothing to measure (the text is
/// empty after stripping escape sequences).
///
/// With `escape_codes` set the scan runs over the stripped text and the
/// resulting index is mapped back into `text`, landing directly after the
/// last visible character counted. Positions that differ only by zero-width
/// escape sequences therefore resolve to the earliest of them.
pub fn offset_for_width(
    text: &str,
    target_width: usize,
    start_index: usize,
    starting_column: usize,
    escape_codes: bool,
) -> Option<usize> {
    let chars = measured_chars(text, escape_codes);
    if chars.is_empty() {
        return None;
    }

    let mut scanner = Scanner::new(starting_column, escape_codes);
    let mut index = start_index.min(chars.len());
    while scanner.width() < target_width && index < chars.len() {
        index = scanner.step(&chars, index);
    }

    if escape_codes {
        Some(unstripped_index(text, index))
    } else {
        Some(index)
    }
}

/// Map an index into the stripped form of `text` back into `text` by walking
/// the literal/escape segments and counting only literal characters.
fn unstripped_index(text: &str, stripped_index: usize) -> usize {
    if stripped_index == 0 {
        return 0;
    }

    let mut consumed = 0;
    for segment in ansi::escape_segments(text) {
        if segment.kind != SegmentKind::Literal {
            continue;
        }
        if stripped_index - consumed <= segment.len {
            return segment.start + (stripped_index - consumed);
        }
        consumed += segment.len;
    }

    text.chars().count()
}
