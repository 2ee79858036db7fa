//! Escape sequence vocabulary and detection
//!
//! The menu engine emits a small fixed set of CSI sequences (cursor save and
//! restore, absolute and relative moves, clear-to-end-of-line) and treats any
//! other CSI sequence embedded in item text as opaque, zero-width styling.
//!
//! All offsets produced here are measured in `char`s, never bytes, because the
//! line editor and display metrics index text by character.

use regex::Regex;
use std::sync::LazyLock;

/// Regex pattern for CSI escape sequences.
///
/// ESC, `[`, any run of characters outside `@`..`~`, then one final
/// character inside `@`..`~`.
static ESCAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[^@-~]*[@-~]").expect("escape regex pattern is valid")
});

/// The escape character
pub const ESC: char = '\x1b';

/// Save cursor position
pub const CURSOR_SAVE: &str = "\x1b[s";

/// Restore cursor position saved with [`CURSOR_SAVE`]
pub const CURSOR_RESTORE: &str = "\x1b[u";

/// Clear from the cursor to the end of the line
pub const CLEAR_TO_EOL: &str = "\x1b[0K";

/// Default clear-screen text: erase display, then home the cursor
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Absolute cursor position. `col` and `row` are zero-based; the emitted
/// sequence is one-based as terminals expect.
pub fn move_to(col: u16, row: u16) -> String {
    format!("\x1b[{};{}H", u32::from(row) + 1, u32::from(col) + 1)
}

/// Move the cursor up `n` rows. Zero emits nothing, since most terminals
/// treat a zero count as one.
pub fn move_up(n: u16) -> String {
    relative(n, 'A')
}

/// Move the cursor down `n` rows
pub fn move_down(n: u16) -> String {
    relative(n, 'B')
}

/// Move the cursor right `n` columns
pub fn move_right(n: u16) -> String {
    relative(n, 'C')
}

/// Move the cursor left `n` columns
pub fn move_left(n: u16) -> String {
    relative(n, 'D')
}

fn relative(n: u16, command: char) -> String {
    if n == 0 {
        String::new()
    } else {
        format!("\x1b[{}{}", n, command)
    }
}

/// Strip all CSI escape sequences from a string.
///
/// # Examples
///
/// ```
/// use termenu_core::ansi::strip_escape_codes;
///
/// assert_eq!(strip_escape_codes("\x1b[31mred\x1b[0m"), "red");
/// assert_eq!(strip_escape_codes("plain"), "plain");
/// ```
pub fn strip_escape_codes(input: &str) -> String {
    ESCAPE_PATTERN.replace_all(input, "").into_owned()
}

/// Check if a string contains CSI escape sequences.
pub fn contains_escape_codes(input: &str) -> bool {
    ESCAPE_PATTERN.is_match(input)
}

/// Kind of a [`Segment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Visible text
    Literal,
    /// A complete CSI escape sequence
    Escape,
}

/// A run of either literal text or one escape sequence, in char units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Char offset of the segment within the original string
    pub start: usize,
    /// Length of the segment in chars
    pub len: usize,
}

impl Segment {
    fn literal(start: usize, len: usize) -> Self {
        Self {
            kind: SegmentKind::Literal,
            start,
            len,
        }
    }

    fn escape(start: usize, len: usize) -> Self {
        Self {
            kind: SegmentKind::Escape,
            start,
            len,
        }
    }
}

/// Split a string into alternating literal and escape segments.
///
/// Empty literal runs are omitted, so two adjacent escape sequences produce
/// two consecutive `Escape` segments.
pub fn escape_segments(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_byte = 0;
    let mut char_pos = 0;

    for m in ESCAPE_PATTERN.find_iter(input) {
        let literal_len = input[last_byte..m.start()].chars().count();
        if literal_len > 0 {
            segments.push(Segment::literal(char_pos, literal_len));
            char_pos += literal_len;
        }
        let escape_len = m.as_str().chars().count();
        segments.push(Segment::escape(char_pos, escape_len));
        char_pos += escape_len;
        last_byte = m.end();
    }

    let tail_len = input[last_byte..].chars().count();
    if tail_len > 0 {
        segments.push(Segment::literal(char_pos, tail_len));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_simple_color_codes() {
        assert_eq!(strip_escape_codes("\x1b[31mred text\x1b[0m"), "red text");
    }

    #[test]
    fn test_strip_256_color_codes() {
        let input = "\x1b[38;5;244m│ Trace\x1b[0m";
        assert_eq!(strip_escape_codes(input), "│ Trace");
    }

    #[test]
    fn test_strip_private_mode_sequence() {
        // `?` lies outside @..~ so it is part of the parameter run
        assert_eq!(strip_escape_codes("\x1b[?25lhidden"), "hidden");
    }

    #[test]
    fn test_lone_escape_is_not_stripped() {
        assert_eq!(strip_escape_codes("a\x1bXb"), "a\x1bXb");
        assert!(!contains_escape_codes("a\x1bXb"));
    }

    #[test]
    fn test_contains_escape_codes() {
        assert!(contains_escape_codes("\x1b[1mbold"));
        assert!(!contains_escape_codes("plain text"));
    }

    #[test]
    fn test_vocabulary() {
        assert_eq!(CURSOR_SAVE, "\x1b[s");
        assert_eq!(CURSOR_RESTORE, "\x1b[u");
        assert_eq!(CLEAR_TO_EOL, "\x1b[0K");
        assert_eq!(move_to(0, 0), "\x1b[1;1H");
        assert_eq!(move_to(9, 4), "\x1b[5;10H");
        assert_eq!(move_up(3), "\x1b[3A");
        assert_eq!(move_down(1), "\x1b[1B");
        assert_eq!(move_right(12), "\x1b[12C");
        assert_eq!(move_left(2), "\x1b[2D");
    }

    #[test]
    fn test_zero_relative_move_is_empty() {
        assert_eq!(move_up(0), "");
        assert_eq!(move_left(0), "");
    }

    #[test]
    fn test_segments_plain() {
        assert_eq!(escape_segments("abc"), vec![Segment::literal(0, 3)]);
        assert!(escape_segments("").is_empty());
    }

    #[test]
    fn test_segments_mixed() {
        let segments = escape_segments("ab\x1b[31mcd\x1b[0m");
        assert_eq!(
            segments,
            vec![
                Segment::literal(0, 2),
                Segment::escape(2, 5),
                Segment::literal(7, 2),
                Segment::escape(9, 4),
            ]
        );
    }

    #[test]
    fn test_segments_count_chars_not_bytes() {
        let segments = escape_segments("é\x1b[1m→");
        assert_eq!(
            segments,
            vec![
                Segment::literal(0, 1),
                Segment::escape(1, 4),
                Segment::literal(5, 1),
            ]
        );
    }

    #[test]
    fn test_segments_adjacent_escapes() {
        let segments = escape_segments("\x1b[1m\x1b[4mx");
        assert_eq!(
            segments,
            vec![
                Segment::escape(0, 4),
                Segment::escape(4, 4),
                Segment::literal(8, 1),
            ]
        );
    }
}
