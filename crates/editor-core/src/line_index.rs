//! Rope-backed text storage and the offset/position contract built on it.
//!
//! Offsets count Unicode scalar values; lines and columns are 0-based. Every conversion clamps
//! instead of failing, so positions computed against a slightly older text still land inside
//! the document.

use ropey::Rope;
use std::ops::Range;

/// The text-buffer contract offset-anchored state relies on.
///
/// Implementors convert between character offsets and `(line, column)` positions.
pub trait TextBuffer {
    /// Total character count.
    fn char_count(&self) -> usize;

    /// Total line count (an empty document has one line).
    fn line_count(&self) -> usize;

    /// Character offset of `(line, column)`.
    ///
    /// Columns past the end of the line clamp to the line end; lines past the end of the
    /// document clamp to the document end.
    fn position_to_char_offset(&self, line: usize, column: usize) -> usize;

    /// `(line, column)` of a character offset (clamped to the document end).
    fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize);

    /// Character range of a line, excluding its line terminator.
    fn line_range(&self, line: usize) -> Option<Range<usize>>;
}

/// Line-addressable text, stored in a [`Rope`].
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Clamp `range` to the buffer, keeping `start <= end`.
    pub fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        start..range.end.clamp(start, len)
    }

    /// Replace the characters in `range` (clamped) with `text`.
    pub fn replace(&mut self, range: Range<usize>, text: &str) {
        let range = self.clamp(range);
        if !range.is_empty() {
            self.rope.remove(range.clone());
        }
        if !text.is_empty() {
            self.rope.insert(range.start, text);
        }
    }

    /// The characters in `range` (clamped).
    pub fn slice(&self, range: Range<usize>) -> String {
        self.rope.slice(self.clamp(range)).to_string()
    }

    /// The whole text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Text of one line without its terminator.
    pub fn line_text(&self, line: usize) -> Option<String> {
        self.line_range(line).map(|range| self.slice(range))
    }
}

impl TextBuffer for LineIndex {
    fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn position_to_char_offset(&self, line: usize, column: usize) -> usize {
        match self.line_range(line) {
            Some(range) => range.start + column.min(range.len()),
            None => self.rope.len_chars(),
        }
    }

    fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        let offset = char_offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        (line, offset - self.rope.line_to_char(line))
    }

    fn line_range(&self, line: usize) -> Option<Range<usize>> {
        if line >= self.rope.len_lines() {
            return None;
        }

        let start = self.rope.line_to_char(line);
        let mut end = if line + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line + 1)
        } else {
            self.rope.len_chars()
        };

        // Strip "\n" / "\r\n".
        if end > start && self.rope.char(end - 1) == '\n' {
            end -= 1;
            if end > start && self.rope.char(end - 1) == '\r' {
                end -= 1;
            }
        }

        Some(start..end)
    }
}
