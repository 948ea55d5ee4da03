//! Editable text buffer with synchronous edit notifications.
//!
//! [`Document`] wraps a [`LineIndex`] and reports every structural change as a
//! [`TextDeltaEdit`] to its subscribers before the editing call returns, so offset-anchored
//! state (style intervals, decorations) can be remapped before anything queries it again.

use crate::delta::TextDeltaEdit;
use crate::line_index::{LineIndex, TextBuffer};
use std::ops::Range;

/// Edit notification callback function type
pub type EditCallback = Box<dyn FnMut(&TextDeltaEdit) + Send>;

/// A text document that broadcasts its edits.
///
/// # Example
///
/// ```rust
/// use editor_core::{Document, TextBuffer};
/// use std::sync::{Arc, Mutex};
///
/// let mut doc = Document::new("foo bar");
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// doc.subscribe(move |edit| sink.lock().unwrap().push(edit.clone()));
///
/// doc.insert(0, "! ");
/// assert_eq!(doc.text(), "! foo bar");
/// assert_eq!(doc.version(), 1);
/// assert_eq!(seen.lock().unwrap()[0].inserted_len(), 2);
/// assert_eq!(doc.line_range(0), Some(0..9));
/// ```
pub struct Document {
    index: LineIndex,
    version: u64,
    callbacks: Vec<EditCallback>,
}

impl Document {
    /// Create a document with initial text.
    pub fn new(text: &str) -> Self {
        Self {
            index: LineIndex::from_text(text),
            version: 0,
            callbacks: Vec::new(),
        }
    }

    /// Subscribe to edit notifications.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&TextDeltaEdit) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Number of applied (non-empty) edits.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The underlying line index.
    pub fn line_index(&self) -> &LineIndex {
        &self.index
    }

    /// Get complete text.
    pub fn text(&self) -> String {
        self.index.text()
    }

    /// Insert `text` at a character offset (clamped to the document end).
    pub fn insert(&mut self, offset: usize, text: &str) -> Option<TextDeltaEdit> {
        self.replace(offset..offset, text)
    }

    /// Delete a character range (clamped to the document).
    pub fn delete(&mut self, range: Range<usize>) -> Option<TextDeltaEdit> {
        self.replace(range, "")
    }

    /// Replace a character range (clamped to the document) with `text`.
    ///
    /// Returns the applied edit, or `None` if the call changed nothing.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Option<TextDeltaEdit> {
        let range = self.index.clamp(range);
        let edit = TextDeltaEdit {
            start: range.start,
            deleted_text: self.index.slice(range.clone()),
            inserted_text: text.to_string(),
        };
        if edit.is_noop() {
            return None;
        }

        self.index.replace(range, text);
        self.version += 1;

        for callback in &mut self.callbacks {
            callback(&edit);
        }
        Some(edit)
    }
}

impl TextBuffer for Document {
    fn char_count(&self) -> usize {
        self.index.char_count()
    }

    fn line_count(&self) -> usize {
        self.index.line_count()
    }

    fn position_to_char_offset(&self, line: usize, column: usize) -> usize {
        self.index.position_to_char_offset(line, column)
    }

    fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        self.index.char_offset_to_position(char_offset)
    }

    fn line_range(&self, line: usize) -> Option<Range<usize>> {
        self.index.line_range(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorded(doc: &mut Document) -> Arc<Mutex<Vec<TextDeltaEdit>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        doc.subscribe(move |edit| sink.lock().unwrap().push(edit.clone()));
        seen
    }

    #[test]
    fn test_edits_are_broadcast_in_order() {
        let mut doc = Document::new("foo bar");
        let seen = recorded(&mut doc);

        doc.insert(0, "! ");
        doc.delete(2..5);
        doc.replace(3..6, "baz");

        assert_eq!(doc.text(), "!  baz");
        assert_eq!(doc.version(), 3);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                TextDeltaEdit::insertion(0, "! "),
                TextDeltaEdit::deletion(2, "foo"),
                TextDeltaEdit {
                    start: 3,
                    deleted_text: "bar".to_string(),
                    inserted_text: "baz".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_noop_edits_are_not_broadcast() {
        let mut doc = Document::new("abc");
        let seen = recorded(&mut doc);

        assert!(doc.insert(1, "").is_none());
        assert!(doc.delete(2..2).is_none());
        assert!(doc.delete(10..20).is_none());

        assert_eq!(doc.version(), 0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_ranges_are_clamped() {
        let mut doc = Document::new("abc");
        let edit = doc.delete(1..100).unwrap();
        assert_eq!(edit, TextDeltaEdit::deletion(1, "bc"));
        assert_eq!(doc.text(), "a");

        let edit = doc.insert(50, "z").unwrap();
        assert_eq!(edit.start, 1);
        assert_eq!(doc.text(), "az");
    }

    #[test]
    fn test_multiline_positions() {
        let mut doc = Document::new("fn main() {\n}\n");
        doc.insert(12, "    x;\n");

        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.line_range(1), Some(12..18));
        assert_eq!(doc.position_to_char_offset(1, 4), 16);
        assert_eq!(doc.char_offset_to_position(16), (1, 4));
        assert_eq!(doc.line_index().line_text(1).as_deref(), Some("    x;"));
    }
}
