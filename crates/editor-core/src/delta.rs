//! Structured text edits.
//!
//! Offset-anchored state (style intervals, decorations) has to be remapped on every document
//! change without diffing old/new text. A [`TextDeltaEdit`] carries exactly what that remapping
//! needs, expressed in **character offsets** (Unicode scalar values).

/// A single text edit expressed in character offsets.
///
/// Semantics:
/// - `start` is a character offset in the document **at the time this edit is applied**.
/// - The deleted range is `start..start + deleted_len()`.
/// - The inserted text begins at `start` once the deletion has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDeltaEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextDeltaEdit {
    /// A pure insertion of `text` at `start`.
    pub fn insertion(start: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            deleted_text: String::new(),
            inserted_text: text.into(),
        }
    }

    /// A pure deletion of `deleted_text`, which started at `start` in the pre-edit document.
    pub fn deletion(start: usize, deleted_text: impl Into<String>) -> Self {
        Self {
            start,
            deleted_text: deleted_text.into(),
            inserted_text: String::new(),
        }
    }

    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// Exclusive end character offset in the pre-edit document.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted_len())
    }

    /// Returns `true` if the edit neither deletes nor inserts anything.
    pub fn is_noop(&self) -> bool {
        self.deleted_text.is_empty() && self.inserted_text.is_empty()
    }
}
