//! Decorations and the edit-tracking layers that hold them.

use crate::color::Rgba;
use crate::span::HighlightTag;
use editor_core::{Anchored, IntervalId, IntervalTree, Overlapping, TextDeltaEdit};
use std::ops::Range;

/// Handle of a decoration inside a [`DecorationLayer`].
pub type DecorationId = IntervalId;

/// A tagged range of text with a foreground color and an opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    /// Start character offset (inclusive).
    pub start: usize,
    /// End character offset (exclusive).
    pub end: usize,
    /// Color to apply; `None` leaves the current color unchanged.
    pub foreground: Option<Rgba>,
    /// Requested opacity (`0.0..=1.0`).
    pub opacity: f32,
    /// Producer that created this decoration.
    pub tag: HighlightTag,
}

impl Decoration {
    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the decoration covers no characters.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The part of this decoration inside `range`, or `None` if they do not intersect.
    pub fn clamp_to(&self, range: &Range<usize>) -> Option<Range<usize>> {
        let start = self.start.max(range.start);
        let end = self.end.min(range.end);
        (start < end).then_some(start..end)
    }
}

impl Anchored for Decoration {
    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        self.end
    }

    fn set_range(&mut self, start: usize, end: usize) {
        self.start = start;
        self.end = end;
    }
}

/// An ordered, edit-tracking collection of decorations of one kind.
///
/// Overlapping and duplicate decorations are allowed. Queries yield decorations in insertion
/// order, so a renderer applying them in sequence lets later decorations win.
#[derive(Debug, Clone, Default)]
pub struct DecorationLayer {
    tree: IntervalTree<Decoration>,
}

impl DecorationLayer {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a decoration.
    pub fn add(&mut self, decoration: Decoration) -> DecorationId {
        self.tree.insert(decoration)
    }

    /// Remove a specific decoration; `None` if it is not (or no longer) in the layer.
    pub fn remove(&mut self, id: DecorationId) -> Option<Decoration> {
        self.tree.remove(id)
    }

    /// Remove every decoration matching `predicate`. Returns the number removed.
    pub fn remove_where<F>(&mut self, predicate: F) -> usize
    where
        F: FnMut(&Decoration) -> bool,
    {
        self.tree.remove_where(predicate)
    }

    /// Decorations intersecting `range`, in insertion order.
    pub fn find_overlapping(&self, range: Range<usize>) -> Overlapping<'_, Decoration> {
        self.tree.query_range(range.start, range.end)
    }

    /// Look up a decoration by id.
    pub fn get(&self, id: DecorationId) -> Option<&Decoration> {
        self.tree.get(id)
    }

    /// Remap offsets after a document edit. Decorations the edit deletes entirely are dropped.
    pub fn apply_edit(&mut self, edit: &TextDeltaEdit) -> usize {
        self.tree.apply_edit(edit)
    }

    /// All decorations, in insertion order.
    pub fn iter(&self) -> Overlapping<'_, Decoration> {
        self.tree.iter()
    }

    /// Number of decorations.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the layer is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl Extend<Decoration> for DecorationLayer {
    fn extend<I: IntoIterator<Item = Decoration>>(&mut self, iter: I) {
        for decoration in iter {
            self.add(decoration);
        }
    }
}

impl FromIterator<Decoration> for DecorationLayer {
    fn from_iter<I: IntoIterator<Item = Decoration>>(iter: I) -> Self {
        let mut layer = Self::new();
        layer.extend(iter);
        layer
    }
}
