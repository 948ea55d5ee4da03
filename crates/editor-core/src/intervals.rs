//! Offset-anchored intervals.
//!
//! [`IntervalTree`] stores items anchored to a half-open `[start, end)` character range and keeps
//! them positioned as the document is edited. It is the storage behind style and decoration
//! layers.

use crate::delta::TextDeltaEdit;

/// An item anchored to a half-open `[start, end)` character-offset range.
pub trait Anchored {
    /// Start offset (inclusive).
    fn start(&self) -> usize;
    /// End offset (exclusive).
    fn end(&self) -> usize;
    /// Move the anchor. Called by [`IntervalTree`] while remapping offsets after an edit.
    fn set_range(&mut self, start: usize, end: usize);

    /// Check if the anchored range contains a specific position.
    fn contains(&self, pos: usize) -> bool {
        self.start() <= pos && pos < self.end()
    }

    /// Check if the anchored range intersects `[start, end)`.
    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start() < end && start < self.end()
    }
}

/// Identity of an entry in an [`IntervalTree`].
///
/// Ids grow monotonically with insertion, so ordering ids orders entries by insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntervalId(u64);

impl IntervalId {
    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    id: IntervalId,
    item: T,
}

/// Interval tree - manages offset-anchored items
///
/// Uses a sorted vector with binary search for efficient interval queries.
/// Query complexity: O(log n + k), where k is the number of overlapping intervals.
/// Insertion complexity: O(n) (requires maintaining sort order).
///
/// Queries yield entries in insertion order, regardless of their offsets.
#[derive(Debug, Clone)]
pub struct IntervalTree<T> {
    /// Entries (kept sorted by start position)
    entries: Vec<Entry<T>>,
    /// Prefix maximum end position: `prefix_max_end[i] = max(entries[0..=i].end)`
    ///
    /// Used for early pruning in `query_range`, avoiding degradation to O(n) scan when there
    /// are many intervals.
    prefix_max_end: Vec<usize>,
    next_id: u64,
}

impl<T: Anchored> IntervalTree<T> {
    /// Create an empty interval tree.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            prefix_max_end: Vec::new(),
            next_id: 0,
        }
    }

    fn rebuild_prefix_max_end_from(&mut self, start_idx: usize) {
        if self.entries.is_empty() {
            self.prefix_max_end.clear();
            return;
        }

        if self.prefix_max_end.len() != self.entries.len() {
            self.prefix_max_end.resize(self.entries.len(), 0);
        }

        let mut max_end = if start_idx == 0 {
            0
        } else {
            self.prefix_max_end[start_idx - 1]
        };

        for (idx, entry) in self.entries.iter().enumerate().skip(start_idx) {
            max_end = max_end.max(entry.item.end());
            self.prefix_max_end[idx] = max_end;
        }
    }

    fn rebuild_prefix_max_end(&mut self) {
        self.rebuild_prefix_max_end_from(0);
    }

    /// Insert an item and return its id.
    ///
    /// Items must satisfy `start <= end`. An item whose end precedes its start is collapsed to
    /// an empty range at its start; no query matches it and the next deletion drops it.
    pub fn insert(&mut self, mut item: T) -> IntervalId {
        let id = IntervalId(self.next_id);
        self.next_id += 1;

        let start = item.start();
        if item.end() < start {
            tracing::warn!(start, end = item.end(), "collapsing inverted interval");
            item.set_range(start, start);
        }

        // Equal starts keep insertion order.
        let pos = self.entries.partition_point(|e| e.item.start() <= start);

        self.entries.insert(pos, Entry { id, item });
        self.prefix_max_end.insert(pos, 0);
        self.rebuild_prefix_max_end_from(pos);
        id
    }

    /// Remove the entry with the given id, returning it if it was present.
    pub fn remove(&mut self, id: IntervalId) -> Option<T> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        let entry = self.entries.remove(pos);
        self.prefix_max_end.remove(pos);
        if pos < self.entries.len() {
            self.rebuild_prefix_max_end_from(pos);
        }
        Some(entry.item)
    }

    /// Remove every entry matching `predicate`. Returns the number of removed entries.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|e| !predicate(&e.item));
        let removed = before - self.entries.len();
        if removed > 0 {
            self.rebuild_prefix_max_end();
        }
        removed
    }

    /// Get an entry by id.
    pub fn get(&self, id: IntervalId) -> Option<&T> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.item)
    }

    /// Query all items overlapping `[start, end)`, in insertion order.
    ///
    /// Matches are collected and ordered when the query runs; the returned iterator walks that
    /// snapshot and performs no further search.
    pub fn query_range(&self, start: usize, end: usize) -> Overlapping<'_, T> {
        Overlapping::new(self.query_range_impl(start, end).0)
    }

    /// Like [`IntervalTree::query_range`], also yielding each entry's id.
    pub fn query_range_with_ids(
        &self,
        start: usize,
        end: usize,
    ) -> impl Iterator<Item = (IntervalId, &T)> + '_ {
        self.query_range_impl(start, end)
            .0
            .into_iter()
            .map(|e| (e.id, &e.item))
    }

    fn query_range_impl(&self, start: usize, end: usize) -> (Vec<&Entry<T>>, usize) {
        if self.entries.is_empty() || start >= end {
            return (Vec::new(), 0);
        }

        // All entries that may overlap start before `end`.
        let search_end = self.entries.partition_point(|e| e.item.start() < end);
        if search_end == 0 {
            return (Vec::new(), 0);
        }

        // First find position where entry.start >= start, then expand backward,
        // until `prefix_max_end` indicates earlier entries cannot cross start.
        let mut scan_start = self
            .entries
            .partition_point(|e| e.item.start() < start)
            .min(search_end);

        while scan_start > 0 && self.prefix_max_end[scan_start - 1] > start {
            scan_start -= 1;
        }

        let window = &self.entries[scan_start..search_end];
        let mut result: Vec<&Entry<T>> = window
            .iter()
            .filter(|e| e.item.overlaps(start, end))
            .collect();
        result.sort_unstable_by_key(|e| e.id);

        (result, window.len())
    }

    #[cfg(test)]
    fn query_range_scan_count(&self, start: usize, end: usize) -> usize {
        self.query_range_impl(start, end).1
    }

    /// All items, in insertion order.
    pub fn iter(&self) -> Overlapping<'_, T> {
        let mut all: Vec<&Entry<T>> = self.entries.iter().collect();
        all.sort_unstable_by_key(|e| e.id);
        Overlapping::new(all)
    }

    /// Clear all intervals
    pub fn clear(&mut self) {
        self.entries.clear();
        self.prefix_max_end.clear();
    }

    /// Get number of intervals
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remap intervals after `delta` characters were inserted at `pos`.
    ///
    /// An interval starting at `pos` moves with the inserted text; an interval ending at `pos`
    /// does not grow.
    pub fn update_for_insertion(&mut self, pos: usize, delta: usize) {
        if delta == 0 {
            return;
        }

        for entry in &mut self.entries {
            let (start, end) = (entry.item.start(), entry.item.end());
            if start >= pos {
                entry.item.set_range(start + delta, end + delta);
            } else if end > pos {
                // Insertion strictly inside: grow
                entry.item.set_range(start, end + delta);
            }
        }
        self.rebuild_prefix_max_end();
    }

    /// Remap intervals after the characters in `[start, end)` were deleted.
    ///
    /// Intervals that lie completely within the deleted range are removed, as are empty
    /// intervals. Returns the number of removed intervals.
    pub fn update_for_deletion(&mut self, start: usize, end: usize) -> usize {
        if end <= start {
            return 0;
        }

        let delta = end - start;
        let before = self.entries.len();

        self.entries.retain_mut(|entry| {
            let (s, e) = (entry.item.start(), entry.item.end());
            let remapped = if e <= start {
                // Entirely before
                (s, e)
            } else if s >= end {
                // Entirely after
                (s - delta, e - delta)
            } else if s >= start && e <= end {
                // Swallowed
                return false;
            } else if s < start && e > end {
                // Covers the whole deletion
                (s, e - delta)
            } else if s < start {
                // Tail deleted
                (s, start)
            } else {
                // Head deleted
                (start, e - delta)
            };

            // Only an entry that was already empty can end up here.
            if remapped.0 >= remapped.1 {
                return false;
            }
            if remapped != (s, e) {
                entry.item.set_range(remapped.0, remapped.1);
            }
            true
        });

        self.rebuild_prefix_max_end();

        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::trace!(start, end, removed, "intervals removed by deletion");
        }
        removed
    }

    /// Remap all offsets through a structured edit (deletion first, then insertion).
    ///
    /// Returns the number of intervals removed because the deletion swallowed them.
    pub fn apply_edit(&mut self, edit: &TextDeltaEdit) -> usize {
        let removed = self.update_for_deletion(edit.start, edit.end());
        self.update_for_insertion(edit.start, edit.inserted_len());
        removed
    }
}

impl<T: Anchored> Default for IntervalTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the items matched by an [`IntervalTree`] query, in insertion order.
///
/// Matches are collected when the query runs, so the iterator is double-ended and sized.
#[derive(Debug)]
pub struct Overlapping<'a, T> {
    inner: std::vec::IntoIter<&'a Entry<T>>,
}

impl<'a, T> Overlapping<'a, T> {
    fn new(entries: Vec<&'a Entry<T>>) -> Self {
        Self {
            inner: entries.into_iter(),
        }
    }
}

impl<'a, T> Iterator for Overlapping<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| &e.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Overlapping<'_, T> {}

impl<T> DoubleEndedIterator for Overlapping<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|e| &e.item)
    }
}
