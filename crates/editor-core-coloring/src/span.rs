//! Classified spans as supplied by highlight producers, and their resolution to offsets.

use crate::classification::HighlightType;
use editor_core::TextBuffer;

/// Identifier of the analysis pass that produced a batch of spans.
///
/// Merging a batch replaces exactly the decorations previously merged under the same tag, so a
/// producer should use one stable tag for all of its passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HighlightTag(pub u32);

impl HighlightTag {
    /// Create a tag from a raw numeric identifier.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Full syntax highlighting pass.
    pub const SYNTAX: Self = Self(1);

    /// Semantic analysis pass (e.g. unnecessary-code detection).
    pub const SEMANTIC: Self = Self(2);

    /// Diagnostics pass.
    pub const DIAGNOSTICS: Self = Self(3);
}

/// The two shapes a producer may describe a span in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// Absolute character offset plus length.
    OffsetLength {
        /// Start character offset.
        start: usize,
        /// Length in characters.
        length: usize,
    },
    /// 0-based line/column positions; the end position is exclusive.
    LineColumnRange {
        /// Start line.
        start_line: usize,
        /// Start column (characters).
        start_column: usize,
        /// End line.
        end_line: usize,
        /// End column (characters).
        end_column: usize,
    },
}

impl Span {
    /// Span from an offset and a length.
    pub fn offset(start: usize, length: usize) -> Self {
        Self::OffsetLength { start, length }
    }

    /// Span from `(line, column)` start and end positions.
    pub fn line_column(start: (usize, usize), end: (usize, usize)) -> Self {
        Self::LineColumnRange {
            start_line: start.0,
            start_column: start.1,
            end_line: end.0,
            end_column: end.1,
        }
    }

    /// Resolve to absolute `(start, end)` character offsets.
    ///
    /// The result is not validated: a producer may hand in spans whose end precedes their
    /// start.
    pub fn resolve<B: TextBuffer + ?Sized>(&self, buffer: &B) -> (usize, usize) {
        match *self {
            Self::OffsetLength { start, length } => (start, start.saturating_add(length)),
            Self::LineColumnRange {
                start_line,
                start_column,
                end_line,
                end_column,
            } => (
                buffer.position_to_char_offset(start_line, start_column),
                buffer.position_to_char_offset(end_line, end_column),
            ),
        }
    }
}

/// A span tagged with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedSpan {
    /// Semantic category.
    pub classification: HighlightType,
    /// Where the span is.
    pub span: Span,
}

impl ClassifiedSpan {
    /// Create a classified span.
    pub fn new(classification: HighlightType, span: Span) -> Self {
        Self {
            classification,
            span,
        }
    }
}

/// A batch of classified spans from one producer pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightBatch {
    /// Producer identity.
    pub tag: HighlightTag,
    /// Spans in producer order.
    pub spans: Vec<ClassifiedSpan>,
}

impl HighlightBatch {
    /// Create a batch.
    pub fn new(tag: HighlightTag, spans: Vec<ClassifiedSpan>) -> Self {
        Self { tag, spans }
    }

    /// Resolve every span to absolute offsets against `buffer`.
    pub fn resolve<B: TextBuffer + ?Sized>(&self, buffer: &B) -> ResolvedBatch {
        ResolvedBatch {
            tag: self.tag,
            spans: self
                .spans
                .iter()
                .map(|s| {
                    let (start, end) = s.span.resolve(buffer);
                    ResolvedSpan {
                        classification: s.classification,
                        start,
                        end,
                    }
                })
                .collect(),
        }
    }
}

/// A classified span in absolute character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// Semantic category.
    pub classification: HighlightType,
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

/// A [`HighlightBatch`] whose spans have been resolved to absolute offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBatch {
    /// Producer identity.
    pub tag: HighlightTag,
    /// Resolved spans in producer order.
    pub spans: Vec<ResolvedSpan>,
}
