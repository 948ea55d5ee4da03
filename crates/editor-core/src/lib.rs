#![warn(missing_docs)]
//! Editor Core - Headless Text Kernel
//!
//! # Overview
//!
//! `editor-core` provides the text-side building blocks that offset-anchored editor state is
//! built on. It does not render anything and has no opinion on what an interval means: style,
//! decoration and diagnostic layers live in integration crates (`editor-core-*`).
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Document (edits + notifications)           │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Intervals (offset-anchored, edit-tracking) │  ← Derived State Storage
//! ├─────────────────────────────────────────────┤
//! │  Line Index (Rope-based)                    │  ← Line Access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use editor_core::{Anchored, Document, IntervalTree};
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Debug)]
//! struct Word(usize, usize);
//!
//! impl Anchored for Word {
//!     fn start(&self) -> usize { self.0 }
//!     fn end(&self) -> usize { self.1 }
//!     fn set_range(&mut self, start: usize, end: usize) { (self.0, self.1) = (start, end); }
//! }
//!
//! let tree = Arc::new(Mutex::new(IntervalTree::new()));
//! tree.lock().unwrap().insert(Word(4, 7));
//!
//! let mut doc = Document::new("foo bar");
//! let sink = Arc::clone(&tree);
//! doc.subscribe(move |edit| {
//!     sink.lock().unwrap().apply_edit(edit);
//! });
//!
//! doc.insert(0, "! ");
//! let tree = tree.lock().unwrap();
//! let word = tree.query_range(0, 9).next().unwrap();
//! assert_eq!((word.start(), word.end()), (6, 9));
//! ```
//!
//! # Module Description
//!
//! - [`line_index`] - Rope based line index and the [`TextBuffer`] contract
//! - [`delta`] - Structured text edits in character offsets
//! - [`document`] - Editable buffer that broadcasts its edits
//! - [`intervals`] - Offset-anchored interval store that follows edits
//!
//! # Unicode Support
//!
//! All offsets are Unicode scalar values (`char`), never bytes.

pub mod delta;
pub mod document;
pub mod intervals;
pub mod line_index;

pub use delta::TextDeltaEdit;
pub use document::{Document, EditCallback};
pub use intervals::{Anchored, IntervalId, IntervalTree, Overlapping};
pub use line_index::{LineIndex, TextBuffer};
