#![warn(missing_docs)]
//! Editor Core Coloring - Classification-Driven Text Coloring
//!
//! # Overview
//!
//! `editor-core-coloring` turns classified spans from highlight producers (syntax passes,
//! semantic analysis, diagnostics) into color and opacity decorations that follow document
//! edits, and answers "how should this line be styled" for the renderer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  ColoringWorker (queue + owning thread)     │  ← Concurrent API
//! ├─────────────────────────────────────────────┤
//! │  TextColoring (text layer + opacity layer)  │  ← Ingestion / Line Styling
//! ├─────────────────────────────────────────────┤
//! │  DecorationLayer (editor_core::IntervalTree)│  ← Edit-Tracking Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use editor_core::Document;
//! use editor_core_coloring::{
//!     ClassifiedSpan, ColorScheme, HighlightBatch, HighlightTag, HighlightType,
//!     LineInstruction, Span, TextColoring,
//! };
//!
//! let mut doc = Document::new("foo bar");
//! let mut coloring = TextColoring::new(ColorScheme::default());
//!
//! let batch = HighlightBatch::new(
//!     HighlightTag::SYNTAX,
//!     vec![
//!         ClassifiedSpan::new(HighlightType::Keyword, Span::offset(0, 3)),
//!         ClassifiedSpan::new(HighlightType::Identifier, Span::offset(4, 3)),
//!     ],
//! );
//! coloring.set_decorations(&batch.resolve(&doc));
//!
//! let edit = doc.insert(0, "! ").unwrap();
//! coloring.apply_edit(&edit);
//!
//! let ranges: Vec<_> = coloring
//!     .line_instructions(0..9)
//!     .iter()
//!     .map(LineInstruction::range)
//!     .cloned()
//!     .collect();
//! assert_eq!(ranges, vec![2..5, 6..9]);
//! ```
//!
//! # Module Description
//!
//! - [`classification`] - Semantic categories a producer can attach to a span
//! - [`color`] - RGBA colors and the classification → color scheme
//! - [`span`] - Producer-facing spans, batches and their offset resolution
//! - [`decoration`] - Decorations and the edit-tracking layers that store them
//! - [`coloring`] - The two-layer coloring state and line styling
//! - [`render`] - The [`LineStyler`] seam towards the renderer
//! - [`worker`] - Dedicated thread that serializes all coloring work
//! - [`config`] - Engine configuration
//! - [`error`] - Error type

pub mod classification;
pub mod color;
pub mod coloring;
pub mod config;
pub mod decoration;
pub mod error;
pub mod render;
pub mod span;
pub mod worker;

pub use classification::HighlightType;
pub use color::{ColorScheme, Rgba};
pub use coloring::TextColoring;
pub use config::{ColoringConfig, OverlayOpacity};
pub use decoration::{Decoration, DecorationId, DecorationLayer};
pub use error::ColoringError;
pub use render::{LineInstruction, LineStyler, resolve_line};
pub use span::{
    ClassifiedSpan, HighlightBatch, HighlightTag, ResolvedBatch, ResolvedSpan, Span,
};
pub use worker::{ColoringHandle, ColoringWorker, DecorationPredicate, LayerKind};
