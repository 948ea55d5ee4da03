//! The text-coloring state: a primary color layer and a lazily created opacity layer.

use crate::classification::HighlightType;
use crate::color::ColorScheme;
use crate::config::{ColoringConfig, OverlayOpacity};
use crate::decoration::{Decoration, DecorationLayer};
use crate::error::ColoringError;
use crate::render::{LineInstruction, LineStyler};
use crate::span::ResolvedBatch;
use editor_core::TextDeltaEdit;
use std::ops::Range;

/// Decoration state for one document.
///
/// - The **text layer** holds color decorations and is replaced wholesale by
///   [`set_decorations`](Self::set_decorations).
/// - The **opacity layer** holds fade decorations; it is created by the first
///   [`merge_opacity`](Self::merge_opacity) and updated per producer tag.
///
/// Every method runs to completion before returning, so callers that serialize access (see
/// [`ColoringWorker`](crate::ColoringWorker)) never observe a layer mid-swap or mid-merge.
#[derive(Debug, Clone)]
pub struct TextColoring {
    scheme: ColorScheme,
    config: ColoringConfig,
    text_decorations: DecorationLayer,
    opacity_decorations: Option<DecorationLayer>,
}

impl TextColoring {
    /// Create an empty coloring state with the default configuration.
    pub fn new(scheme: ColorScheme) -> Self {
        Self::with_config(scheme, ColoringConfig::default())
    }

    /// Create an empty coloring state.
    pub fn with_config(scheme: ColorScheme, config: ColoringConfig) -> Self {
        Self {
            scheme,
            config,
            text_decorations: DecorationLayer::new(),
            opacity_decorations: None,
        }
    }

    /// The active color scheme.
    pub fn color_scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    /// Replace the color scheme. Existing decorations keep their resolved colors.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.scheme = scheme;
    }

    /// The active configuration.
    pub fn config(&self) -> &ColoringConfig {
        &self.config
    }

    /// The primary (color) layer.
    pub fn text_decorations(&self) -> &DecorationLayer {
        &self.text_decorations
    }

    /// The opacity layer, if any batch has been merged yet.
    pub fn opacity_decorations(&self) -> Option<&DecorationLayer> {
        self.opacity_decorations.as_ref()
    }

    fn decorations_for<'a>(
        &'a self,
        batch: &'a ResolvedBatch,
    ) -> impl Iterator<Item = Decoration> + 'a {
        batch
            .spans
            .iter()
            .filter(|span| span.classification.is_styled())
            .filter(move |span| {
                if span.end < span.start {
                    tracing::warn!(
                        tag = batch.tag.0,
                        start = span.start,
                        end = span.end,
                        "dropping span that ends before it starts"
                    );
                }
                span.start < span.end
            })
            .map(move |span| Decoration {
                start: span.start,
                end: span.end,
                foreground: self.scheme.foreground(span.classification),
                opacity: if span.classification == HighlightType::Unnecessary {
                    self.config.unnecessary_opacity
                } else {
                    1.0
                },
                tag: batch.tag,
            })
    }

    /// Replace the text layer with the decorations of `batch`.
    ///
    /// Spans classified [`HighlightType::None`] are skipped. Returns the new layer size.
    pub fn set_decorations(&mut self, batch: &ResolvedBatch) -> usize {
        let layer: DecorationLayer = self.decorations_for(batch).collect();
        let count = layer.len();
        self.text_decorations = layer;

        tracing::debug!(
            tag = batch.tag.0,
            spans = batch.spans.len(),
            decorations = count,
            "replaced text decorations"
        );
        count
    }

    /// Replace this batch's tag's previous contribution to the opacity layer.
    ///
    /// Removes every opacity decoration carrying `batch.tag`, then adds one decoration per
    /// styled span. Other tags are untouched. Returns the number of decorations added.
    pub fn merge_opacity(&mut self, batch: &ResolvedBatch) -> usize {
        let added: Vec<Decoration> = self.decorations_for(batch).collect();
        let count = added.len();

        let layer = self
            .opacity_decorations
            .get_or_insert_with(DecorationLayer::new);
        let removed = layer.remove_where(|d| d.tag == batch.tag);
        layer.extend(added);

        tracing::debug!(
            tag = batch.tag.0,
            removed,
            added = count,
            total = layer.len(),
            "merged opacity decorations"
        );
        count
    }

    /// Remove every decoration matching `predicate` from both layers.
    ///
    /// Returns the number of removed decorations.
    ///
    /// # Errors
    ///
    /// [`ColoringError::InvalidArgument`] if `predicate` is `None`; nothing is removed.
    pub fn remove_where<F>(&mut self, predicate: Option<F>) -> Result<usize, ColoringError>
    where
        F: FnMut(&Decoration) -> bool,
    {
        let mut predicate = predicate.ok_or(ColoringError::InvalidArgument("predicate"))?;

        let mut removed = self.text_decorations.remove_where(&mut predicate);
        if let Some(layer) = self.opacity_decorations.as_mut() {
            removed += layer.remove_where(&mut predicate);
        }
        Ok(removed)
    }

    /// Remap both layers through a document edit.
    pub fn apply_edit(&mut self, edit: &TextDeltaEdit) {
        if edit.is_noop() {
            return;
        }

        let mut removed = self.text_decorations.apply_edit(edit);
        if let Some(layer) = self.opacity_decorations.as_mut() {
            removed += layer.apply_edit(edit);
        }

        tracing::trace!(
            start = edit.start,
            deleted = edit.deleted_len(),
            inserted = edit.inserted_len(),
            removed,
            "remapped decorations"
        );
    }

    /// Emit styling instructions for the line covering `line` (character offsets, line
    /// terminator excluded).
    ///
    /// Text decorations come first, then opacity decorations, each in insertion order and
    /// clamped to the line.
    pub fn transform_line<S>(&self, line: Range<usize>, styler: &mut S)
    where
        S: LineStyler + ?Sized,
    {
        for decoration in self.text_decorations.find_overlapping(line.clone()) {
            if let Some(range) = decoration.clamp_to(&line) {
                styler.set_foreground(range, decoration.foreground);
            }
        }

        let Some(layer) = self.opacity_decorations.as_ref() else {
            return;
        };

        for decoration in layer.find_overlapping(line.clone()) {
            if let Some(range) = decoration.clamp_to(&line) {
                let opacity = match self.config.overlay_opacity {
                    OverlayOpacity::Fixed(value) => value,
                    OverlayOpacity::PerEntry => decoration.opacity,
                };
                styler.set_opacity(range, opacity);
            }
        }
    }

    /// [`transform_line`](Self::transform_line) collected into owned instructions.
    pub fn line_instructions(&self, line: Range<usize>) -> Vec<LineInstruction> {
        let mut instructions = Vec::new();
        self.transform_line(line, &mut instructions);
        instructions
    }

    /// Drop both layers (the opacity layer goes back to "not created").
    pub fn clear(&mut self) {
        self.text_decorations = DecorationLayer::new();
        self.opacity_decorations = None;
    }
}

impl Default for TextColoring {
    fn default() -> Self {
        Self::new(ColorScheme::default())
    }
}
