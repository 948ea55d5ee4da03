//! Coloring worker: a dedicated thread that owns the [`TextColoring`] state.
//!
//! All mutations and queries travel through one FIFO command queue and are executed one at a
//! time by the worker:
//!
//! ```text
//! ┌───────────────────┐  SetDecorations / MergeOpacity   ┌──────────────────┐
//! │ Highlight passes  │ ───────────────────────────────▶ │                  │
//! └───────────────────┘                                  │                  │
//! ┌───────────────────┐  Edit (synchronous subscriber)   │  Coloring Worker │
//! │ Document          │ ───────────────────────────────▶ │  (TextColoring)  │
//! └───────────────────┘                                  │                  │
//! ┌───────────────────┐  TransformLine ──▶ ◀── reply     │                  │
//! │ Renderer          │ ◀──────────────────────────────▶ │                  │
//! └───────────────────┘                                  └──────────────────┘
//! ```
//!
//! Mutations are fire-and-forget. Queries block until the worker reaches them, which is after
//! every previously enqueued mutation, so a render pass never sees a layer mid-swap, mid-merge,
//! or with offsets that predate an edit.

use crate::color::ColorScheme;
use crate::coloring::TextColoring;
use crate::config::ColoringConfig;
use crate::decoration::Decoration;
use crate::error::ColoringError;
use crate::render::LineInstruction;
use crate::span::{HighlightBatch, ResolvedBatch};
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use editor_core::{TextBuffer, TextDeltaEdit};
use std::ops::Range;
use std::thread::{self, JoinHandle};

/// A predicate shipped to the worker by [`ColoringHandle::remove_where`].
pub type DecorationPredicate = Box<dyn FnMut(&Decoration) -> bool + Send>;

/// Which decoration layer a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// The primary color layer.
    Text,
    /// The opacity layer.
    Opacity,
}

enum Command {
    SetDecorations(ResolvedBatch),
    MergeOpacity(ResolvedBatch),
    RemoveWhere(DecorationPredicate),
    Edit(TextDeltaEdit),
    SetColorScheme(ColorScheme),
    Clear,
    TransformLine {
        line: Range<usize>,
        reply: Sender<Vec<LineInstruction>>,
    },
    FindOverlapping {
        layer: LayerKind,
        range: Range<usize>,
        reply: Sender<Vec<Decoration>>,
    },
    Shutdown,
}

/// Cloneable sender side of a [`ColoringWorker`].
///
/// Every method fails with [`ColoringError::WorkerStopped`] once the worker has shut down.
#[derive(Clone)]
pub struct ColoringHandle {
    sender: Sender<Command>,
}

impl ColoringHandle {
    fn send(&self, command: Command) -> Result<(), ColoringError> {
        self.sender
            .send(command)
            .map_err(|_| ColoringError::WorkerStopped)
    }

    fn request<T>(&self, make: impl FnOnce(Sender<T>) -> Command) -> Result<T, ColoringError> {
        let (reply, response) = bounded(1);
        self.send(make(reply))?;
        response.recv().map_err(|_| ColoringError::WorkerStopped)
    }

    /// Replace the text layer with `batch` (full highlighting pass).
    ///
    /// Spans are resolved against `buffer` now; the swap happens on the worker.
    pub fn set_decorations<B>(
        &self,
        buffer: &B,
        batch: &HighlightBatch,
    ) -> Result<(), ColoringError>
    where
        B: TextBuffer + ?Sized,
    {
        self.send(Command::SetDecorations(batch.resolve(buffer)))
    }

    /// Merge `batch` into the opacity layer, replacing the previous batch with the same tag.
    ///
    /// Spans are resolved against `buffer` now; removal and insertion run as one unit on the
    /// worker.
    pub fn merge_opacity<B>(
        &self,
        buffer: &B,
        batch: &HighlightBatch,
    ) -> Result<(), ColoringError>
    where
        B: TextBuffer + ?Sized,
    {
        self.send(Command::MergeOpacity(batch.resolve(buffer)))
    }

    /// Remove every decoration matching `predicate` from both layers.
    ///
    /// # Errors
    ///
    /// [`ColoringError::InvalidArgument`] if `predicate` is `None`; nothing is enqueued.
    pub fn remove_where<F>(&self, predicate: Option<F>) -> Result<(), ColoringError>
    where
        F: FnMut(&Decoration) -> bool + Send + 'static,
    {
        let predicate = predicate.ok_or(ColoringError::InvalidArgument("predicate"))?;
        self.send(Command::RemoveWhere(Box::new(predicate)))
    }

    /// Enqueue a document edit for offset remapping.
    pub fn notify_edit(&self, edit: TextDeltaEdit) -> Result<(), ColoringError> {
        self.send(Command::Edit(edit))
    }

    /// An edit callback for [`Document::subscribe`](editor_core::Document::subscribe).
    ///
    /// Each edit is enqueued before the editing call returns.
    pub fn edit_listener(&self) -> impl FnMut(&TextDeltaEdit) + Send + 'static {
        let handle = self.clone();
        move |edit: &TextDeltaEdit| {
            if handle.notify_edit(edit.clone()).is_err() {
                tracing::debug!(start = edit.start, "edit dropped: coloring worker stopped");
            }
        }
    }

    /// Replace the color scheme used by subsequent ingestion.
    pub fn set_color_scheme(&self, scheme: ColorScheme) -> Result<(), ColoringError> {
        self.send(Command::SetColorScheme(scheme))
    }

    /// Drop both layers.
    pub fn clear(&self) -> Result<(), ColoringError> {
        self.send(Command::Clear)
    }

    /// Styling instructions for one line, after all previously enqueued work.
    pub fn transform_line(
        &self,
        line: Range<usize>,
    ) -> Result<Vec<LineInstruction>, ColoringError> {
        self.request(|reply| Command::TransformLine { line, reply })
    }

    /// Snapshot of the decorations of `layer` intersecting `range`, in insertion order.
    pub fn find_overlapping(
        &self,
        layer: LayerKind,
        range: Range<usize>,
    ) -> Result<Vec<Decoration>, ColoringError> {
        self.request(|reply| Command::FindOverlapping {
            layer,
            range,
            reply,
        })
    }
}

/// The coloring worker thread.
///
/// Dropping the worker shuts it down after the work already queued.
pub struct ColoringWorker {
    handle: ColoringHandle,
    thread: Option<JoinHandle<()>>,
}

impl ColoringWorker {
    /// Spawn a worker with an empty [`TextColoring`].
    pub fn spawn(scheme: ColorScheme, config: ColoringConfig) -> Result<Self, ColoringError> {
        let (sender, receiver) = unbounded();
        let name = config.worker_thread_name.clone();
        let coloring = TextColoring::with_config(scheme, config);

        let thread = thread::Builder::new()
            .name(name)
            .spawn(move || Self::run_loop(&receiver, coloring))
            .map_err(ColoringError::Spawn)?;

        Ok(Self {
            handle: ColoringHandle { sender },
            thread: Some(thread),
        })
    }

    /// The sender side; clone it to hand to producers on other threads.
    pub fn handle(&self) -> &ColoringHandle {
        &self.handle
    }

    /// Stop the worker after the work already queued and wait for it to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        // The loop may already be gone; joining is all that is left to do then.
        let _ = self.handle.send(Command::Shutdown);
        if thread.join().is_err() {
            tracing::warn!("coloring worker panicked");
        }
    }

    fn run_loop(receiver: &Receiver<Command>, mut coloring: TextColoring) {
        tracing::debug!("coloring worker started");

        for command in receiver.iter() {
            match command {
                Command::SetDecorations(batch) => {
                    coloring.set_decorations(&batch);
                }
                Command::MergeOpacity(batch) => {
                    coloring.merge_opacity(&batch);
                }
                Command::RemoveWhere(predicate) => {
                    // `Some` is always passed here; the handle validated it.
                    if let Ok(removed) = coloring.remove_where(Some(predicate)) {
                        tracing::debug!(removed, "removed decorations by predicate");
                    }
                }
                Command::Edit(edit) => coloring.apply_edit(&edit),
                Command::SetColorScheme(scheme) => coloring.set_color_scheme(scheme),
                Command::Clear => coloring.clear(),
                Command::TransformLine { line, reply } => {
                    let _ = reply.send(coloring.line_instructions(line));
                }
                Command::FindOverlapping {
                    layer,
                    range,
                    reply,
                } => {
                    let found = match layer {
                        LayerKind::Text => coloring.text_decorations().find_overlapping(range),
                        LayerKind::Opacity => match coloring.opacity_decorations() {
                            Some(layer) => layer.find_overlapping(range),
                            None => {
                                let _ = reply.send(Vec::new());
                                continue;
                            }
                        },
                    };
                    let _ = reply.send(found.cloned().collect());
                }
                Command::Shutdown => break,
            }
        }

        tracing::debug!("coloring worker stopped");
    }
}

impl Drop for ColoringWorker {
    fn drop(&mut self) {
        self.stop();
    }
}
