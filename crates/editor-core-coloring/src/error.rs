//! Error type shared by the coloring engine and its worker.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by the coloring engine and its worker.
pub enum ColoringError {
    #[error("invalid argument: {0}")]
    /// A required argument was missing or unusable. Nothing was modified.
    InvalidArgument(&'static str),

    #[error("invalid color '{0}': expected #RRGGBB or #RRGGBBAA")]
    /// A color string could not be parsed.
    InvalidColor(String),

    #[error("configuration parse error: {0}")]
    /// Configuration JSON was malformed.
    Config(#[from] serde_json::Error),

    #[error("failed to spawn coloring worker: {0}")]
    /// The worker thread could not be started.
    Spawn(#[source] std::io::Error),

    #[error("coloring worker has stopped")]
    /// The worker queue is disconnected.
    WorkerStopped,
}
