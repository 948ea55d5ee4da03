//! Engine configuration.

use crate::error::ColoringError;
use serde::{Deserialize, Serialize};

/// How the opacity layer's value is chosen when a line is styled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayOpacity {
    /// Apply this value to every overlay decoration, ignoring the stored opacity.
    Fixed(f32),
    /// Apply each decoration's stored opacity.
    PerEntry,
}

impl Default for OverlayOpacity {
    fn default() -> Self {
        Self::Fixed(0.5)
    }
}

/// Configuration for [`TextColoring`](crate::TextColoring) and
/// [`ColoringWorker`](crate::ColoringWorker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColoringConfig {
    /// Opacity applied to overlay decorations when styling a line.
    pub overlay_opacity: OverlayOpacity,
    /// Opacity stored on decorations classified as unnecessary code.
    pub unnecessary_opacity: f32,
    /// Name of the worker thread.
    pub worker_thread_name: String,
}

impl ColoringConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ColoringError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ColoringConfig {
    fn default() -> Self {
        Self {
            overlay_opacity: OverlayOpacity::default(),
            unnecessary_opacity: 0.5,
            worker_thread_name: "editor-coloring".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ColoringConfig::default();
        assert_eq!(config.overlay_opacity, OverlayOpacity::Fixed(0.5));
        assert_eq!(config.unnecessary_opacity, 0.5);
    }

    #[test]
    fn test_from_json() {
        let config =
            ColoringConfig::from_json(r#"{ "overlay_opacity": "per_entry" }"#).unwrap();
        assert_eq!(config.overlay_opacity, OverlayOpacity::PerEntry);
        assert_eq!(config.worker_thread_name, "editor-coloring");

        let config =
            ColoringConfig::from_json(r#"{ "overlay_opacity": { "fixed": 0.25 } }"#).unwrap();
        assert_eq!(config.overlay_opacity, OverlayOpacity::Fixed(0.25));
    }

    #[test]
    fn test_from_bad_json() {
        assert!(matches!(
            ColoringConfig::from_json("{ nope").unwrap_err(),
            ColoringError::Config(_)
        ));
    }
}
