//! Render and export configuration.
//!
//! These are handed to the constructors that need them instead of living in
//! module-level statics, so the surface and exporter can be driven from tests.

use std::path::PathBuf;

use crate::figure::{Anchor, Figure};

/// Message drawn in place of markup the typesetter rejected.
pub const PARSE_ERROR_MESSAGE: &str = "Parsing Error in MathTeX";

/// File the exporter writes to unless told otherwise.
pub const DEFAULT_EXPORT_FILE: &str = "Rendered_Equation.png";

/// How the render surface lays out markup.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Font size in points.
    pub font_size: f64,
    /// Where the rendered markup sits in the figure.
    pub anchor: Anchor,
    /// Screen resolution of the figure.
    pub dpi: f64,
    /// Placeholder drawn when the markup cannot be parsed.
    pub error_message: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size: 20.0,
            anchor: Anchor::default(),
            dpi: Figure::DEFAULT_DPI,
            error_message: PARSE_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Where and how an equation is exported.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Output file, overwritten on every export.
    pub path: PathBuf,
    /// Print resolution used for the written image.
    pub dpi: f64,
    /// White margin added around the cropped ink, in pixels.
    pub border: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_EXPORT_FILE),
            dpi: 300.0,
            border: 10,
        }
    }
}

impl ExportConfig {
    /// Same settings, different output file.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}
