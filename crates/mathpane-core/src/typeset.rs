//! Seam between the render surface and whatever lays out the markup.

use image::RgbaImage;
use thiserror::Error;

/// Typesetting errors.
#[derive(Debug, Error)]
pub enum TypesetError {
    /// The markup itself is malformed. The surface recovers from this one.
    #[error("Parse error: {0}")]
    Parse(String),
    /// The markup parsed but could not be laid out or rasterised.
    #[error("Layout failed: {0}")]
    Layout(String),
    /// No usable fonts.
    #[error("Font setup failed: {0}")]
    Fonts(String),
}

impl TypesetError {
    pub fn is_parse(&self) -> bool {
        matches!(self, TypesetError::Parse(_))
    }
}

/// Turns markup into a tightly cropped raster on an opaque white background.
///
/// `font_size` is in points and `dpi` sets how many pixels a point covers
/// (`dpi / 72`), so the same call at 300 DPI yields a print-sized raster.
pub trait Typesetter {
    fn typeset(&self, markup: &str, font_size: f64, dpi: f64) -> Result<RgbaImage, TypesetError>;
}

impl<T: Typesetter + ?Sized> Typesetter for Box<T> {
    fn typeset(&self, markup: &str, font_size: f64, dpi: f64) -> Result<RgbaImage, TypesetError> {
        (**self).typeset(markup, font_size, dpi)
    }
}

impl<T: Typesetter + ?Sized> Typesetter for &T {
    fn typeset(&self, markup: &str, font_size: f64, dpi: f64) -> Result<RgbaImage, TypesetError> {
        (**self).typeset(markup, font_size, dpi)
    }
}
