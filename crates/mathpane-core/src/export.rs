//! Export the rendered equation to a PNG file, cropped to its ink.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ExportConfig;
#[cfg(feature = "autocrop")]
use crate::crop::{self, CropBox};
use crate::surface::RenderSurface;
use crate::typeset::{TypesetError, Typesetter};

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to draw the figure: {0}")]
    Typeset(#[from] TypesetError),
}

/// What an export call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The surface shows a parse error; nothing was written.
    Refused,
    /// The figure was written to `path`.
    Written {
        path: PathBuf,
        /// True when the file was cropped to its ink afterwards.
        cropped: bool,
    },
}

/// Write the surface's figure to `config.path` and crop it when the crop
/// stage is available.
///
/// A surface in the error state is refused and leaves the file system alone.
pub fn export_to_file<T: Typesetter>(
    surface: &RenderSurface<T>,
    config: &ExportConfig,
) -> Result<ExportOutcome, ExportError> {
    if !surface.state().can_export() {
        log::warn!("TeX rendering error: figure image NOT saved to a file");
        return Ok(ExportOutcome::Refused);
    }

    let figure = surface.draw(config.dpi)?;
    let png_data = encode_png(figure.as_raw(), figure.width(), figure.height(), config.dpi)?;
    write_file(&config.path, &png_data)?;
    log::info!("Equation graphic saved to file [{}]", config.path.display());

    let cropped = match crop_stage() {
        Some(crop) => {
            crop(&config.path, config.border)?;
            log::info!("Cropped equation graphic saved");
            true
        }
        None => {
            log::debug!("Crop stage unavailable, keeping the full figure");
            false
        }
    };

    Ok(ExportOutcome::Written { path: config.path.clone(), cropped })
}

#[cfg(feature = "autocrop")]
type CropStage = fn(&Path, u32) -> Result<Option<CropBox>, ExportError>;
#[cfg(not(feature = "autocrop"))]
type CropStage = fn(&Path, u32) -> Result<(), ExportError>;

#[cfg(feature = "autocrop")]
fn crop_stage() -> Option<CropStage> {
    Some(crop::autocrop_file)
}

#[cfg(not(feature = "autocrop"))]
fn crop_stage() -> Option<CropStage> {
    None
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, data).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode RGBA pixel data to PNG bytes, recording the resolution.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32, dpi: f64) -> Result<Vec<u8>, png::EncodingError> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let pixels_per_metre = (dpi / 0.0254).round() as u32;
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: pixels_per_metre,
            yppu: pixels_per_metre,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba_data)?;
    }
    Ok(png_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::surface::testing::BlockTypesetter;
    use crate::surface::RenderState;

    fn surface_with(source: &str) -> RenderSurface<BlockTypesetter> {
        let mut surface = RenderSurface::new(BlockTypesetter::default(), RenderConfig::default(), 500, 200);
        surface.set_source(source).unwrap();
        surface
    }

    #[test]
    fn test_encode_png_roundtrips_dimensions() {
        let pixels = vec![255u8; 3 * 2 * 4];
        let data = encode_png(&pixels, 3, 2, 300.0).unwrap();
        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }

    #[test]
    fn test_export_refused_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::default().with_path(dir.path().join("eq.png"));
        let surface = surface_with(r"\frac{1}{2");
        assert_eq!(surface.state(), RenderState::Error);

        let outcome = export_to_file(&surface, &config).unwrap();
        assert_eq!(outcome, ExportOutcome::Refused);
        assert!(!config.path.exists());
    }

    #[test]
    fn test_export_refusal_leaves_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::default().with_path(dir.path().join("eq.png"));
        export_to_file(&surface_with("x"), &config).unwrap();
        let before = std::fs::read(&config.path).unwrap();

        export_to_file(&surface_with("{"), &config).unwrap();
        assert_eq!(std::fs::read(&config.path).unwrap(), before);
    }

    #[cfg(feature = "autocrop")]
    #[test]
    fn test_export_writes_cropped_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::default().with_path(dir.path().join("eq.png"));
        let surface = surface_with(r"\frac{1}{2}");

        let outcome = export_to_file(&surface, &config).unwrap();
        assert_eq!(
            outcome,
            ExportOutcome::Written { path: config.path.clone(), cropped: true }
        );

        // Eleven glyph blocks at 300 DPI, plus a 10px border each side.
        let written = image::open(&config.path).unwrap();
        let px = (20.0_f64 * 300.0 / 72.0).round() as u32;
        assert_eq!(written.width(), 11 * px / 2 + 20);
        assert_eq!(written.height(), px + 20);
    }

    #[test]
    fn test_export_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::default().with_path(dir.path().join("eq.png"));
        let surface = surface_with("x^2");

        export_to_file(&surface, &config).unwrap();
        let first = std::fs::read(&config.path).unwrap();
        export_to_file(&surface, &config).unwrap();
        let second = std::fs::read(&config.path).unwrap();
        assert_eq!(first, second);
    }

    #[cfg(feature = "autocrop")]
    #[test]
    fn test_export_empty_figure() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::default().with_path(dir.path().join("eq.png"));
        let surface = surface_with("");
        assert_eq!(surface.state(), RenderState::Empty);

        let outcome = export_to_file(&surface, &config).unwrap();
        assert!(matches!(outcome, ExportOutcome::Written { .. }));
        let written = image::open(&config.path).unwrap().to_rgba8();
        assert_eq!(written.dimensions(), (20, 20));
        assert!(written.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::default().with_path(dir.path().join("nope").join("eq.png"));
        let result = export_to_file(&surface_with("x"), &config);
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }
}
