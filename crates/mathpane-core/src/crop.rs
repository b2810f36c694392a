//! Ink cropping for exported equations.
//!
//! The figure is always drawn on white, so the ink is simply every pixel that
//! is not white: invert the luminance and take the bounding box of whatever
//! is left non-zero.

use std::path::Path;

use image::{imageops, DynamicImage, GrayImage, ImageFormat, RgbaImage};

use crate::export::ExportError;
use crate::figure::WHITE;

/// A pixel rectangle inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropBox {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Smallest rectangle containing every non-zero pixel, or `None` if all
/// pixels are zero.
pub fn bounding_box(mask: &GrayImage) -> Option<CropBox> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for (x, y, pixel) in mask.enumerate_pixels() {
        if pixel.0[0] != 0 {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| CropBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Bounding box of everything that is not white.
pub fn ink_bounds(image: &DynamicImage) -> Option<CropBox> {
    let mut mask = image.to_luma8();
    imageops::invert(&mut mask);
    bounding_box(&mask)
}

/// Surround `image` with `border` pixels of white on every side.
pub fn pad(image: &RgbaImage, border: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(
        image.width() + 2 * border,
        image.height() + 2 * border,
        WHITE,
    );
    imageops::overlay(&mut canvas, image, border as i64, border as i64);
    canvas
}

/// Crop `image` to its ink and pad the result. An image without ink becomes
/// a blank square of `2 * border` pixels.
pub fn crop_to_ink(image: &DynamicImage, border: u32) -> (RgbaImage, Option<CropBox>) {
    match ink_bounds(image) {
        Some(bounds) => {
            let cropped = image
                .crop_imm(bounds.x, bounds.y, bounds.width, bounds.height)
                .to_rgba8();
            (pad(&cropped, border), Some(bounds))
        }
        None => (RgbaImage::from_pixel(2 * border, 2 * border, WHITE), None),
    }
}

/// Re-open the PNG at `path`, crop it to its ink, pad it and write it back.
pub fn autocrop_file(path: &Path, border: u32) -> Result<Option<CropBox>, ExportError> {
    let image = image::open(path)?;
    let (cropped, bounds) = crop_to_ink(&image, border);
    cropped.save_with_format(path, ImageFormat::Png)?;
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgba};

    fn canvas_with_ink(w: u32, h: u32, ink: &[(u32, u32)]) -> DynamicImage {
        let mut image = RgbaImage::from_pixel(w, h, WHITE);
        for &(x, y) in ink {
            image.put_pixel(x, y, Rgba([20, 20, 20, 255]));
        }
        DynamicImage::ImageRgba8(image)
    }

    #[test]
    fn test_bounding_box_of_mask() {
        let mut mask = GrayImage::new(10, 10);
        assert_eq!(bounding_box(&mask), None);
        mask.put_pixel(2, 3, Luma([1]));
        mask.put_pixel(6, 8, Luma([255]));
        assert_eq!(
            bounding_box(&mask),
            Some(CropBox { x: 2, y: 3, width: 5, height: 6 })
        );
    }

    #[test]
    fn test_ink_bounds_ignores_white() {
        let image = canvas_with_ink(40, 30, &[(10, 5), (19, 12)]);
        assert_eq!(
            ink_bounds(&image),
            Some(CropBox { x: 10, y: 5, width: 10, height: 8 })
        );
    }

    #[test]
    fn test_faint_antialiasing_counts_as_ink() {
        let mut image = RgbaImage::from_pixel(8, 8, WHITE);
        image.put_pixel(7, 7, Rgba([254, 254, 254, 255]));
        let bounds = ink_bounds(&DynamicImage::ImageRgba8(image));
        assert_eq!(bounds, Some(CropBox { x: 7, y: 7, width: 1, height: 1 }));
    }

    #[test]
    fn test_crop_adds_exact_border() {
        let image = canvas_with_ink(40, 30, &[(10, 5), (19, 12)]);
        let (cropped, bounds) = crop_to_ink(&image, 10);
        let bounds = bounds.unwrap();
        assert_eq!(cropped.dimensions(), (bounds.width + 20, bounds.height + 20));

        // Ink corners land exactly `border` pixels in.
        assert_eq!(cropped.get_pixel(10, 10), &Rgba([20, 20, 20, 255]));
        assert_eq!(cropped.get_pixel(19, 17), &Rgba([20, 20, 20, 255]));
        // The border itself is white all round.
        for x in 0..cropped.width() {
            for y in 0..10 {
                assert_eq!(cropped.get_pixel(x, y), &WHITE);
                assert_eq!(cropped.get_pixel(x, cropped.height() - 1 - y), &WHITE);
            }
        }
        for y in 0..cropped.height() {
            for x in 0..10 {
                assert_eq!(cropped.get_pixel(x, y), &WHITE);
                assert_eq!(cropped.get_pixel(cropped.width() - 1 - x, y), &WHITE);
            }
        }
    }

    #[test]
    fn test_crop_never_exceeds_image() {
        let image = canvas_with_ink(12, 9, &[(0, 0), (11, 8)]);
        let (cropped, bounds) = crop_to_ink(&image, 3);
        assert_eq!(bounds, Some(CropBox { x: 0, y: 0, width: 12, height: 9 }));
        assert_eq!(cropped.dimensions(), (18, 15));
    }

    #[test]
    fn test_blank_image_becomes_border_square() {
        let image = canvas_with_ink(50, 20, &[]);
        let (cropped, bounds) = crop_to_ink(&image, 10);
        assert_eq!(bounds, None);
        assert_eq!(cropped.dimensions(), (20, 20));
        assert!(cropped.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_autocrop_file_rewrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eq.png");
        canvas_with_ink(40, 30, &[(10, 5), (19, 12)])
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        let bounds = autocrop_file(&path, 2).unwrap();
        assert!(bounds.is_some());
        let reloaded = image::open(&path).unwrap();
        assert_eq!(reloaded.width(), 14);
        assert_eq!(reloaded.height(), 12);
    }

    #[test]
    fn test_autocrop_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = autocrop_file(&dir.path().join("missing.png"), 10);
        assert!(result.is_err());
    }
}
