//! Figure geometry: a physical size in inches drawn at some resolution.

use image::{imageops, Rgba, RgbaImage};

/// Opaque white, the figure background.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Placement of rendered markup inside the figure, in figure fractions.
///
/// `x` is the left edge measured from the left, `y` the vertical centre
/// measured from the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

impl Default for Anchor {
    fn default() -> Self {
        Self { x: 0.05, y: 0.5 }
    }
}

/// A drawable figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    width_in: f64,
    height_in: f64,
    dpi: f64,
}

impl Figure {
    pub const DEFAULT_DPI: f64 = 100.0;

    pub fn new(width_in: f64, height_in: f64, dpi: f64) -> Self {
        Self { width_in, height_in, dpi }
    }

    /// Create a figure that covers `width_px` x `height_px` at `dpi`.
    pub fn from_pixels(width_px: u32, height_px: u32, dpi: f64) -> Self {
        Self::new(width_px as f64 / dpi, height_px as f64 / dpi, dpi)
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Size in inches (width, height).
    pub fn size_inches(&self) -> (f64, f64) {
        (self.width_in, self.height_in)
    }

    pub fn set_size_inches(&mut self, width_in: f64, height_in: f64) {
        self.width_in = width_in;
        self.height_in = height_in;
    }

    /// Match the physical size to a new pixel size at the figure's own DPI.
    ///
    /// Returns false (and changes nothing) for a degenerate size or when the
    /// figure already has that pixel size.
    pub fn resize_pixels(&mut self, width_px: u32, height_px: u32) -> bool {
        if width_px == 0 || height_px == 0 || self.pixel_size() == (width_px, height_px) {
            return false;
        }
        self.set_size_inches(width_px as f64 / self.dpi, height_px as f64 / self.dpi);
        true
    }

    /// Pixel size at the figure's own DPI.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.pixel_size_at(self.dpi)
    }

    /// Pixel size when drawn at `dpi`. Never smaller than 1x1.
    pub fn pixel_size_at(&self, dpi: f64) -> (u32, u32) {
        let w = (self.width_in * dpi).round().max(1.0) as u32;
        let h = (self.height_in * dpi).round().max(1.0) as u32;
        (w, h)
    }

    /// An empty (all white) raster of the figure at `dpi`.
    pub fn blank(&self, dpi: f64) -> RgbaImage {
        let (w, h) = self.pixel_size_at(dpi);
        RgbaImage::from_pixel(w, h, WHITE)
    }

    /// Draw `ink` onto a blank raster at `anchor`. Anything that falls
    /// outside the figure is clipped.
    pub fn compose(&self, dpi: f64, ink: &RgbaImage, anchor: Anchor) -> RgbaImage {
        let mut canvas = self.blank(dpi);
        let (w, h) = canvas.dimensions();
        let left = (anchor.x * w as f64).round() as i64;
        let centre = (1.0 - anchor.y) * h as f64;
        let top = (centre - ink.height() as f64 / 2.0).round() as i64;
        imageops::overlay(&mut canvas, ink, left, top);
        canvas
    }
}
