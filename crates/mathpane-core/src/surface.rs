//! Render surface: the live equation preview.

use image::RgbaImage;

use crate::config::RenderConfig;
use crate::figure::Figure;
use crate::typeset::{TypesetError, Typesetter};

/// What the surface is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    /// Blank source, blank figure.
    #[default]
    Empty,
    /// The markup was typeset.
    Rendered,
    /// The markup was rejected and the placeholder message is shown.
    Error,
}

impl RenderState {
    /// Whether the figure may be written to disk.
    pub fn can_export(self) -> bool {
        !matches!(self, RenderState::Error)
    }
}

/// The raw markup typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquationSource {
    raw: String,
}

impl EquationSource {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True when there is nothing but whitespace to typeset.
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// The markup wrapped in math delimiters. Blank sources stay unwrapped.
    pub fn wrapped(&self) -> String {
        if self.is_blank() {
            String::new()
        } else {
            format!("${}$", self.raw)
        }
    }
}

/// Owns the figure and redraws it whenever the source or size changes.
pub struct RenderSurface<T> {
    typesetter: T,
    config: RenderConfig,
    figure: Figure,
    source: EquationSource,
    state: RenderState,
    raster: RgbaImage,
    /// Bumped on every completed redraw.
    generation: u64,
}

impl<T: Typesetter> RenderSurface<T> {
    /// Create a surface of `width_px` x `height_px` showing an empty figure.
    pub fn new(typesetter: T, config: RenderConfig, width_px: u32, height_px: u32) -> Self {
        let figure = Figure::from_pixels(width_px.max(1), height_px.max(1), config.dpi);
        let raster = figure.blank(figure.dpi());
        Self {
            typesetter,
            config,
            figure,
            source: EquationSource::default(),
            state: RenderState::Empty,
            raster,
            generation: 0,
        }
    }

    /// Replace the markup and redraw.
    pub fn set_source(&mut self, text: &str) -> Result<RenderState, TypesetError> {
        self.source = EquationSource::new(text);
        self.render()
    }

    /// Redraw the current markup at the figure's own resolution.
    ///
    /// Markup the typesetter rejects puts the surface into
    /// [`RenderState::Error`] and shows the configured placeholder. Any other
    /// failure is returned and leaves the previous drawing in place.
    pub fn render(&mut self) -> Result<RenderState, TypesetError> {
        let (raster, state) = self.paint(self.figure.dpi())?;
        self.raster = raster;
        self.state = state;
        self.generation += 1;
        Ok(state)
    }

    /// Follow a new on-screen pixel size. Redraws only when the size changed.
    pub fn resize(&mut self, width_px: u32, height_px: u32) -> Result<bool, TypesetError> {
        if !self.figure.resize_pixels(width_px, height_px) {
            return Ok(false);
        }
        log::debug!("Figure resized to {}x{} px", width_px, height_px);
        self.render()?;
        Ok(true)
    }

    /// Rasterise the figure at an arbitrary resolution without touching the
    /// on-screen state.
    pub fn draw(&self, dpi: f64) -> Result<RgbaImage, TypesetError> {
        self.paint(dpi).map(|(raster, _)| raster)
    }

    fn paint(&self, dpi: f64) -> Result<(RgbaImage, RenderState), TypesetError> {
        if self.source.is_blank() {
            return Ok((self.figure.blank(dpi), RenderState::Empty));
        }

        let font_size = self.config.font_size;
        match self.typesetter.typeset(&self.source.wrapped(), font_size, dpi) {
            Ok(ink) => Ok((self.figure.compose(dpi, &ink, self.config.anchor), RenderState::Rendered)),
            Err(TypesetError::Parse(reason)) => {
                log::debug!("Markup rejected: {}", reason);
                let ink = self.typesetter.typeset(&self.config.error_message, font_size, dpi)?;
                Ok((self.figure.compose(dpi, &ink, self.config.anchor), RenderState::Error))
            }
            Err(e) => Err(e),
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn source(&self) -> &EquationSource {
        &self.source
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn typesetter(&self) -> &T {
        &self.typesetter
    }

    /// The figure as last drawn on screen.
    pub fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    /// Changes whenever [`raster`](Self::raster) was redrawn.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use image::{Rgba, RgbaImage};

    use crate::typeset::{TypesetError, Typesetter};

    /// Draws every character as a solid block; unbalanced braces are a parse
    /// error and the markup "boom" fails outright.
    #[derive(Default)]
    pub struct BlockTypesetter {
        pub calls: RefCell<Vec<String>>,
    }

    impl Typesetter for BlockTypesetter {
        fn typeset(&self, markup: &str, font_size: f64, dpi: f64) -> Result<RgbaImage, TypesetError> {
            self.calls.borrow_mut().push(markup.to_string());

            if markup.contains("boom") {
                return Err(TypesetError::Layout("boom".to_string()));
            }
            let mut depth = 0i32;
            for c in markup.chars() {
                match c {
                    '{' => depth += 1,
                    '}' => depth -= 1,
                    _ => {}
                }
                if depth < 0 {
                    return Err(TypesetError::Parse("unexpected '}'".to_string()));
                }
            }
            if depth != 0 {
                return Err(TypesetError::Parse("expected '}'".to_string()));
            }

            let px = (font_size * dpi / 72.0).round().max(1.0) as u32;
            let glyphs = markup.chars().filter(|c| *c != '$').count().max(1) as u32;
            // Errors are drawn in grey so tests can tell them apart.
            let shade = if markup.starts_with('$') { 0 } else { 128 };
            Ok(RgbaImage::from_pixel(glyphs * px / 2, px, Rgba([shade, shade, shade, 255])))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::BlockTypesetter;
    use super::*;
    use crate::figure::WHITE;

    fn surface() -> RenderSurface<BlockTypesetter> {
        RenderSurface::new(BlockTypesetter::default(), RenderConfig::default(), 500, 200)
    }

    fn has_shade(raster: &RgbaImage, shade: u8) -> bool {
        raster.pixels().any(|p| p.0 == [shade, shade, shade, 255])
    }

    #[test]
    fn test_source_wrapping() {
        assert_eq!(EquationSource::new(r"\frac{1}{2}").wrapped(), r"$\frac{1}{2}$");
        assert_eq!(EquationSource::new("").wrapped(), "");
        assert_eq!(EquationSource::new("   ").wrapped(), "");
        assert!(EquationSource::new(" \t").is_blank());
    }

    #[test]
    fn test_new_surface_is_empty() {
        let surface = surface();
        assert_eq!(surface.state(), RenderState::Empty);
        assert_eq!(surface.raster().dimensions(), (500, 200));
        assert!(surface.raster().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_accepted_markup_renders() {
        let mut surface = surface();
        let state = surface.set_source(r"\frac{1}{2}").unwrap();
        assert_eq!(state, RenderState::Rendered);
        assert_eq!(surface.state(), RenderState::Rendered);
        assert!(has_shade(surface.raster(), 0));
        assert!(!has_shade(surface.raster(), 128));
        assert_eq!(surface.typesetter().calls.borrow().as_slice(), [r"$\frac{1}{2}$"]);
    }

    #[test]
    fn test_rejected_markup_shows_placeholder() {
        let mut surface = surface();
        let state = surface.set_source(r"\frac{1}{2").unwrap();
        assert_eq!(state, RenderState::Error);
        assert!(!state.can_export());
        assert!(has_shade(surface.raster(), 128));
        assert!(!has_shade(surface.raster(), 0));
        let calls = surface.typesetter().calls.borrow();
        assert_eq!(calls.last().map(String::as_str), Some("Parsing Error in MathTeX"));
    }

    #[test]
    fn test_recovers_after_error() {
        let mut surface = surface();
        surface.set_source("{").unwrap();
        assert_eq!(surface.state(), RenderState::Error);
        surface.set_source("{x}").unwrap();
        assert_eq!(surface.state(), RenderState::Rendered);
    }

    #[test]
    fn test_clearing_source_blanks_figure() {
        let mut surface = surface();
        surface.set_source("x^2").unwrap();
        let calls_before = surface.typesetter().calls.borrow().len();
        assert_eq!(surface.set_source("").unwrap(), RenderState::Empty);
        assert!(surface.raster().pixels().all(|p| *p == WHITE));
        assert!(surface.state().can_export());
        // Blank sources never reach the typesetter.
        assert_eq!(surface.typesetter().calls.borrow().len(), calls_before);
    }

    #[test]
    fn test_other_failures_propagate() {
        let mut surface = surface();
        surface.set_source("x").unwrap();
        let generation = surface.generation();
        let result = surface.set_source("boom");
        assert!(matches!(result, Err(TypesetError::Layout(_))));
        // Last completed render is still what is shown.
        assert_eq!(surface.state(), RenderState::Rendered);
        assert_eq!(surface.generation(), generation);
    }

    #[test]
    fn test_resize_redraws_at_new_size() {
        let mut surface = surface();
        surface.set_source("x").unwrap();
        let generation = surface.generation();
        assert!(surface.resize(800, 275).unwrap());
        assert_eq!(surface.raster().dimensions(), (800, 275));
        assert!(surface.generation() > generation);
        assert!(!surface.resize(800, 275).unwrap());
        assert!(!surface.resize(0, 0).unwrap());
    }

    #[test]
    fn test_draw_at_print_resolution() {
        let mut surface = surface();
        surface.set_source("x").unwrap();
        let print = surface.draw(300.0).unwrap();
        assert_eq!(print.dimensions(), (1500, 600));
        // On-screen raster is untouched.
        assert_eq!(surface.raster().dimensions(), (500, 200));
    }
}
