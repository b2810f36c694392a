//! Typst-backed [`Typesetter`].

mod world;

pub use world::{FontError, FontOptions, FontStore};

use image::RgbaImage;
use mathpane_core::{TypesetError, Typesetter};

use crate::mathtext::{self, MathText};

/// Page margin around the equation, as a fraction of the font size.
const MARGIN_EM: f64 = 0.1;

/// Lays out markup with typst and rasterises it with `typst-render`.
pub struct TypstTypesetter {
    fonts: FontStore,
}

impl TypstTypesetter {
    pub fn new(options: FontOptions) -> Result<Self, TypesetError> {
        let fonts = FontStore::load(options).map_err(|e| TypesetError::Fonts(e.to_string()))?;
        log::debug!(
            "Typesetter ready: {} font faces in {:.1?}",
            fonts.font_count(),
            fonts.load_time()
        );
        Ok(Self { fonts })
    }

    /// A typesetter using only the fonts bundled into the binary.
    pub fn embedded() -> Result<Self, TypesetError> {
        Self::new(FontOptions::default())
    }

    pub fn fonts(&self) -> &FontStore {
        &self.fonts
    }
}

/// The standalone typst document for `text` at `font_size` points.
pub fn document_source(text: &MathText, font_size: f64) -> String {
    let margin = font_size * MARGIN_EM;
    format!(
        "#set page(width: auto, height: auto, margin: {margin}pt, fill: white)\n\
         #set text(size: {font_size}pt)\n\
         {}\n",
        text.to_typst()
    )
}

impl Typesetter for TypstTypesetter {
    fn typeset(&self, markup: &str, font_size: f64, dpi: f64) -> Result<RgbaImage, TypesetError> {
        let text = mathtext::parse(markup).map_err(|e| TypesetError::Parse(e.to_string()))?;
        let source = document_source(&text, font_size);

        // Markup the parser accepts can still be rejected by typst, for
        // example an accent over an empty group. Treat that as a parse
        // failure so the surface shows its placeholder.
        let document = self.fonts.compile(source).map_err(|message| {
            log::warn!("typst rejected lowered markup: {}", message);
            TypesetError::Parse(message)
        })?;

        let page = document
            .pages
            .first()
            .ok_or_else(|| TypesetError::Layout("document has no pages".to_string()))?;
        let pixmap = typst_render::render(page, (dpi / 72.0) as f32);
        flatten_on_white(pixmap.width(), pixmap.height(), pixmap.data())
    }
}

/// Composite premultiplied RGBA onto opaque white.
fn flatten_on_white(width: u32, height: u32, premultiplied: &[u8]) -> Result<RgbaImage, TypesetError> {
    let mut pixels = Vec::with_capacity(premultiplied.len());
    for px in premultiplied.chunks_exact(4) {
        let transparency = 255 - px[3];
        pixels.extend_from_slice(&[
            px[0].saturating_add(transparency),
            px[1].saturating_add(transparency),
            px[2].saturating_add(transparency),
            255,
        ]);
    }
    RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| TypesetError::Layout(format!("raster size mismatch for {width}x{height}")))
}
