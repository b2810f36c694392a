//! MathPane typesetting.
//!
//! Parses TeX-style math markup and lays it out with typst, producing the
//! rasters shown by [`mathpane_core::RenderSurface`].

pub mod engine;
pub mod mathtext;

pub use engine::{FontOptions, FontStore, TypstTypesetter};
pub use mathtext::{MathText, ParseError, Segment};
