//! Typst `World` for single in-memory equation documents.
//!
//! Fonts are loaded once into a [`FontStore`] and shared by every compile.
//! Each compile gets a short-lived [`EquationWorld`] holding one source
//! file; there is no file system access and no package resolution.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;
use typst::{
    Library, LibraryExt,
    diag::{FileError, FileResult},
    foundations::{Bytes, Datetime},
    layout::PagedDocument,
    syntax::{FileId, Source, VirtualPath},
    text::{Font, FontBook},
    utils::LazyHash,
};

const MAIN_PATH: &str = "/equation.typ";

/// Memoized results unused for this many compiles are dropped.
const CACHE_MAX_AGE: usize = 10;

/// Font loading errors.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("No fonts could be loaded")]
    NoFonts,
}

/// Which fonts to offer the typesetter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontOptions {
    /// Add installed system fonts after the embedded ones. Needs the
    /// `system-fonts` feature; ignored without it.
    pub system_fonts: bool,
}

/// Standard library, font book and fonts, in `FontBook` index order.
pub struct FontStore {
    library: LazyHash<Library>,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    load_time: Duration,
}

impl FontStore {
    pub fn load(options: FontOptions) -> Result<Self, FontError> {
        let start = Instant::now();

        let mut fonts: Vec<Font> = typst_assets::fonts()
            .flat_map(|data| Font::iter(Bytes::new(data)))
            .collect();
        log::debug!("Loaded {} embedded font faces", fonts.len());

        if options.system_fonts {
            load_system_fonts(&mut fonts);
        }

        if fonts.is_empty() {
            return Err(FontError::NoFonts);
        }

        let book = FontBook::from_fonts(fonts.iter());
        Ok(Self {
            library: LazyHash::new(Library::default()),
            book: LazyHash::new(book),
            fonts,
            load_time: start.elapsed(),
        })
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn load_time(&self) -> Duration {
        self.load_time
    }

    /// Compile `text` as a standalone document. Errors are the joined
    /// typst diagnostics.
    pub fn compile(&self, text: String) -> Result<PagedDocument, String> {
        let world = EquationWorld::new(self, text);
        let warned = typst::compile::<PagedDocument>(&world);
        // Each compile is a new source, so old memo entries never hit again.
        comemo::evict(CACHE_MAX_AGE);
        for warning in &warned.warnings {
            log::debug!("typst warning: {}", warning.message);
        }
        warned.output.map_err(|errors| {
            errors
                .iter()
                .map(|diagnostic| diagnostic.message.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        })
    }
}

#[cfg(feature = "system-fonts")]
fn load_system_fonts(fonts: &mut Vec<Font>) {
    use fontdb::{Database, Source as FontSource};
    use std::sync::Arc;

    let mut db = Database::new();
    db.load_system_fonts();

    let before = fonts.len();
    for face in db.faces() {
        let FontSource::File(path) = &face.source else {
            continue;
        };
        let Ok(data) = std::fs::read(path) else {
            log::trace!("Skipping unreadable font {}", path.display());
            continue;
        };
        let owned: Arc<[u8]> = Arc::from(data);
        if let Some(font) = Font::new(Bytes::new(owned), face.index) {
            fonts.push(font);
        }
    }
    log::debug!("Loaded {} system font faces", fonts.len() - before);
}

#[cfg(not(feature = "system-fonts"))]
fn load_system_fonts(_fonts: &mut Vec<Font>) {
    log::warn!("System fonts requested but the system-fonts feature is disabled");
}

/// One compile: a single main source over a shared font store.
struct EquationWorld<'a> {
    store: &'a FontStore,
    main: FileId,
    source: Source,
}

impl<'a> EquationWorld<'a> {
    fn new(store: &'a FontStore, text: String) -> Self {
        let main = FileId::new(None, VirtualPath::new(MAIN_PATH));
        Self {
            store,
            main,
            source: Source::new(main, text),
        }
    }
}

impl typst::World for EquationWorld<'_> {
    fn library(&self) -> &LazyHash<Library> {
        &self.store.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.store.book
    }

    fn main(&self) -> FileId {
        self.main
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main {
            Ok(self.source.clone())
        } else {
            Err(FileError::NotFound(PathBuf::from(MAIN_PATH)))
        }
    }

    fn file(&self, _id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(PathBuf::from(MAIN_PATH)))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.store.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        None
    }
}
