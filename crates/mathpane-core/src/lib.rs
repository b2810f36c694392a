//! MathPane Core Library
//!
//! Platform-agnostic logic for the MathPane equation editor: the render surface
//! and its state, PNG export with ink cropping, the shortcut table and the
//! caret-aware text field. Nothing here needs a window or a GPU.

pub mod clipboard;
pub mod config;
#[cfg(feature = "autocrop")]
pub mod crop;
pub mod export;
pub mod figure;
pub mod shortcuts;
pub mod surface;
pub mod text_field;
pub mod typeset;

pub use clipboard::{copy_text, Clipboard, ClipboardError};
pub use config::{ExportConfig, RenderConfig};
pub use export::{export_to_file, ExportError, ExportOutcome};
pub use figure::{Anchor, Figure};
pub use shortcuts::{Accelerator, Command, Keymap, Modifiers, ShortcutEntry, ShortcutError, ShortcutTable};
pub use surface::{EquationSource, RenderState, RenderSurface};
pub use text_field::TextField;
pub use typeset::{Typesetter, TypesetError};
