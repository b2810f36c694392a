//! Clipboard seam. The platform clipboard lives in the app crate.

use thiserror::Error;

/// Clipboard errors.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Failed to open clipboard: {0}")]
    Unavailable(String),
    #[error("Clipboard rejected the text: {0}")]
    Rejected(String),
}

/// Somewhere text can be copied to.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Open a clipboard with `open` and copy `text` into it.
///
/// Failures are logged and reported as `false`; they are never fatal.
pub fn copy_text<C, F>(open: F, text: &str) -> bool
where
    C: Clipboard,
    F: FnOnce() -> Result<C, ClipboardError>,
{
    let result = open().and_then(|mut clipboard| clipboard.set_text(text));
    match result {
        Ok(()) => {
            log::info!("Equation copied to clipboard ({} chars)", text.chars().count());
            true
        }
        Err(e) => {
            log::error!("{}", e);
            false
        }
    }
}
