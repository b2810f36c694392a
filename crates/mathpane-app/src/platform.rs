//! Platform services.

use mathpane_core::{Clipboard, ClipboardError};

/// The system clipboard.
#[cfg(feature = "native")]
pub struct SystemClipboard(arboard::Clipboard);

#[cfg(feature = "native")]
impl SystemClipboard {
    pub fn open() -> Result<Self, ClipboardError> {
        arboard::Clipboard::new()
            .map(Self)
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

#[cfg(feature = "native")]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.0
            .set_text(text)
            .map_err(|e| ClipboardError::Rejected(e.to_string()))
    }
}

/// Without the `native` feature there is no clipboard to open.
#[cfg(not(feature = "native"))]
pub struct SystemClipboard;

#[cfg(not(feature = "native"))]
impl SystemClipboard {
    pub fn open() -> Result<Self, ClipboardError> {
        Err(ClipboardError::Unavailable("built without the native feature".to_string()))
    }
}

#[cfg(not(feature = "native"))]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("built without the native feature".to_string()))
    }
}
