//! Single-line text field with a caret and an optional selection.
//!
//! Positions are character indices, not byte offsets.

/// Text plus caret state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    caret: usize,
    /// Other end of the selection, when something is selected.
    anchor: Option<usize>,
}

impl TextField {
    /// A field holding `text` with the caret at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.chars().count();
        Self { text, caret, anchor: None }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mutable access for widgets that edit the string in place. Call
    /// [`set_caret`](Self::set_caret) afterwards to resync the caret.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The selected character range, if any.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.anchor
            .filter(|&anchor| anchor != self.caret)
            .map(|anchor| (anchor.min(self.caret), anchor.max(self.caret)))
    }

    /// Move the caret, dropping any selection. Clamped to the text.
    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.char_len());
        self.anchor = None;
    }

    /// Select from `anchor` to `caret`; the caret ends up at `caret`.
    pub fn select(&mut self, anchor: usize, caret: usize) {
        let len = self.char_len();
        self.anchor = Some(anchor.min(len));
        self.caret = caret.min(len);
    }

    /// Replace the whole text and put the caret at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        *self = Self::new(text);
    }

    /// Insert `snippet` at the caret, replacing the selection if there is
    /// one, and leave the caret right after it.
    pub fn insert_at_caret(&mut self, snippet: &str) {
        let (start, end) = self.selection().unwrap_or((self.caret, self.caret));
        let start_byte = self.byte_offset(start);
        let end_byte = self.byte_offset(end);
        self.text.replace_range(start_byte..end_byte, snippet);
        self.caret = start + snippet.chars().count();
        self.anchor = None;
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }
}
