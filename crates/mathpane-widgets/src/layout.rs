//! Layout helpers: labels.

use egui::{RichText, Ui};

use crate::theme;

/// A small, muted heading.
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_MUTED));
}

/// The label shown left of an input field.
pub fn field_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(13.0).color(theme::TEXT));
}
