//! Bordered action buttons.

use egui::{vec2, Align2, Color32, CornerRadius, CursorIcon, FontId, Response, Sense, Stroke, StrokeKind, Ui};

use crate::{sizing, theme};

/// A bordered text button sized to its label.
pub struct ActionButton<'a> {
    label: &'a str,
    min_width: f32,
    hint: Option<&'a str>,
}

impl<'a> ActionButton<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            min_width: 0.0,
            hint: None,
        }
    }

    /// Never narrower than `width`.
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width;
        self
    }

    /// Hover text, usually the accelerator.
    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font = FontId::proportional(13.0);
        let text_width = ui
            .painter()
            .layout_no_wrap(self.label.to_string(), font.clone(), theme::TEXT)
            .size()
            .x;
        let size = vec2((text_width + 24.0).max(self.min_width), sizing::BUTTON_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if response.is_pointer_button_down_on() {
                theme::SELECTED_BG
            } else if response.hovered() {
                theme::HOVER_BG
            } else {
                Color32::WHITE
            };
            let radius = CornerRadius::same(sizing::CORNER_RADIUS);
            ui.painter().rect_filled(rect, radius, bg_color);
            ui.painter()
                .rect_stroke(rect, radius, Stroke::new(1.0, theme::BORDER), StrokeKind::Inside);
            ui.painter()
                .text(rect.center(), Align2::CENTER_CENTER, self.label, font, theme::TEXT);
        }

        let response: Response = match self.hint {
            Some(hint) => response.on_hover_text(hint),
            None => response,
        };
        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}
