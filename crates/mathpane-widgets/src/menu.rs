//! Menu components: menu bar titles, menu items, separators, panel frames.

use egui::{
    vec2, Align2, Color32, CornerRadius, CursorIcon, FontId, Frame, Margin, Pos2, Response, Sense,
    Stroke, Ui,
};

use crate::{sizing, theme};

/// A menu bar title. Highlighted while its menu is open.
pub fn menu_title(ui: &mut Ui, title: &str, open: bool) -> Response {
    let font = FontId::proportional(13.0);
    let text_width = ui
        .painter()
        .layout_no_wrap(title.to_string(), font.clone(), theme::TEXT)
        .size()
        .x;
    let size = vec2(text_width + 16.0, sizing::MENU_ROW);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let bg_color = if open {
            theme::SELECTED_BG
        } else if response.hovered() {
            theme::HOVER_BG
        } else {
            Color32::TRANSPARENT
        };
        ui.painter()
            .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
        ui.painter()
            .text(rect.center(), Align2::CENTER_CENTER, title, font, theme::TEXT);
    }

    response.on_hover_cursor(CursorIcon::PointingHand)
}

/// Show a menu item with label and accelerator hint.
pub fn menu_item(ui: &mut Ui, label: &str, accelerator: &str) -> bool {
    menu_item_enabled(ui, label, accelerator, true)
}

/// Show a menu item that can be enabled/disabled.
pub fn menu_item_enabled(ui: &mut Ui, label: &str, accelerator: &str, enabled: bool) -> bool {
    let width = ui.available_width().max(sizing::MENU_WIDTH);
    let (rect, response) = ui.allocate_exact_size(vec2(width, sizing::MENU_ROW), Sense::click());

    if ui.is_rect_visible(rect) {
        if enabled && response.hovered() {
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), theme::HOVER_BG);
        }

        let (text_color, hint_color) = if enabled {
            (theme::TEXT, theme::TEXT_MUTED)
        } else {
            (theme::TEXT_DISABLED, Color32::from_gray(200))
        };

        ui.painter().text(
            Pos2::new(rect.left() + 12.0, rect.center().y),
            Align2::LEFT_CENTER,
            label,
            FontId::proportional(13.0),
            text_color,
        );

        if !accelerator.is_empty() {
            ui.painter().text(
                Pos2::new(rect.right() - 12.0, rect.center().y),
                Align2::RIGHT_CENTER,
                accelerator,
                FontId::proportional(12.0),
                hint_color,
            );
        }
    }

    let clicked = response.clicked();
    if enabled {
        response.on_hover_cursor(CursorIcon::PointingHand);
    }
    enabled && clicked
}

/// Draw a menu separator line.
pub fn menu_separator(ui: &mut Ui) {
    ui.add_space(3.0);
    let rect = ui.available_rect_before_wrap();
    let y = rect.top();
    ui.painter().line_segment(
        [Pos2::new(rect.left() + 8.0, y), Pos2::new(rect.right() - 8.0, y)],
        Stroke::new(1.0, Color32::from_gray(230)),
    );
    ui.add_space(3.0);
}

/// Frame for dropdown menus.
pub fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(4))
}
