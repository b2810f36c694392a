//! The equation preview panel.

use egui::{pos2, Color32, CornerRadius, Rect, Sense, Stroke, StrokeKind, TextureHandle, Ui, Vec2};

use crate::{sizing, theme};

/// Shows the figure raster at one texel per physical pixel and reports
/// how many physical pixels the panel covers.
pub struct FigureView<'a> {
    texture: Option<&'a TextureHandle>,
}

/// Result of showing a [`FigureView`].
pub struct FigureResponse {
    /// Panel size in physical pixels.
    pub size_px: [u32; 2],
}

impl<'a> FigureView<'a> {
    pub fn new(texture: Option<&'a TextureHandle>) -> Self {
        Self { texture }
    }

    /// Fill the remaining space of `ui` with the figure.
    pub fn show(self, ui: &mut Ui) -> FigureResponse {
        let size = ui.available_size().max(Vec2::new(sizing::FIGURE_MIN_WIDTH, sizing::FIGURE_MIN_HEIGHT));
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let pixels_per_point = ui.ctx().pixels_per_point();

        if ui.is_rect_visible(rect) {
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, CornerRadius::ZERO, theme::FIGURE_BG);
            if let Some(texture) = self.texture {
                let image_rect = Rect::from_min_size(rect.min, texture.size_vec2() / pixels_per_point);
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                painter.image(texture.id(), image_rect, uv, Color32::WHITE);
            }
            painter.rect_stroke(rect, CornerRadius::ZERO, Stroke::new(1.0, theme::BORDER), StrokeKind::Inside);
        }

        let physical = rect.size() * pixels_per_point;
        FigureResponse {
            size_px: [physical.x.round() as u32, physical.y.round() as u32],
        }
    }
}
