//! Styled egui widgets for MathPane.
//!
//! - **Menu**: menu bar titles, menu items with accelerator hints, separators, panel frames
//! - **Buttons**: bordered action buttons for the bottom row
//! - **Figure**: the equation preview panel
//! - **Layout**: field labels

pub mod buttons;
pub mod figure;
pub mod layout;
pub mod menu;

pub use buttons::ActionButton;
pub use figure::{FigureResponse, FigureView};
pub use layout::{field_label, section_label};
pub use menu::{menu_item, menu_item_enabled, menu_separator, menu_title, panel_frame};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Height of a menu bar title and a menu item
    pub const MENU_ROW: f32 = 24.0;
    /// Minimum width of a dropdown menu
    pub const MENU_WIDTH: f32 = 220.0;
    /// Smallest figure panel, in points
    pub const FIGURE_MIN_WIDTH: f32 = 64.0;
    pub const FIGURE_MIN_HEIGHT: f32 = 32.0;
    /// Height of a bottom-row action button
    pub const BUTTON_HEIGHT: f32 = 28.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 6;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Disabled text color
    pub const TEXT_DISABLED: Color32 = Color32::from_gray(180);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Background of an open menu title
    pub const SELECTED_BG: Color32 = Color32::from_rgb(235, 245, 255);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
    /// Figure background
    pub const FIGURE_BG: Color32 = Color32::WHITE;
}
