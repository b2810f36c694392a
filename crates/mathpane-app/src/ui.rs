//! UI components using egui.

use egui::text::{CCursor, CCursorRange};
use egui::text_edit::TextEditState;
use egui::{Context, Id, Rect, TextEdit, TextStyle, TextureHandle, Vec2};
use mathpane_core::{Command, Keymap, RenderState, TextField};
use mathpane_widgets::{
    field_label, menu_item, menu_item_enabled, menu_separator, menu_title, panel_frame, section_label, ActionButton,
    FigureView,
};

/// Id of the equation input, shared with the caret sync.
const INPUT_ID: &str = "equation_input";

/// Something the UI asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// The user edited the equation text.
    SourceEdited,
    Run(Command),
}

/// A dropdown in the menu bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    File,
    Edit,
    Insert,
}

impl MenuKind {
    const ALL: [MenuKind; 3] = [MenuKind::File, MenuKind::Edit, MenuKind::Insert];

    fn title(self) -> &'static str {
        match self {
            MenuKind::File => "File",
            MenuKind::Edit => "Edit",
            MenuKind::Insert => "345",
        }
    }
}

/// UI state.
pub struct UiState {
    /// The equation input.
    pub field: TextField,
    /// Which dropdown is open, if any.
    pub open_menu: Option<MenuKind>,
    /// Give the input keyboard focus on the next frame.
    pub focus_input: bool,
    /// Size of the figure panel in physical pixels, as of the last frame.
    pub figure_px: [u32; 2],
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            field: TextField::default(),
            open_menu: None,
            focus_input: true,
            figure_px: [0, 0],
        }
    }
}

/// Everything the UI shows but does not own.
pub struct UiView<'a> {
    pub keymap: &'a Keymap,
    pub figure: Option<&'a TextureHandle>,
    pub render_state: RenderState,
}

/// Render all UI and return any triggered action.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, view: &UiView<'_>) -> Option<UiAction> {
    let menu_action = render_menu_bar(ctx, ui_state, view);
    let button_action = render_bottom_panel(ctx, view);
    let editor_action = render_editor(ctx, ui_state, view);

    menu_action.or(button_action).or(editor_action)
}

fn hint(keymap: &Keymap, command: Command) -> String {
    keymap
        .accelerator_for(command)
        .map(|accel| accel.format())
        .unwrap_or_default()
}

/// Menu bar with File, Edit and the insert menu.
fn render_menu_bar(ctx: &Context, ui_state: &mut UiState, view: &UiView<'_>) -> Option<UiAction> {
    let mut action = None;
    let mut title_rects: Vec<(MenuKind, Rect)> = Vec::new();

    let bar = egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing = Vec2::new(2.0, 0.0);
            for kind in MenuKind::ALL {
                let open = ui_state.open_menu == Some(kind);
                let response = menu_title(ui, kind.title(), open);
                if response.clicked() {
                    ui_state.open_menu = if open { None } else { Some(kind) };
                } else if response.hovered() && ui_state.open_menu.is_some() && !open {
                    ui_state.open_menu = Some(kind);
                }
                title_rects.push((kind, response.rect));
            }
        });
    });

    let Some(kind) = ui_state.open_menu else {
        return None;
    };
    let anchor = title_rects
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or(bar.response.rect.left_bottom(), |(_, rect)| rect.left_bottom());

    let dropdown = egui::Area::new(Id::new("menu_dropdown"))
        .fixed_pos(anchor + Vec2::new(0.0, 2.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::new(0.0, 1.0);
                    action = match kind {
                        MenuKind::File => file_menu(ui, view),
                        MenuKind::Edit => edit_menu(ui, view),
                        MenuKind::Insert => insert_menu(ui, view),
                    };
                });
            });
        });

    if action.is_some() {
        ui_state.open_menu = None;
    } else if ctx.input(|i| i.pointer.any_click()) {
        // Close when clicking outside the bar and the dropdown.
        if let Some(pos) = ctx.input(|i| i.pointer.interact_pos()) {
            if !bar.response.rect.contains(pos) && !dropdown.response.rect.contains(pos) {
                ui_state.open_menu = None;
            }
        }
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        ui_state.open_menu = None;
    }

    action
}

fn file_menu(ui: &mut egui::Ui, view: &UiView<'_>) -> Option<UiAction> {
    let mut action = None;
    let can_save = view.render_state.can_export();
    let save = Command::SaveEquation;
    if menu_item_enabled(ui, "Save Equation to File", &hint(view.keymap, save), can_save) {
        action = Some(UiAction::Run(save));
    }
    menu_separator(ui);
    if menu_item(ui, "Quit", &hint(view.keymap, Command::Quit)) {
        action = Some(UiAction::Run(Command::Quit));
    }
    action
}

fn edit_menu(ui: &mut egui::Ui, view: &UiView<'_>) -> Option<UiAction> {
    let copy = Command::CopyEquation;
    menu_item(ui, "Copy", &hint(view.keymap, copy)).then_some(UiAction::Run(copy))
}

fn insert_menu(ui: &mut egui::Ui, view: &UiView<'_>) -> Option<UiAction> {
    let mut action = None;
    for (index, entry) in view.keymap.shortcuts().iter().enumerate() {
        let command = Command::Insert(index);
        if menu_item(ui, entry.label(), &entry.accelerator().format()) {
            action = Some(UiAction::Run(command));
        }
    }
    action
}

/// Save and Exit buttons, stacked and centred as in a dialog.
fn render_bottom_panel(ctx: &Context, view: &UiView<'_>) -> Option<UiAction> {
    let mut action = None;
    egui::TopBottomPanel::bottom("buttons")
        .show_separator_line(false)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                if view.render_state == RenderState::Error {
                    section_label(ui, "Cannot save: the equation did not parse");
                    ui.add_space(4.0);
                }
                let save_hint = hint(view.keymap, Command::SaveEquation);
                if ActionButton::new("Save Equation to File")
                    .min_width(180.0)
                    .hint(&save_hint)
                    .show(ui)
                {
                    action = Some(UiAction::Run(Command::SaveEquation));
                }
                ui.add_space(6.0);
                if ActionButton::new("Exit").min_width(180.0).show(ui) {
                    action = Some(UiAction::Run(Command::Quit));
                }
            });
            ui.add_space(6.0);
        });
    action
}

/// Input label, input field and the figure filling the rest.
fn render_editor(ctx: &Context, ui_state: &mut UiState, view: &UiView<'_>) -> Option<UiAction> {
    let mut action = None;
    egui::CentralPanel::default().show(ctx, |ui| {
        field_label(ui, "Type some TeX here :");

        let output = TextEdit::singleline(ui_state.field.text_mut())
            .id(Id::new(INPUT_ID))
            .font(TextStyle::Monospace)
            .desired_width(f32::INFINITY)
            .show(ui);

        if ui_state.focus_input {
            output.response.request_focus();
            ui_state.focus_input = false;
        }
        if let Some(range) = output.cursor_range {
            let (caret, anchor) = (range.primary.index, range.secondary.index);
            if caret == anchor {
                ui_state.field.set_caret(caret);
            } else {
                ui_state.field.select(anchor, caret);
            }
        }
        if output.response.changed() {
            action = Some(UiAction::SourceEdited);
        }

        ui.add_space(4.0);
        let figure = FigureView::new(view.figure).show(ui);
        ui_state.figure_px = figure.size_px;
    });
    action
}

/// Push the field's caret into the text edit, after the app changed the
/// text behind its back.
pub fn store_caret(ctx: &Context, field: &TextField) {
    let id = Id::new(INPUT_ID);
    let mut state = TextEditState::load(ctx, id).unwrap_or_default();
    state
        .cursor
        .set_char_range(Some(CCursorRange::one(CCursor::new(field.caret()))));
    state.store(ctx, id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frame(ctx: &Context, ui_state: &mut UiState, keymap: &Keymap) -> Option<UiAction> {
        let input = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(egui::Pos2::ZERO, Vec2::new(800.0, 275.0))),
            ..Default::default()
        };
        let mut action = None;
        let _ = ctx.run(input, |ctx| {
            let view = UiView {
                keymap,
                figure: None,
                render_state: RenderState::Empty,
            };
            action = render_ui(ctx, ui_state, &view);
        });
        action
    }

    #[test]
    fn test_idle_frame_has_no_action() {
        let ctx = Context::default();
        let keymap = Keymap::default();
        let mut ui_state = UiState::default();
        assert_eq!(run_frame(&ctx, &mut ui_state, &keymap), None);
        assert!(!ui_state.focus_input);
        assert!(ui_state.figure_px[0] > 0 && ui_state.figure_px[1] > 0);
    }

    #[test]
    fn test_store_caret_survives_frame() {
        let ctx = Context::default();
        let keymap = Keymap::default();
        let mut ui_state = UiState::default();
        ui_state.field.set_text("x + y");
        ui_state.field.set_caret(2);
        store_caret(&ctx, &ui_state.field);

        let state = TextEditState::load(&ctx, Id::new(INPUT_ID)).unwrap();
        let range = state.cursor.char_range().unwrap();
        assert_eq!(range.primary.index, 2);

        run_frame(&ctx, &mut ui_state, &keymap);
        assert_eq!(ui_state.field.text(), "x + y");
    }

    #[test]
    fn test_menu_titles() {
        let titles: Vec<_> = MenuKind::ALL.iter().map(|kind| kind.title()).collect();
        assert_eq!(titles, ["File", "Edit", "345"]);
    }
}
