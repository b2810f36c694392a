//! MathPane Application
//!
//! The application shell: window, GPU surface, egui UI, keyboard
//! accelerators and clipboard around the equation render surface.

mod app;
pub mod diagnostics;
mod platform;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError};
pub use platform::SystemClipboard;
pub use shortcuts::{describe as describe_shortcuts, resolve_key, take_commands};
pub use ui::{render_ui, MenuKind, UiAction, UiState, UiView};
