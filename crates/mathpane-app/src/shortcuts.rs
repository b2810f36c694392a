//! Keyboard accelerators: egui key events to keymap commands.

use egui::{Event, Key};
use mathpane_core::{Accelerator, Command, Keymap, Modifiers};

/// The accelerator character for an egui key, if it has one.
pub fn key_char(key: Key) -> Option<char> {
    let mut chars = key.symbol_or_name().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

/// `command` is Ctrl everywhere but macOS, where it is Cmd.
fn to_modifiers(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.command,
        shift: modifiers.shift,
        alt: modifiers.alt,
    }
}

/// Resolve a key press. The logical key is tried first, then the physical
/// one, so Ctrl+Shift+2 still matches on layouts where Shift+2 types a
/// symbol egui has no key for.
pub fn resolve_key(keymap: &Keymap, key: Key, physical_key: Option<Key>, modifiers: egui::Modifiers) -> Option<Command> {
    let modifiers = to_modifiers(modifiers);
    std::iter::once(key)
        .chain(physical_key)
        .filter_map(key_char)
        .find_map(|c| keymap.resolve(&Accelerator::new(modifiers, c)))
}

/// Remove every key press bound in `keymap` from this frame's input and
/// return the commands, in order.
///
/// Must run before any widget reads the input, so bound keys never reach
/// the text field.
pub fn take_commands(ctx: &egui::Context, keymap: &Keymap) -> Vec<Command> {
    ctx.input_mut(|input| {
        let mut commands = Vec::new();
        input.events.retain(|event| {
            let Event::Key {
                key,
                physical_key,
                pressed: true,
                modifiers,
                ..
            } = event
            else {
                return true;
            };
            match resolve_key(keymap, *key, *physical_key, *modifiers) {
                Some(command) => {
                    commands.push(command);
                    false
                }
                None => true,
            }
        });

        // egui-winit also turns Ctrl+Shift+C into a copy of the selection.
        if commands.contains(&Command::CopyEquation) {
            input.events.retain(|event| !matches!(event, Event::Copy));
        }
        commands
    })
}

/// Accelerator and description for every command, for the log and menus.
pub fn describe(keymap: &Keymap) -> Vec<(Accelerator, String)> {
    let mut lines = vec![
        (Keymap::QUIT, "Quit".to_string()),
        (Keymap::COPY, "Copy equation".to_string()),
        (Keymap::SAVE, "Save equation to file".to_string()),
    ];
    lines.extend(keymap.shortcuts().iter().map(|entry| (entry.accelerator(), entry.help())));
    lines
}

/// Log all shortcuts at debug level.
pub fn log_all(keymap: &Keymap) {
    log::debug!("=== Keyboard Shortcuts ===");
    for (accel, description) in describe(keymap) {
        log::debug!("  {:20} {}", accel.format(), description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl() -> egui::Modifiers {
        egui::Modifiers::COMMAND
    }

    fn ctrl_shift() -> egui::Modifiers {
        egui::Modifiers::COMMAND | egui::Modifiers::SHIFT
    }

    #[test]
    fn test_key_char() {
        assert_eq!(key_char(Key::G), Some('g'));
        assert_eq!(key_char(Key::Num9), Some('9'));
        assert_eq!(key_char(Key::OpenBracket), Some('['));
        assert_eq!(key_char(Key::Escape), None);
    }

    #[test]
    fn test_modifiers_match_exactly() {
        let keymap = Keymap::default();
        let plain = resolve_key(&keymap, Key::G, None, ctrl()).unwrap();
        let shifted = resolve_key(&keymap, Key::G, None, ctrl_shift()).unwrap();
        assert_eq!(keymap.insertion(plain), Some("G(s)"));
        assert_eq!(keymap.insertion(shifted), Some("G(s) = "));
        assert_eq!(resolve_key(&keymap, Key::G, None, egui::Modifiers::NONE), None);
    }

    #[test]
    fn test_application_commands() {
        let keymap = Keymap::default();
        assert_eq!(resolve_key(&keymap, Key::Q, None, ctrl()), Some(Command::Quit));
        assert_eq!(resolve_key(&keymap, Key::C, None, ctrl_shift()), Some(Command::CopyEquation));
        assert_eq!(resolve_key(&keymap, Key::E, None, ctrl()), Some(Command::SaveEquation));
    }

    #[test]
    fn test_physical_key_fallback() {
        let keymap = Keymap::default();
        // A logical key with no binding falls back to the physical key.
        let command = resolve_key(&keymap, Key::Questionmark, Some(Key::Num2), ctrl_shift()).unwrap();
        assert!(keymap.insertion(command).unwrap().starts_with(r"G(s) = \frac"));
    }

    #[test]
    fn test_take_commands_consumes_bound_keys() {
        let keymap = Keymap::default();
        let ctx = egui::Context::default();
        let key = |key, modifiers| Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        };
        let mut input = egui::RawInput::default();
        input.events = vec![
            key(Key::Z, ctrl_shift()),
            Event::Text("a".to_string()),
            key(Key::C, ctrl_shift()),
            Event::Copy,
        ];

        let mut commands = Vec::new();
        let mut remaining = Vec::new();
        let _ = ctx.run(input, |ctx| {
            commands = take_commands(ctx, &keymap);
            remaining = ctx.input(|i| i.events.clone());
        });

        assert_eq!(commands.len(), 2);
        assert_eq!(keymap.insertion(commands[0]), Some(r"\zeta"));
        assert_eq!(commands[1], Command::CopyEquation);
        assert_eq!(remaining, vec![Event::Text("a".to_string())]);
    }

    #[test]
    fn test_describe_lists_everything() {
        let keymap = Keymap::default();
        let lines = describe(&keymap);
        assert_eq!(lines.len(), 3 + keymap.shortcuts().len());
        assert!(lines.iter().any(|(accel, _)| accel.format() == "Ctrl+Shift+W"));
    }
}
