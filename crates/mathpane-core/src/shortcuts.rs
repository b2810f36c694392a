//! Shortcut table and keymap.
//!
//! Each shortcut inserts a fixed snippet of markup at the caret. Shortcuts are
//! keyed by their accelerator, so a menu click and a key press resolve through
//! the same lookup.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Keyboard modifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { ctrl: false, shift: false, alt: false };
    pub const CTRL: Self = Self { ctrl: true, shift: false, alt: false };
    pub const CTRL_SHIFT: Self = Self { ctrl: true, shift: true, alt: false };
}

/// A key combination. The key is stored lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Accelerator {
    pub modifiers: Modifiers,
    pub key: char,
}

impl Accelerator {
    pub fn new(modifiers: Modifiers, key: char) -> Self {
        Self {
            modifiers,
            key: key.to_ascii_lowercase(),
        }
    }

    /// Format for display (e.g., "Ctrl+Shift+G").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.modifiers.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.shift {
            parts.push("Shift".to_string());
        }
        if self.modifiers.alt {
            parts.push("Alt".to_string());
        }
        parts.push(self.key.to_ascii_uppercase().to_string());
        parts.join("+")
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// A snippet of markup bound to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutEntry {
    text: String,
    trigger: char,
    label: String,
    modifiers: Modifiers,
}

impl ShortcutEntry {
    /// Insert `text` on Ctrl+`trigger`, labelled with the text itself.
    pub fn new(text: impl Into<String>, trigger: char) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            text,
            trigger,
            modifiers: Modifiers::CTRL,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The markup inserted at the caret.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn trigger(&self) -> char {
        self.trigger
    }

    /// Menu label.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn accelerator(&self) -> Accelerator {
        Accelerator::new(self.modifiers, self.trigger)
    }

    /// Status-bar style description.
    pub fn help(&self) -> String {
        format!("Insert {}", self.text)
    }
}

/// Shortcut errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("Accelerator {0} is bound more than once")]
    DuplicateAccelerator(Accelerator),
}

const SECOND_ORDER_TF: &str = r"G(s) = \frac{\omega_n^2}{s^2 + 2 \zeta \omega_n s + \omega_n^2}";
const SECOND_ORDER: &str = r"\frac{\omega_n^2}{s^2+2\zeta \omega_n s + \omega_n^2}";

/// The fixed list of insertion shortcuts, in menu order.
pub fn builtin_entries() -> Vec<ShortcutEntry> {
    vec![
        ShortcutEntry::new(r"\omega_n", 'w')
            .with_label("omega_n")
            .with_modifiers(Modifiers::CTRL_SHIFT),
        ShortcutEntry::new(r"\zeta", 'z')
            .with_label("zeta")
            .with_modifiers(Modifiers::CTRL_SHIFT),
        ShortcutEntry::new(r"\frac{}{}", 'f')
            .with_label("fraction")
            .with_modifiers(Modifiers::CTRL_SHIFT),
        ShortcutEntry::new(SECOND_ORDER_TF, '2')
            .with_label("second_order TF")
            .with_modifiers(Modifiers::CTRL_SHIFT),
        ShortcutEntry::new("G(s)", 'g'),
        ShortcutEntry::new("G(s) = ", 'g').with_modifiers(Modifiers::CTRL_SHIFT),
        ShortcutEntry::new(r"\frac{p}{s+p}", '1').with_label("first order TF"),
        ShortcutEntry::new(r"\frac{1}{s}", 's').with_label("step input (1/s)"),
        ShortcutEntry::new(r"\left(", '9'),
        ShortcutEntry::new(r"\right)", '0'),
        ShortcutEntry::new(r"\left[", '['),
        ShortcutEntry::new(r"\right]", ']'),
        ShortcutEntry::new(SECOND_ORDER, '2').with_label("second order (no G)"),
    ]
}

/// Immutable list of shortcuts with lookup by accelerator.
#[derive(Debug, Clone)]
pub struct ShortcutTable {
    entries: Vec<ShortcutEntry>,
    index: HashMap<Accelerator, usize>,
}

impl ShortcutTable {
    pub fn new(entries: Vec<ShortcutEntry>) -> Result<Self, ShortcutError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let accel = entry.accelerator();
            if index.insert(accel, i).is_some() {
                return Err(ShortcutError::DuplicateAccelerator(accel));
            }
        }
        Ok(Self { entries, index })
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        Self::new(builtin_entries()).expect("built-in shortcuts have unique accelerators")
    }

    pub fn lookup(&self, accel: &Accelerator) -> Option<&ShortcutEntry> {
        self.index.get(accel).map(|&i| &self.entries[i])
    }

    pub fn get(&self, index: usize) -> Option<&ShortcutEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShortcutEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ShortcutTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Something a key press or menu click asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Copy the whole equation source to the clipboard.
    CopyEquation,
    SaveEquation,
    /// Insert the shortcut at this table index.
    Insert(usize),
}

/// Every accelerator the application answers to.
#[derive(Debug, Clone)]
pub struct Keymap {
    shortcuts: ShortcutTable,
    bindings: HashMap<Accelerator, Command>,
}

impl Keymap {
    pub const QUIT: Accelerator = Accelerator { modifiers: Modifiers::CTRL, key: 'q' };
    pub const COPY: Accelerator = Accelerator { modifiers: Modifiers::CTRL_SHIFT, key: 'c' };
    pub const SAVE: Accelerator = Accelerator { modifiers: Modifiers::CTRL, key: 'e' };

    /// Bind the application commands and every shortcut in `shortcuts`.
    pub fn new(shortcuts: ShortcutTable) -> Result<Self, ShortcutError> {
        let mut bindings = HashMap::new();
        let commands = [
            (Self::QUIT, Command::Quit),
            (Self::COPY, Command::CopyEquation),
            (Self::SAVE, Command::SaveEquation),
        ];
        let inserts = shortcuts
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.accelerator(), Command::Insert(i)));

        for (accel, command) in commands.into_iter().chain(inserts) {
            if bindings.insert(accel, command).is_some() {
                return Err(ShortcutError::DuplicateAccelerator(accel));
            }
        }
        Ok(Self { shortcuts, bindings })
    }

    pub fn resolve(&self, accel: &Accelerator) -> Option<Command> {
        self.bindings.get(accel).copied()
    }

    /// Accelerator bound to `command`, for menu hints.
    pub fn accelerator_for(&self, command: Command) -> Option<Accelerator> {
        match command {
            Command::Quit => Some(Self::QUIT),
            Command::CopyEquation => Some(Self::COPY),
            Command::SaveEquation => Some(Self::SAVE),
            Command::Insert(i) => self.shortcuts.get(i).map(ShortcutEntry::accelerator),
        }
    }

    /// The text a command inserts, if it inserts any.
    pub fn insertion(&self, command: Command) -> Option<&str> {
        match command {
            Command::Insert(i) => self.shortcuts.get(i).map(ShortcutEntry::text),
            _ => None,
        }
    }

    /// All accelerators, in no particular order.
    pub fn accelerators(&self) -> impl Iterator<Item = &Accelerator> {
        self.bindings.keys()
    }

    pub fn shortcuts(&self) -> &ShortcutTable {
        &self.shortcuts
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new(ShortcutTable::builtin()).expect("built-in keymap has unique accelerators")
    }
}
