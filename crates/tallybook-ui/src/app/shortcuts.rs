//! Global keyboard shortcut handling.
//!
//! Processes key events and maps them to application actions such as
//! file operations, undo/redo, zoom, and month navigation.

use eframe::egui;

use super::{App, DialogState};

impl App {
    /// Returns true if any dialog is currently open and capturing input.
    pub(crate) fn is_dialog_open(&self) -> bool {
        self.settings_open || matches!(self.dialog_state, DialogState::ConfirmDiscard(_))
    }

    /// Handles global keyboard shortcuts.
    pub(crate) fn handle_global_shortcuts(&mut self, ctx: &egui::Context) {
        let (ctrl, shift, keys) = ctx.input(|i| {
            let ctrl = i.modifiers.ctrl || i.modifiers.command;
            let shift = i.modifiers.shift;
            let keys: Vec<egui::Key> = i
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => Some(*key),
                    _ => None,
                })
                .collect();
            (ctrl, shift, keys)
        });

        let dialog_open = self.is_dialog_open();

        for key in &keys {
            if self.handle_file_shortcut(*key, ctrl, shift) {
                continue;
            }
            if self.handle_zoom_shortcut(*key, ctrl) {
                continue;
            }
            if self.handle_escape_shortcut(*key) {
                continue;
            }

            // Document shortcuts are suppressed when a dialog is open.
            if dialog_open {
                continue;
            }
            if self.handle_edit_shortcut(*key, ctrl) {
                continue;
            }
            self.handle_month_shortcut(*key, ctrl);
        }
    }

    /// File operation shortcuts (Ctrl+N, Ctrl+O, Ctrl+S, Ctrl+Shift+S).
    /// Returns `true` if the key was consumed.
    fn handle_file_shortcut(&mut self, key: egui::Key, ctrl: bool, shift: bool) -> bool {
        if !ctrl {
            return false;
        }
        match key {
            egui::Key::N => self.request_new_file(),
            egui::Key::O => self.request_open_file(),
            egui::Key::S if shift => self.save_as_dialog(),
            egui::Key::S => self.save_active(),
            _ => return false,
        }
        true
    }

    /// Zoom shortcuts (Ctrl+Plus, Ctrl+Minus, Ctrl+0).
    /// Returns `true` if the key was consumed.
    fn handle_zoom_shortcut(&mut self, key: egui::Key, ctrl: bool) -> bool {
        if !ctrl {
            return false;
        }
        match key {
            egui::Key::Plus => {
                self.zoom_level = (self.zoom_level + 0.1).min(self.max_zoom_level);
            }
            egui::Key::Minus => {
                self.zoom_level = (self.zoom_level - 0.1).max(0.5);
            }
            egui::Key::Num0 => self.zoom_level = 1.0,
            _ => return false,
        }
        true
    }

    /// Escape key: closes dialogs and abandons the open cell edit.
    /// Returns `true` if the key was consumed.
    fn handle_escape_shortcut(&mut self, key: egui::Key) -> bool {
        if key != egui::Key::Escape {
            return false;
        }
        self.settings_open = false;
        self.cancel_cell_editor();
        true
    }

    /// Edit shortcuts (Ctrl+Z, Ctrl+Y).
    /// Returns `true` if the key was consumed.
    fn handle_edit_shortcut(&mut self, key: egui::Key, ctrl: bool) -> bool {
        if !ctrl {
            return false;
        }
        match key {
            egui::Key::Z => self.undo(),
            egui::Key::Y => self.redo(),
            _ => return false,
        }
        true
    }

    /// Month navigation shortcuts (Ctrl+PageUp, Ctrl+PageDown).
    fn handle_month_shortcut(&mut self, key: egui::Key, ctrl: bool) {
        if !ctrl {
            return;
        }
        match key {
            egui::Key::PageUp => self.go_prev_month(),
            egui::Key::PageDown => self.go_next_month(),
            _ => {}
        }
    }
}
