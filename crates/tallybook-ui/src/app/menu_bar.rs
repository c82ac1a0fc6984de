//! Menu bar rendering for the ledger application.
//!
//! Contains the File, Edit, View, and Settings menus.

use eframe::egui;

use super::{App, ThemeMode};

impl App {
    /// Renders the menu bar.
    pub(crate) fn show_menu_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::MenuBar::new().ui(ui, |ui| {
            // File menu
            ui.menu_button("File", |ui| {
                if ui.button("New                  Ctrl+N").clicked() {
                    self.request_new_file();
                    ui.close();
                }
                if ui.button("Open...              Ctrl+O").clicked() {
                    self.request_open_file();
                    ui.close();
                }
                ui.separator();
                if ui.button("Save                 Ctrl+S").clicked() {
                    self.save_active();
                    ui.close();
                }
                if ui.button("Save As...     Ctrl+Shift+S").clicked() {
                    self.save_as_dialog();
                    ui.close();
                }
                ui.separator();
                if ui.button("Import CSV...").clicked() {
                    self.import_csv_dialog();
                    ui.close();
                }
                if ui.button("Export CSV...").clicked() {
                    self.export_csv_dialog();
                    ui.close();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close();
                }
            });

            // Edit menu
            ui.menu_button("Edit", |ui| {
                let can_undo = self.doc.history.can_undo();
                let can_redo = self.doc.history.can_redo();

                if ui
                    .add_enabled(can_undo, egui::Button::new("Undo            Ctrl+Z"))
                    .clicked()
                {
                    self.undo();
                    ui.close();
                }
                if ui
                    .add_enabled(can_redo, egui::Button::new("Redo            Ctrl+Y"))
                    .clicked()
                {
                    self.redo();
                    ui.close();
                }
            });

            // View menu
            ui.menu_button("View", |ui| {
                if ui.button("Previous Month   Ctrl+PgUp").clicked() {
                    self.go_prev_month();
                    ui.close();
                }
                if ui.button("Next Month       Ctrl+PgDn").clicked() {
                    self.go_next_month();
                    ui.close();
                }
                if ui.button("Today").clicked() {
                    self.go_today();
                    ui.close();
                }
                ui.separator();
                if ui.button("Zoom In          Ctrl++").clicked() {
                    self.zoom_level = (self.zoom_level + 0.1).min(self.max_zoom_level);
                    ui.close();
                }
                if ui.button("Zoom Out         Ctrl+-").clicked() {
                    self.zoom_level = (self.zoom_level - 0.1).max(0.5);
                    ui.close();
                }
                if ui.button("Reset Zoom       Ctrl+0").clicked() {
                    self.zoom_level = 1.0;
                    ui.close();
                }
                ui.separator();
                if ui
                    .checkbox(&mut self.show_full_path_in_title, "Show Full Path in Title")
                    .clicked()
                {
                    ui.close();
                }
                if ui
                    .checkbox(&mut self.restore_last_file, "Reopen Last File on Startup")
                    .clicked()
                {
                    ui.close();
                }
                ui.separator();
                ui.menu_button("Theme", |ui| {
                    let ctx_clone = ctx.clone();
                    for (mode, label) in [
                        (ThemeMode::system(), "System"),
                        (ThemeMode::dark(), "Dark"),
                        (ThemeMode::light(), "Light"),
                    ] {
                        if ui.radio(self.theme_mode == mode, label).clicked() {
                            self.set_theme_mode(mode, &ctx_clone);
                            ui.close();
                        }
                    }
                });
            });

            // Settings menu
            ui.menu_button("Settings", |ui| {
                if ui.button("Categories && Cards...").clicked() {
                    self.settings_open = true;
                    ui.close();
                }
            });
        });
    }
}
