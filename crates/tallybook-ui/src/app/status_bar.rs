//! Status bar rendering: month totals, entry count, file path, zoom.

use eframe::egui;
use egui::{Color32, RichText};

use tallybook_core::amount::format_amount;
use tallybook_core::month;

use super::App;

impl App {
    /// Renders the status bar at the bottom of the application window.
    pub(crate) fn show_status_bar(&mut self, ui: &mut egui::Ui) {
        let totals = self.doc.month_totals(self.current_month);

        ui.horizontal(|ui| {
            ui.label(month::month_label(self.current_month));
            ui.separator();
            ui.label(format!(
                "In {}",
                format_amount(totals.income)
            ));
            ui.label(
                RichText::new(format!("Out {}", format_amount(totals.expense)))
                    .color(Color32::from_rgb(220, 120, 120)),
            );
            let balance = totals.balance();
            let balance_color = if balance < 0 {
                Color32::from_rgb(220, 120, 120)
            } else {
                Color32::from_rgb(120, 200, 120)
            };
            ui.label(
                RichText::new(format!("Balance {}", format_amount(balance)))
                    .color(balance_color),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{:.0}%", self.zoom_level * 100.0));
                ui.separator();
                ui.label(format!("{} entries", self.doc.book.entry_count()));
                ui.separator();
                let path_label = match &self.doc.file_path {
                    Some(path) => path.to_string_lossy().into_owned(),
                    None => "unsaved".to_string(),
                };
                let marker = if self.doc.modified { " *" } else { "" };
                ui.label(RichText::new(format!("{path_label}{marker}")).weak());
            });
        });
    }
}
