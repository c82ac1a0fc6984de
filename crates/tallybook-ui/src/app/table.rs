//! The central ledger table: one month page of entries, edited in place.
//!
//! Text cells (day, item, amount) go through a single [`CellEditor`]
//! buffer that commits on Enter or focus loss; choice cells (kind,
//! card, income flag) apply immediately. Every change funnels through
//! the editing layer so it lands in the undo history.

use eframe::egui;

use tallybook_core::entry::{FieldValue, LedgerEntry};
use tallybook_core::{amount, editing, month};

use super::App;

/// Which editable column of the table a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Column {
    Day,
    Item,
    Amount,
}

/// An in-progress text edit of one cell.
#[derive(Debug, Clone)]
pub(crate) struct CellEditor {
    pub month: u32,
    pub row: usize,
    pub column: Column,
    pub buffer: String,
}

/// A structural change requested from inside the row loop, applied
/// after rendering to keep the borrow checker happy.
enum RowAction {
    Delete(usize),
    SetField(usize, FieldValue),
}

impl App {
    /// Renders the month header and the entry grid for `current_month`.
    pub(crate) fn show_ledger_table(&mut self, ui: &mut egui::Ui) {
        self.show_month_header(ui);
        ui.separator();

        let month = self.current_month;
        if !self.doc.book.pages.contains_key(&month) {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.label(format!("No page for {} yet.", month::month_label(month)));
                if ui.button("Create page").clicked() {
                    editing::insert_page(&mut self.doc.book, &mut self.doc.history, month);
                    self.doc.modified = true;
                }
            });
            return;
        }

        let mut action: Option<RowAction> = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new(("ledger", month))
                    .num_columns(7)
                    .striped(true)
                    .min_col_width(60.0)
                    .show(ui, |ui| {
                        ui.strong("Day");
                        ui.strong("Item");
                        ui.strong("Kind");
                        ui.strong("Income");
                        ui.strong("Amount");
                        ui.strong("Card");
                        ui.label("");
                        ui.end_row();

                        let row_count = self.doc.book.pages[&month].len();
                        for row in 0..row_count {
                            self.show_row(ui, month, row, &mut action);
                            ui.end_row();
                        }
                    });

                ui.add_space(6.0);
                if ui.button("＋ Add row").clicked() {
                    let at = self.doc.book.pages[&month].len();
                    editing::insert_row(
                        &mut self.doc.book,
                        &mut self.doc.history,
                        month,
                        at,
                        LedgerEntry::default(),
                    );
                    self.doc.modified = true;
                }
            });

        match action {
            Some(RowAction::Delete(row)) => {
                editing::delete_row(&mut self.doc.book, &mut self.doc.history, month, row);
                self.doc.modified = true;
                self.cell_editor = None;
            }
            Some(RowAction::SetField(row, value)) => {
                editing::set_field(&mut self.doc.book, &mut self.doc.history, month, row, value);
                self.doc.modified = true;
            }
            None => {}
        }
    }

    fn show_month_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("◀").clicked() {
                self.go_prev_month();
            }
            ui.strong(month::month_label(self.current_month));
            if ui.button("▶").clicked() {
                self.go_next_month();
            }
            if ui.button("Today").clicked() {
                self.go_today();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let page_exists = self.doc.book.pages.contains_key(&self.current_month);
                let removable = page_exists
                    && self.doc.book.pages[&self.current_month].is_empty()
                    && self.doc.book.pages.len() > 1;
                if ui
                    .add_enabled(removable, egui::Button::new("Remove empty page"))
                    .clicked()
                {
                    editing::delete_page(
                        &mut self.doc.book,
                        &mut self.doc.history,
                        self.current_month,
                    );
                    self.doc.modified = true;
                    self.ensure_current_month();
                }
            });
        });
    }

    fn show_row(
        &mut self,
        ui: &mut egui::Ui,
        month: u32,
        row: usize,
        action: &mut Option<RowAction>,
    ) {
        let entry = self.doc.book.pages[&month][row].clone();

        self.show_text_cell(
            ui,
            month,
            row,
            Column::Day,
            entry.day.map(|d| d.to_string()).unwrap_or_default(),
            40.0,
        );
        self.show_text_cell(ui, month, row, Column::Item, entry.item.clone(), 160.0);

        // Kind: a combo over the matching category list.
        let kinds = if entry.is_income {
            self.doc.book.settings.income_kinds.clone()
        } else {
            self.doc.book.settings.payment_kinds.clone()
        };
        egui::ComboBox::from_id_salt(("kind", month, row))
            .selected_text(&entry.kind)
            .show_ui(ui, |ui| {
                for kind in &kinds {
                    if ui.selectable_label(entry.kind == *kind, kind).clicked() {
                        *action = Some(RowAction::SetField(row, FieldValue::Kind(kind.clone())));
                    }
                }
            });

        let mut is_income = entry.is_income;
        if ui.checkbox(&mut is_income, "").changed() {
            *action = Some(RowAction::SetField(row, FieldValue::IsIncome(is_income)));
        }

        self.show_text_cell(
            ui,
            month,
            row,
            Column::Amount,
            entry.amount.map(amount::format_amount).unwrap_or_default(),
            90.0,
        );

        // Card: a combo over configured cards, with a "none" entry.
        let cards: Vec<String> = self
            .doc
            .book
            .settings
            .cards
            .iter()
            .map(|c| c.name.clone())
            .collect();
        egui::ComboBox::from_id_salt(("card", month, row))
            .selected_text(if entry.card.is_empty() {
                "—"
            } else {
                entry.card.as_str()
            })
            .show_ui(ui, |ui| {
                if ui.selectable_label(entry.card.is_empty(), "—").clicked() {
                    *action = Some(RowAction::SetField(row, FieldValue::Card(String::new())));
                }
                for card in &cards {
                    if ui.selectable_label(entry.card == *card, card).clicked() {
                        *action = Some(RowAction::SetField(row, FieldValue::Card(card.clone())));
                    }
                }
            });

        if ui.button("🗑").clicked() {
            *action = Some(RowAction::Delete(row));
        }
    }

    /// A cell that shows its value as a clickable label and swaps in a
    /// text edit while it owns the cell editor.
    fn show_text_cell(
        &mut self,
        ui: &mut egui::Ui,
        month: u32,
        row: usize,
        column: Column,
        display: String,
        width: f32,
    ) {
        let editing_here = self
            .cell_editor
            .as_ref()
            .is_some_and(|e| e.month == month && e.row == row && e.column == column);

        if editing_here {
            let editor = self.cell_editor.as_mut().unwrap();
            let response = ui.add(
                egui::TextEdit::singleline(&mut editor.buffer).desired_width(width),
            );
            if response.lost_focus() {
                self.commit_cell_editor();
            }
        } else {
            let label = if display.is_empty() {
                "…".to_string()
            } else {
                display.clone()
            };
            if ui
                .add(egui::Button::new(label).min_size(egui::Vec2::new(width, 0.0)))
                .clicked()
            {
                // Starting a new edit commits whichever cell was open.
                self.commit_cell_editor();
                self.cell_editor = Some(CellEditor {
                    month,
                    row,
                    column,
                    buffer: display,
                });
            }
        }
    }

    /// Parses the open cell editor's buffer and applies it through the
    /// editing layer. A buffer that fails to parse clears the field.
    pub(crate) fn commit_cell_editor(&mut self) {
        let Some(editor) = self.cell_editor.take() else {
            return;
        };
        let value = match editor.column {
            Column::Day => {
                let day = editor.buffer.trim().parse::<u32>().ok();
                FieldValue::Day(day.filter(|d| (1..=31).contains(d)))
            }
            Column::Item => FieldValue::Item(editor.buffer.trim().to_string()),
            Column::Amount => FieldValue::Amount(amount::parse_amount(&editor.buffer)),
        };
        editing::set_field(
            &mut self.doc.book,
            &mut self.doc.history,
            editor.month,
            editor.row,
            value,
        );
        self.doc.modified = true;
    }

    /// Discards the open cell editor without applying it.
    pub(crate) fn cancel_cell_editor(&mut self) {
        self.cell_editor = None;
    }

    pub(crate) fn go_prev_month(&mut self) {
        self.commit_cell_editor();
        self.current_month = month::prev_month(self.current_month);
    }

    pub(crate) fn go_next_month(&mut self) {
        self.commit_cell_editor();
        self.current_month = month::next_month(self.current_month);
    }

    pub(crate) fn go_today(&mut self) {
        self.commit_cell_editor();
        self.current_month = month::current_month();
    }
}
