//! In-app dialog for editing workbook settings: the income and payment
//! category lists, and the card list.
//!
//! All mutations go through `settings_ops`, so they share the undo
//! history with data edits. Categories and cards still referenced by
//! ledger entries can't be deleted.

use eframe::egui;

use tallybook_core::settings_ops::{self, KindList};
use tallybook_core::CardEntry;

use super::App;

/// Which section of the settings dialog is currently visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SettingsTab {
    #[default]
    Payment,
    Income,
    Cards,
}

/// A mutation requested from inside the list-rendering loop, applied
/// afterwards.
enum KindAction {
    Insert(usize, String),
    Delete(usize),
    Rename(usize, String),
    Move(usize, usize),
}

enum CardAction {
    Insert(CardEntry),
    Delete(usize),
    Change(usize, String, u32),
    Move(usize, usize),
}

impl App {
    /// Renders the settings dialog window.
    pub(crate) fn show_settings_dialog(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }

        let mut open = true;
        egui::Window::new("Categories & Cards")
            .collapsible(false)
            .resizable(true)
            .default_width(420.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.settings_tab, SettingsTab::Payment, "Payment");
                    ui.selectable_value(&mut self.settings_tab, SettingsTab::Income, "Income");
                    ui.selectable_value(&mut self.settings_tab, SettingsTab::Cards, "Cards");
                });

                ui.separator();

                match self.settings_tab {
                    SettingsTab::Payment => self.settings_kinds(ui, KindList::Payment),
                    SettingsTab::Income => self.settings_kinds(ui, KindList::Income),
                    SettingsTab::Cards => self.settings_cards(ui),
                }
            });

        if !open {
            self.settings_open = false;
        }
    }

    fn settings_kinds(&mut self, ui: &mut egui::Ui, list: KindList) {
        let names: Vec<String> = match list {
            KindList::Income => self.doc.book.settings.income_kinds.clone(),
            KindList::Payment => self.doc.book.settings.payment_kinds.clone(),
        };
        let mut action: Option<KindAction> = None;

        for (idx, name) in names.iter().enumerate() {
            ui.horizontal(|ui| {
                let renaming = self
                    .kind_rename
                    .as_ref()
                    .is_some_and(|(l, i, _)| *l == list && *i == idx);
                if renaming {
                    let (_, _, buffer) = self.kind_rename.as_mut().unwrap();
                    ui.add(egui::TextEdit::singleline(buffer).desired_width(160.0));
                    if ui.button("Apply").clicked() {
                        let (_, _, buffer) = self.kind_rename.take().unwrap();
                        let buffer = buffer.trim().to_string();
                        if !buffer.is_empty() && buffer != *name {
                            action = Some(KindAction::Rename(idx, buffer));
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        self.kind_rename = None;
                    }
                } else {
                    ui.label(name);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let in_use = settings_ops::is_kind_in_use(&self.doc.book, list, name);
                        let delete = ui
                            .add_enabled(!in_use, egui::Button::new("🗑"))
                            .on_disabled_hover_text("Used by ledger entries");
                        if delete.clicked() {
                            action = Some(KindAction::Delete(idx));
                        }
                        if ui.button("✏").clicked() {
                            self.kind_rename = Some((list, idx, name.clone()));
                        }
                        if ui
                            .add_enabled(idx + 1 < names.len(), egui::Button::new("⬇"))
                            .clicked()
                        {
                            action = Some(KindAction::Move(idx, idx + 1));
                        }
                        if ui.add_enabled(idx > 0, egui::Button::new("⬆")).clicked() {
                            action = Some(KindAction::Move(idx, idx - 1));
                        }
                    });
                }
            });
        }

        ui.separator();
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.new_kind_buffer)
                    .hint_text("New category")
                    .desired_width(160.0),
            );
            let name = self.new_kind_buffer.trim().to_string();
            let valid = !name.is_empty() && !names.contains(&name);
            if ui.add_enabled(valid, egui::Button::new("Add")).clicked() {
                action = Some(KindAction::Insert(names.len(), name));
                self.new_kind_buffer.clear();
            }
        });

        let book = &mut self.doc.book;
        let history = &mut self.doc.history;
        match action {
            Some(KindAction::Insert(at, name)) => {
                settings_ops::insert_kind(book, history, list, at, name);
                self.doc.modified = true;
            }
            Some(KindAction::Delete(idx)) => {
                settings_ops::delete_kind(book, history, list, idx);
                self.doc.modified = true;
            }
            Some(KindAction::Rename(idx, name)) => {
                settings_ops::rename_kind(book, history, list, idx, name);
                self.doc.modified = true;
            }
            Some(KindAction::Move(from, to)) => {
                settings_ops::move_kind(book, history, list, from, to);
                self.doc.modified = true;
            }
            None => {}
        }
    }

    fn settings_cards(&mut self, ui: &mut egui::Ui) {
        let cards = self.doc.book.settings.cards.clone();
        let mut action: Option<CardAction> = None;

        for (idx, card) in cards.iter().enumerate() {
            ui.horizontal(|ui| {
                let editing = self.card_edit.as_ref().is_some_and(|(i, _, _)| *i == idx);
                if editing {
                    let (_, name_buf, closing_buf) = self.card_edit.as_mut().unwrap();
                    ui.add(egui::TextEdit::singleline(name_buf).desired_width(140.0));
                    ui.label("closes on");
                    ui.add(egui::DragValue::new(closing_buf).range(1..=31));
                    if ui.button("Apply").clicked() {
                        let (_, name_buf, closing_buf) = self.card_edit.take().unwrap();
                        let name_buf = name_buf.trim().to_string();
                        if !name_buf.is_empty() {
                            action = Some(CardAction::Change(idx, name_buf, closing_buf));
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        self.card_edit = None;
                    }
                } else {
                    ui.label(format!("{} (closing day {})", card.name, card.closing));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let in_use = settings_ops::is_card_in_use(&self.doc.book, &card.name);
                        let delete = ui
                            .add_enabled(!in_use, egui::Button::new("🗑"))
                            .on_disabled_hover_text("Used by ledger entries");
                        if delete.clicked() {
                            action = Some(CardAction::Delete(idx));
                        }
                        if ui.button("✏").clicked() {
                            self.card_edit = Some((idx, card.name.clone(), card.closing));
                        }
                        if ui
                            .add_enabled(idx + 1 < cards.len(), egui::Button::new("⬇"))
                            .clicked()
                        {
                            action = Some(CardAction::Move(idx, idx + 1));
                        }
                        if ui.add_enabled(idx > 0, egui::Button::new("⬆")).clicked() {
                            action = Some(CardAction::Move(idx, idx - 1));
                        }
                    });
                }
            });
        }

        ui.separator();
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.new_card_name)
                    .hint_text("New card")
                    .desired_width(140.0),
            );
            ui.label("closes on");
            ui.add(egui::DragValue::new(&mut self.new_card_closing).range(1..=31));
            let name = self.new_card_name.trim().to_string();
            let valid = !name.is_empty() && !cards.iter().any(|c| c.name == name);
            if ui.add_enabled(valid, egui::Button::new("Add")).clicked() {
                action = Some(CardAction::Insert(CardEntry {
                    name,
                    closing: self.new_card_closing,
                }));
                self.new_card_name.clear();
            }
        });

        let book = &mut self.doc.book;
        let history = &mut self.doc.history;
        match action {
            Some(CardAction::Insert(card)) => {
                let at = book.settings.cards.len();
                settings_ops::insert_card(book, history, at, card);
                self.doc.modified = true;
            }
            Some(CardAction::Delete(idx)) => {
                settings_ops::delete_card(book, history, idx);
                self.doc.modified = true;
            }
            Some(CardAction::Change(idx, name, closing)) => {
                let prev = &book.settings.cards[idx];
                let name = (prev.name != name).then_some(name);
                let closing = (prev.closing != closing).then_some(closing);
                if name.is_some() || closing.is_some() {
                    settings_ops::change_card(book, history, idx, name, closing);
                    self.doc.modified = true;
                }
            }
            Some(CardAction::Move(from, to)) => {
                settings_ops::move_card(book, history, from, to);
                self.doc.modified = true;
            }
            None => {}
        }
    }
}
