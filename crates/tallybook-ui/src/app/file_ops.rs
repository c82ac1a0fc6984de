//! File operations for the ledger application.
//!
//! Handles new/open/save with unsaved-change prompts, CSV import and
//! export, and file dialog bookkeeping.

use std::path::Path;

use tallybook_core::io::WORKBOOK_EXTENSION;
use tallybook_core::{csv, LedgerFile};

use super::{App, DialogState, PendingAction};

impl App {
    /// Starts a fresh workbook, prompting first if there are unsaved
    /// changes.
    pub(crate) fn request_new_file(&mut self) {
        if self.doc.modified {
            self.dialog_state = DialogState::ConfirmDiscard(PendingAction::NewFile);
        } else {
            self.replace_doc(LedgerFile::new());
        }
    }

    /// Opens a workbook, prompting first if there are unsaved changes.
    pub(crate) fn request_open_file(&mut self) {
        if self.doc.modified {
            self.dialog_state = DialogState::ConfirmDiscard(PendingAction::OpenFile);
        } else {
            self.open_file_dialog();
        }
    }

    /// Opens a file dialog and loads the selected workbook.
    pub(crate) fn open_file_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Open Workbook")
            .add_filter("Tally workbook", &[WORKBOOK_EXTENSION]);
        if let Some(dir) = self.resolve_dialog_directory() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.update_last_used_folder(&path);
            match LedgerFile::open(&path) {
                Ok(doc) => self.replace_doc(doc),
                Err(e) => tracing::error!("Failed to open workbook: {e:#}"),
            }
        }
    }

    /// Saves the workbook, or opens a save-as dialog if it has no file
    /// path yet.
    pub(crate) fn save_active(&mut self) {
        if self.doc.file_path.is_some() {
            if let Err(e) = self.doc.save() {
                tracing::error!("Failed to save: {e:#}");
            }
        } else {
            self.save_as_dialog();
        }
    }

    /// Opens a save-as dialog and saves the workbook to the chosen path.
    pub(crate) fn save_as_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Save As")
            .add_filter("Tally workbook", &[WORKBOOK_EXTENSION])
            .set_file_name(format!("{}.{WORKBOOK_EXTENSION}", self.doc.title()));
        if let Some(dir) = self.resolve_dialog_directory() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.save_file() {
            self.update_last_used_folder(&path);
            if let Err(e) = self.doc.save_to(&path) {
                tracing::error!("Failed to save: {e:#}");
            }
        }
    }

    /// Picks a CSV file and imports its records into the open workbook.
    /// The whole import becomes a single undo step.
    pub(crate) fn import_csv_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Import CSV")
            .add_filter("CSV", &["csv"]);
        if let Some(dir) = self.resolve_dialog_directory() {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return;
        };
        self.update_last_used_folder(&path);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Failed to read '{}': {e}", path.display());
                return;
            }
        };
        match csv::import_csv(&mut self.doc.book, &mut self.doc.history, &text) {
            Ok(n) => {
                tracing::info!(rows = n, "imported CSV from {}", path.display());
                if n > 0 {
                    self.doc.modified = true;
                }
            }
            Err(e) => {
                tracing::error!("CSV import failed: {e:#}");
                // Rows applied before the failure stay undoable.
                self.doc.modified = true;
            }
        }
    }

    /// Exports the whole workbook as CSV to a chosen path.
    pub(crate) fn export_csv_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Export CSV")
            .add_filter("CSV", &["csv"])
            .set_file_name(format!("{}.csv", self.doc.title()));
        if let Some(dir) = self.resolve_dialog_directory() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.save_file() {
            self.update_last_used_folder(&path);
            let text = csv::export_csv(&self.doc.book);
            if let Err(e) = std::fs::write(&path, text) {
                tracing::error!("Failed to write '{}': {e}", path.display());
            }
        }
    }

    /// Returns the starting directory for file dialogs.
    fn resolve_dialog_directory(&self) -> Option<std::path::PathBuf> {
        if self.remember_last_folder {
            if let Some(ref folder) = self.last_used_folder {
                if folder.is_dir() {
                    return Some(folder.clone());
                }
            }
        }
        dirs::home_dir()
    }

    /// Updates `last_used_folder` from a file path's parent directory.
    fn update_last_used_folder(&mut self, file_path: &Path) {
        if self.remember_last_folder {
            if let Some(parent) = file_path.parent() {
                self.last_used_folder = Some(parent.to_path_buf());
            }
        }
    }
}
