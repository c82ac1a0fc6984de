//! The open workbook plus its session state: undo history, backing
//! file, and modified flag.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::editing::History;
use crate::io;
use crate::month;
use crate::workbook::{MonthTotals, Workbook};

/// One editing session over one workbook.
///
/// The UI mutates `book` only through the operations in
/// [`crate::editing`] and [`crate::settings_ops`], passing `history`
/// alongside, and calls [`LedgerFile::commit_history`] once per frame
/// so each frame's mutations become one undo step.
pub struct LedgerFile {
    pub book: Workbook,
    pub history: History,
    pub file_path: Option<PathBuf>,
    pub modified: bool,
}

impl Default for LedgerFile {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerFile {
    /// A fresh unsaved workbook with a page for the current month.
    pub fn new() -> Self {
        Self {
            book: Workbook::starter(month::current_month()),
            history: History::new(),
            file_path: None,
            modified: false,
        }
    }

    /// Opens a workbook file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or parsed.
    pub fn open(path: &Path) -> Result<Self> {
        let book = io::load_workbook(path)?;
        Ok(Self {
            book,
            history: History::new(),
            file_path: Some(path.to_path_buf()),
            modified: false,
        })
    }

    /// Saves to the current backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no backing file or the write fails.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .file_path
            .clone()
            .ok_or_else(|| anyhow::anyhow!("workbook has no file path"))?;
        self.save_to(&path)
    }

    /// Saves to `path` and makes it the backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        io::save_workbook(&self.book, path)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Display title: file stem or "Untitled".
    pub fn title(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_stem)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Undoes one step. No-op (and keeps `modified` untouched) when
    /// there is nothing to undo.
    pub fn undo(&mut self) {
        if self.history.can_undo() {
            self.history.undo(&mut self.book);
            self.modified = true;
        }
    }

    /// Redoes one step.
    pub fn redo(&mut self) {
        if self.history.can_redo() {
            self.history.redo(&mut self.book);
            self.modified = true;
        }
    }

    /// Flushes the frame's burst of registered inverses into one undo
    /// (or redo) group. Call exactly once per synchronous turn.
    pub fn commit_history(&mut self) {
        self.history.commit();
    }

    /// Totals for the given month page.
    pub fn month_totals(&self, month: u32) -> MonthTotals {
        self.book.month_totals(month)
    }
}
