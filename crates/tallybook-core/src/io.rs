//! Workbook file I/O.
//!
//! Workbooks are stored as pretty-printed JSON so they stay diffable
//! and hand-editable in a pinch.

use std::path::Path;

use anyhow::{Context, Result};

use crate::workbook::Workbook;

/// File extension used by workbook files.
pub const WORKBOOK_EXTENSION: &str = "tally";

/// Writes the workbook to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_workbook(book: &Workbook, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(book).context("Failed to serialize workbook")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write workbook to {}", path.display()))?;
    tracing::info!(path = %path.display(), "workbook saved");
    Ok(())
}

/// Reads a workbook from `path`.
///
/// # Errors
///
/// Returns an error if the file can't be read or parsed.
pub fn load_workbook(path: &Path) -> Result<Workbook> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read workbook from {}", path.display()))?;
    let book =
        serde_json::from_str(&contents).context("Failed to parse workbook file")?;
    Ok(book)
}
