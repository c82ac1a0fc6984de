//! Editing operations on the ledger data.
//!
//! Every operation here mutates the workbook and registers exactly one
//! inverse action per atomic change, in the same synchronous turn as
//! the change. The inverse of each operation is the same operation with
//! the prior state, so replaying a group re-registers the actions that
//! become the opposite group.
//!
//! Operations are tolerant of stale coordinates (missing page, row out
//! of range): they log and do nothing rather than fail, since
//! registration itself can never fail.

use tallybook_mod_history::UndoManager;

use crate::entry::{FieldValue, LedgerEntry};
use crate::workbook::Workbook;

/// The undo history of one workbook session.
pub type History = UndoManager<Workbook>;

/// Writes one field of one entry, registering the inverse write.
pub fn set_field(book: &mut Workbook, history: &mut History, month: u32, row: usize, value: FieldValue) {
    let Some(rows) = book.pages.get_mut(&month) else {
        tracing::warn!(month, "set_field on missing page");
        return;
    };
    let Some(entry) = rows.get_mut(row) else {
        tracing::warn!(month, row, "set_field on missing row");
        return;
    };
    let prev = entry.replace_field(value);
    history.register_undo(move |book, history| set_field(book, history, month, row, prev));
}

/// Inserts a row at `row` (clamped to the page length).
pub fn insert_row(book: &mut Workbook, history: &mut History, month: u32, row: usize, entry: LedgerEntry) {
    let Some(rows) = book.pages.get_mut(&month) else {
        tracing::warn!(month, "insert_row on missing page");
        return;
    };
    let row = row.min(rows.len());
    rows.insert(row, entry);
    history.register_undo(move |book, history| delete_row(book, history, month, row));
}

/// Deletes the row at `row`, registering its re-insertion.
pub fn delete_row(book: &mut Workbook, history: &mut History, month: u32, row: usize) {
    let Some(rows) = book.pages.get_mut(&month) else {
        tracing::warn!(month, "delete_row on missing page");
        return;
    };
    if row >= rows.len() {
        tracing::warn!(month, row, "delete_row out of range");
        return;
    }
    let removed = rows.remove(row);
    history.register_undo(move |book, history| insert_row(book, history, month, row, removed));
}

/// Adds an empty page for `month`. No-op if the page already exists.
pub fn insert_page(book: &mut Workbook, history: &mut History, month: u32) {
    if book.pages.contains_key(&month) {
        tracing::warn!(month, "insert_page for existing page");
        return;
    }
    insert_page_with(book, history, month, Vec::new());
}

/// Removes the page for `month` together with its rows; the inverse
/// restores the page with its contents.
pub fn delete_page(book: &mut Workbook, history: &mut History, month: u32) {
    let Some(rows) = book.pages.remove(&month) else {
        tracing::warn!(month, "delete_page on missing page");
        return;
    };
    history.register_undo(move |book, history| insert_page_with(book, history, month, rows));
}

fn insert_page_with(book: &mut Workbook, history: &mut History, month: u32, rows: Vec<LedgerEntry>) {
    book.pages.insert(month, rows);
    history.register_undo(move |book, history| delete_page(book, history, month));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Workbook, History) {
        let mut book = Workbook::default();
        book.pages.insert(202405, Vec::new());
        (book, History::new())
    }

    fn named(item: &str) -> LedgerEntry {
        LedgerEntry {
            item: item.to_string(),
            ..Default::default()
        }
    }

    // -- Field edits --

    #[test]
    fn test_set_field_undo_redo() {
        let (mut book, mut history) = setup();
        insert_row(&mut book, &mut history, 202405, 0, named("old"));
        history.commit();

        set_field(
            &mut book,
            &mut history,
            202405,
            0,
            FieldValue::Item("new".to_string()),
        );
        history.commit();
        assert_eq!(book.pages[&202405][0].item, "new");

        history.undo(&mut book);
        history.commit();
        assert_eq!(book.pages[&202405][0].item, "old");

        history.redo(&mut book);
        history.commit();
        assert_eq!(book.pages[&202405][0].item, "new");
    }

    #[test]
    fn test_set_field_on_missing_row_registers_nothing() {
        let (mut book, mut history) = setup();
        set_field(&mut book, &mut history, 202405, 7, FieldValue::IsIncome(true));
        set_field(&mut book, &mut history, 209901, 0, FieldValue::IsIncome(true));
        history.commit();
        assert!(!history.can_undo());
    }

    // -- Rows --

    #[test]
    fn test_insert_row_clamps_index() {
        let (mut book, mut history) = setup();
        insert_row(&mut book, &mut history, 202405, 99, named("a"));
        assert_eq!(book.pages[&202405].len(), 1);
    }

    #[test]
    fn test_delete_row_restores_content_on_undo() {
        let (mut book, mut history) = setup();
        insert_row(&mut book, &mut history, 202405, 0, named("a"));
        insert_row(&mut book, &mut history, 202405, 1, named("b"));
        history.commit();

        delete_row(&mut book, &mut history, 202405, 0);
        history.commit();
        assert_eq!(book.pages[&202405][0].item, "b");

        history.undo(&mut book);
        history.commit();
        assert_eq!(book.pages[&202405][0].item, "a");
        assert_eq!(book.pages[&202405][1].item, "b");
    }

    #[test]
    fn test_delete_row_out_of_range_is_noop() {
        let (mut book, mut history) = setup();
        delete_row(&mut book, &mut history, 202405, 0);
        history.commit();
        assert!(!history.can_undo());
    }

    // -- Pages --

    #[test]
    fn test_insert_and_delete_page_round_trip() {
        let (mut book, mut history) = setup();
        insert_row(&mut book, &mut history, 202405, 0, named("kept"));
        history.commit();

        delete_page(&mut book, &mut history, 202405);
        history.commit();
        assert!(book.pages.is_empty());

        history.undo(&mut book);
        history.commit();
        assert_eq!(book.pages[&202405][0].item, "kept");

        history.redo(&mut book);
        history.commit();
        assert!(book.pages.is_empty());
    }

    #[test]
    fn test_insert_page_for_existing_month_is_noop() {
        let (mut book, mut history) = setup();
        insert_row(&mut book, &mut history, 202405, 0, named("kept"));
        history.commit();

        insert_page(&mut book, &mut history, 202405);
        history.commit();
        // The existing page and its row survive, and nothing new is undoable.
        assert_eq!(book.pages[&202405].len(), 1);
        assert_eq!(history.undo_depth(), 1);
    }

    // -- Whole-interaction grouping --

    #[test]
    fn test_row_fill_in_is_one_undo_step() {
        let (mut book, mut history) = setup();

        // One user interaction: new row plus three field writes.
        insert_row(&mut book, &mut history, 202405, 0, LedgerEntry::default());
        set_field(&mut book, &mut history, 202405, 0, FieldValue::Day(Some(12)));
        set_field(
            &mut book,
            &mut history,
            202405,
            0,
            FieldValue::Item("lunch".to_string()),
        );
        set_field(&mut book, &mut history, 202405, 0, FieldValue::Amount(Some(980)));
        history.commit();
        assert_eq!(history.undo_depth(), 1);

        history.undo(&mut book);
        history.commit();
        assert!(book.pages[&202405].is_empty());

        history.redo(&mut book);
        history.commit();
        let row = &book.pages[&202405][0];
        assert_eq!(row.day, Some(12));
        assert_eq!(row.item, "lunch");
        assert_eq!(row.amount, Some(980));
    }
}
