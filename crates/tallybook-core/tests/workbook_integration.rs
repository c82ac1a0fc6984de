// Integration tests spanning the data model, editing layer, and undo
// history together, simulating realistic data-entry sessions.

use tallybook_core::editing::{self, History};
use tallybook_core::entry::{FieldValue, LedgerEntry};
use tallybook_core::settings_ops::{self, KindList};
use tallybook_core::{CardEntry, LedgerFile, Workbook};

fn expense(day: u32, item: &str, kind: &str, amount: i64) -> LedgerEntry {
    LedgerEntry {
        day: Some(day),
        item: item.to_string(),
        kind: kind.to_string(),
        is_income: false,
        amount: Some(amount),
        card: String::new(),
    }
}

// ── Round-trip law on the real data model ──────────────────────────────

#[test]
fn test_session_round_trip_restores_exact_state() {
    let mut book = Workbook::starter(202405);
    let mut history = History::new();
    let initial = book.clone();

    // Turn 1: fill in a row.
    editing::insert_row(&mut book, &mut history, 202405, 0, LedgerEntry::default());
    editing::set_field(&mut book, &mut history, 202405, 0, FieldValue::Day(Some(3)));
    editing::set_field(
        &mut book,
        &mut history,
        202405,
        0,
        FieldValue::Item("groceries".to_string()),
    );
    editing::set_field(
        &mut book,
        &mut history,
        202405,
        0,
        FieldValue::Amount(Some(4380)),
    );
    history.commit();
    let after_first = book.clone();

    // Turn 2: a settings edit.
    settings_ops::insert_card(
        &mut book,
        &mut history,
        0,
        CardEntry {
            name: "Main card".to_string(),
            closing: 27,
        },
    );
    history.commit();
    let after_second = book.clone();

    // Unwind both turns.
    history.undo(&mut book);
    history.commit();
    assert_eq!(book, after_first);
    history.undo(&mut book);
    history.commit();
    assert_eq!(book, initial);

    // Replay both turns.
    history.redo(&mut book);
    history.commit();
    assert_eq!(book, after_first);
    history.redo(&mut book);
    history.commit();
    assert_eq!(book, after_second);
}

#[test]
fn test_month_close_workflow() {
    let mut book = Workbook::starter(202404);
    let mut history = History::new();

    // Fill April, then open May and move on.
    editing::insert_row(
        &mut book,
        &mut history,
        202404,
        0,
        expense(28, "utilities", "Utilities", 7300),
    );
    history.commit();

    editing::insert_page(&mut book, &mut history, 202405);
    history.commit();
    assert_eq!(book.last_month(), Some(202405));

    editing::insert_row(
        &mut book,
        &mut history,
        202405,
        0,
        expense(1, "rent", "Housing", 90_000),
    );
    history.commit();

    assert_eq!(book.month_totals(202404).expense, 7300);
    assert_eq!(book.month_totals(202405).expense, 90_000);

    // Undoing the page creation also removes the row added to it...
    history.undo(&mut book);
    history.commit();
    history.undo(&mut book);
    history.commit();
    assert_eq!(book.last_month(), Some(202404));

    // ...and redoing brings both back, in order.
    history.redo(&mut book);
    history.commit();
    history.redo(&mut book);
    history.commit();
    assert_eq!(book.pages[&202405][0].item, "rent");
}

#[test]
fn test_new_edit_after_undo_invalidates_redo() {
    let mut book = Workbook::starter(202405);
    let mut history = History::new();

    editing::insert_row(&mut book, &mut history, 202405, 0, expense(1, "a", "Food", 100));
    history.commit();
    history.undo(&mut book);
    history.commit();
    assert!(history.can_redo());

    settings_ops::insert_kind(
        &mut book,
        &mut history,
        KindList::Payment,
        0,
        "Medical".to_string(),
    );
    history.commit();
    assert!(!history.can_redo());
}

// ── CSV import as one step, via the document wrapper ───────────────────

#[test]
fn test_csv_import_session_is_one_undo_step() {
    let mut source = Workbook::default();
    source.pages.insert(
        202401,
        vec![
            expense(5, "groceries", "Food", 3200),
            expense(12, "cinema", "Leisure", 1800),
        ],
    );
    source
        .pages
        .insert(202402, vec![expense(1, "rent", "Housing", 90_000)]);
    let csv = tallybook_core::csv::export_csv(&source);

    let mut file = LedgerFile::new();
    let before = file.book.clone();
    let n = tallybook_core::csv::import_csv(&mut file.book, &mut file.history, &csv).unwrap();
    file.modified = true;
    file.commit_history();

    assert_eq!(n, 3);
    assert_eq!(file.history.undo_depth(), 1);
    assert_eq!(file.book.entry_count(), 3);

    file.undo();
    file.commit_history();
    assert_eq!(file.book, before);
}

// ── Persistence round trip of an edited session ────────────────────────

#[test]
fn test_edit_save_reopen() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("household.tally");

    let mut file = LedgerFile::new();
    let month = file.book.first_month().unwrap();
    editing::insert_row(
        &mut file.book,
        &mut file.history,
        month,
        0,
        expense(2, "coffee", "Food", 480),
    );
    file.modified = true;
    file.commit_history();
    file.save_to(&path).expect("save");

    let reopened = LedgerFile::open(&path).expect("open");
    assert_eq!(reopened.book, file.book);
    // History is per-session and does not survive a reopen.
    assert!(!reopened.history.can_undo());
    assert!(!reopened.modified);
}
