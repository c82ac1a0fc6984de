//! CSV import and export for ledger data.
//!
//! One record per entry, with the page's month as the first column:
//!
//! ```text
//! month,day,item,kind,income,amount,card
//! 2024-05,3,groceries,Food,0,4380,Main card
//! ```
//!
//! Fields containing commas, quotes, or newlines are quoted RFC-4180
//! style. Import goes through the editing layer, so an entire import is
//! one undoable step.

use anyhow::{bail, Context, Result};

use crate::editing::{self, History};
use crate::entry::LedgerEntry;
use crate::month::{month_label, parse_month_label};
use crate::workbook::Workbook;

const HEADER: &str = "month,day,item,kind,income,amount,card";

fn quote_field(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Serializes all pages, oldest month first, rows in page order.
pub fn export_csv(book: &Workbook) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for (&month, rows) in &book.pages {
        for row in rows {
            let day = row.day.map(|d| d.to_string()).unwrap_or_default();
            let amount = row.amount.map(|a| a.to_string()).unwrap_or_default();
            let income = if row.is_income { "1" } else { "0" };
            let record = [
                month_label(month),
                day,
                quote_field(&row.item),
                quote_field(&row.kind),
                income.to_string(),
                amount,
                quote_field(&row.card),
            ];
            out.push_str(&record.join(","));
            out.push('\n');
        }
    }
    out
}

/// Splits CSV text into records of fields, honoring quoted fields that
/// contain commas, escaped quotes, or newlines.
fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => record.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                _ => field.push(c),
            }
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}

/// Imports CSV text into the workbook, appending each record to its
/// month page (creating pages as needed). Returns the number of rows
/// imported.
///
/// All insertions register inverses into `history`, so the whole import
/// commits as one undo group.
///
/// # Errors
///
/// Returns an error on a missing/wrong header or a malformed record;
/// rows imported before the failing record remain applied (and remain
/// undoable as part of the burst).
pub fn import_csv(book: &mut Workbook, history: &mut History, text: &str) -> Result<usize> {
    let records = parse_records(text);
    let mut rows = records.iter();

    let header = rows.next().context("CSV input is empty")?;
    if header.join(",") != HEADER {
        bail!("unrecognized CSV header: expected '{HEADER}'");
    }

    let mut imported = 0;
    for (lineno, record) in rows.enumerate() {
        let lineno = lineno + 2; // 1-based, after the header
        if record.len() == 1 && record[0].is_empty() {
            continue; // trailing blank line
        }
        if record.len() != 7 {
            bail!("line {lineno}: expected 7 fields, got {}", record.len());
        }
        let month = parse_month_label(&record[0])
            .with_context(|| format!("line {lineno}: bad month '{}'", record[0]))?;
        let day = if record[1].is_empty() {
            None
        } else {
            Some(
                record[1]
                    .parse()
                    .with_context(|| format!("line {lineno}: bad day '{}'", record[1]))?,
            )
        };
        let is_income = match record[4].as_str() {
            "1" => true,
            "0" => false,
            other => bail!("line {lineno}: bad income flag '{other}'"),
        };
        let amount = if record[5].is_empty() {
            None
        } else {
            Some(
                record[5]
                    .parse()
                    .with_context(|| format!("line {lineno}: bad amount '{}'", record[5]))?,
            )
        };
        let entry = LedgerEntry {
            day,
            item: record[2].clone(),
            kind: record[3].clone(),
            is_income,
            amount,
            card: record[6].clone(),
        };

        if !book.pages.contains_key(&month) {
            editing::insert_page(book, history, month);
        }
        let at = book.pages[&month].len();
        editing::insert_row(book, history, month, at, entry);
        imported += 1;
    }
    tracing::info!(imported, "CSV import finished");
    Ok(imported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::FieldValue;

    fn sample_book() -> Workbook {
        let mut book = Workbook::default();
        book.pages.insert(
            202405,
            vec![
                LedgerEntry {
                    day: Some(3),
                    item: "groceries".to_string(),
                    kind: "Food".to_string(),
                    is_income: false,
                    amount: Some(4380),
                    card: "Main card".to_string(),
                },
                LedgerEntry {
                    day: Some(25),
                    item: "salary".to_string(),
                    kind: "Salary".to_string(),
                    is_income: true,
                    amount: Some(250_000),
                    card: String::new(),
                },
            ],
        );
        book
    }

    #[test]
    fn test_export_shape() {
        let csv = export_csv(&sample_book());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "2024-05,3,groceries,Food,0,4380,Main card");
        assert_eq!(lines[2], "2024-05,25,salary,Salary,1,250000,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_quotes_awkward_fields() {
        let mut book = Workbook::default();
        book.pages.insert(
            202401,
            vec![LedgerEntry {
                item: "dinner, \"La Tour\"".to_string(),
                ..Default::default()
            }],
        );
        let csv = export_csv(&book);
        assert!(csv.contains("\"dinner, \"\"La Tour\"\"\""));
    }

    #[test]
    fn test_import_round_trips_export() {
        let book = sample_book();
        let csv = export_csv(&book);

        let mut imported = Workbook::default();
        let mut history = History::new();
        let n = import_csv(&mut imported, &mut history, &csv).unwrap();
        assert_eq!(n, 2);
        assert_eq!(imported.pages, book.pages);
    }

    #[test]
    fn test_import_is_single_undo_group() {
        let book = sample_book();
        let csv = export_csv(&book);

        let mut imported = Workbook::default();
        let mut history = History::new();
        import_csv(&mut imported, &mut history, &csv).unwrap();
        history.commit();
        assert_eq!(history.undo_depth(), 1);

        // One undo step removes rows and the page they brought along.
        history.undo(&mut imported);
        history.commit();
        assert!(imported.pages.is_empty());

        history.redo(&mut imported);
        history.commit();
        assert_eq!(imported.pages, book.pages);
    }

    #[test]
    fn test_import_appends_to_existing_page() {
        let mut book = sample_book();
        let mut history = History::new();
        let csv = format!("{HEADER}\n2024-05,9,cinema,Leisure,0,1800,\n");
        import_csv(&mut book, &mut history, &csv).unwrap();
        assert_eq!(book.pages[&202405].len(), 3);
        assert_eq!(book.pages[&202405][2].item, "cinema");
    }

    #[test]
    fn test_import_rejects_wrong_header() {
        let mut book = Workbook::default();
        let mut history = History::new();
        let err = import_csv(&mut book, &mut history, "a,b,c\n1,2,3\n").unwrap_err();
        assert!(err.to_string().contains("header"));
    }

    #[test]
    fn test_import_reports_bad_line_number() {
        let mut book = Workbook::default();
        let mut history = History::new();
        let csv = format!("{HEADER}\n2024-05,3,ok,Food,0,100,\nnot-a-month,1,x,y,0,1,\n");
        let err = import_csv(&mut book, &mut history, &csv).unwrap_err();
        assert!(format!("{err:#}").contains("line 3"));
    }

    #[test]
    fn test_parse_records_handles_quoted_newline() {
        let records = parse_records("a,\"multi\nline\",c\n");
        assert_eq!(records, vec![vec!["a", "multi\nline", "c"]]);
    }

    #[test]
    fn test_quoted_fields_survive_round_trip() {
        let mut book = Workbook::default();
        let mut history = History::new();
        book.pages.insert(202401, Vec::new());
        crate::editing::insert_row(
            &mut book,
            &mut history,
            202401,
            0,
            LedgerEntry::default(),
        );
        crate::editing::set_field(
            &mut book,
            &mut history,
            202401,
            0,
            FieldValue::Item("a, \"b\"\nc".to_string()),
        );

        let csv = export_csv(&book);
        let mut reparsed = Workbook::default();
        import_csv(&mut reparsed, &mut history, &csv).unwrap();
        assert_eq!(reparsed.pages[&202401][0].item, "a, \"b\"\nc");
    }
}
