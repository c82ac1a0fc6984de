//! Editing operations on workbook settings (kinds lists and cards).
//!
//! Same contract as [`crate::editing`]: every mutation registers its
//! inverse in the same synchronous turn, so settings edits share the
//! session's undo history with data edits.

use crate::editing::History;
use crate::workbook::{CardEntry, Workbook};

/// Which of the two category lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindList {
    Income,
    Payment,
}

fn kinds_mut(book: &mut Workbook, list: KindList) -> &mut Vec<String> {
    match list {
        KindList::Income => &mut book.settings.income_kinds,
        KindList::Payment => &mut book.settings.payment_kinds,
    }
}

/// Inserts a category name at `index` (clamped).
pub fn insert_kind(book: &mut Workbook, history: &mut History, list: KindList, index: usize, kind: String) {
    let names = kinds_mut(book, list);
    let index = index.min(names.len());
    names.insert(index, kind);
    history.register_undo(move |book, history| delete_kind(book, history, list, index));
}

/// Deletes the category at `index`. The caller is expected to have
/// checked [`is_kind_in_use`] first; deletion itself does not.
pub fn delete_kind(book: &mut Workbook, history: &mut History, list: KindList, index: usize) {
    let names = kinds_mut(book, list);
    if index >= names.len() {
        tracing::warn!(?list, index, "delete_kind out of range");
        return;
    }
    let removed = names.remove(index);
    history.register_undo(move |book, history| insert_kind(book, history, list, index, removed));
}

/// Renames the category at `index`.
pub fn rename_kind(book: &mut Workbook, history: &mut History, list: KindList, index: usize, kind: String) {
    let names = kinds_mut(book, list);
    let Some(slot) = names.get_mut(index) else {
        tracing::warn!(?list, index, "rename_kind out of range");
        return;
    };
    let prev = std::mem::replace(slot, kind);
    history.register_undo(move |book, history| rename_kind(book, history, list, index, prev));
}

/// Moves the category at `from` to position `to`.
pub fn move_kind(book: &mut Workbook, history: &mut History, list: KindList, from: usize, to: usize) {
    let names = kinds_mut(book, list);
    if from >= names.len() || to >= names.len() || from == to {
        return;
    }
    let name = names.remove(from);
    names.insert(to, name);
    history.register_undo(move |book, history| move_kind(book, history, list, to, from));
}

/// Whether any entry on any page uses this category name.
pub fn is_kind_in_use(book: &Workbook, list: KindList, kind: &str) -> bool {
    let wants_income = list == KindList::Income;
    book.pages
        .values()
        .flatten()
        .any(|e| e.is_income == wants_income && e.kind == kind)
}

/// Inserts a card at `index` (clamped).
pub fn insert_card(book: &mut Workbook, history: &mut History, index: usize, card: CardEntry) {
    let cards = &mut book.settings.cards;
    let index = index.min(cards.len());
    cards.insert(index, card);
    history.register_undo(move |book, history| delete_card(book, history, index));
}

/// Updates the name and/or closing day of the card at `index`; `None`
/// leaves that field alone. The inverse restores exactly the fields
/// that changed.
pub fn change_card(
    book: &mut Workbook,
    history: &mut History,
    index: usize,
    name: Option<String>,
    closing: Option<u32>,
) {
    let Some(card) = book.settings.cards.get_mut(index) else {
        tracing::warn!(index, "change_card out of range");
        return;
    };
    let prev_name = name.map(|n| std::mem::replace(&mut card.name, n));
    let prev_closing = closing.map(|c| std::mem::replace(&mut card.closing, c));
    history.register_undo(move |book, history| {
        change_card(book, history, index, prev_name, prev_closing)
    });
}

/// Deletes the card at `index`.
pub fn delete_card(book: &mut Workbook, history: &mut History, index: usize) {
    let cards = &mut book.settings.cards;
    if index >= cards.len() {
        tracing::warn!(index, "delete_card out of range");
        return;
    }
    let removed = cards.remove(index);
    history.register_undo(move |book, history| insert_card(book, history, index, removed));
}

/// Moves the card at `from` to position `to`.
pub fn move_card(book: &mut Workbook, history: &mut History, from: usize, to: usize) {
    let cards = &mut book.settings.cards;
    if from >= cards.len() || to >= cards.len() || from == to {
        return;
    }
    let card = cards.remove(from);
    cards.insert(to, card);
    history.register_undo(move |book, history| move_card(book, history, to, from));
}

/// Whether any entry on any page pays with this card.
pub fn is_card_in_use(book: &Workbook, name: &str) -> bool {
    book.pages.values().flatten().any(|e| e.card == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::LedgerEntry;

    fn setup() -> (Workbook, History) {
        (Workbook::starter(202405), History::new())
    }

    // -- Kinds --

    #[test]
    fn test_insert_kind_undo() {
        let (mut book, mut history) = setup();
        let before = book.settings.payment_kinds.clone();

        insert_kind(
            &mut book,
            &mut history,
            KindList::Payment,
            0,
            "Medical".to_string(),
        );
        history.commit();
        assert_eq!(book.settings.payment_kinds[0], "Medical");

        history.undo(&mut book);
        history.commit();
        assert_eq!(book.settings.payment_kinds, before);
    }

    #[test]
    fn test_rename_kind_round_trip() {
        let (mut book, mut history) = setup();
        rename_kind(
            &mut book,
            &mut history,
            KindList::Income,
            0,
            "Wages".to_string(),
        );
        history.commit();
        assert_eq!(book.settings.income_kinds[0], "Wages");

        history.undo(&mut book);
        history.commit();
        assert_eq!(book.settings.income_kinds[0], "Salary");

        history.redo(&mut book);
        history.commit();
        assert_eq!(book.settings.income_kinds[0], "Wages");
    }

    #[test]
    fn test_move_kind_inverse_restores_order() {
        let (mut book, mut history) = setup();
        let before = book.settings.payment_kinds.clone();

        move_kind(&mut book, &mut history, KindList::Payment, 0, 3);
        history.commit();
        assert_ne!(book.settings.payment_kinds, before);
        assert_eq!(book.settings.payment_kinds[3], before[0]);

        history.undo(&mut book);
        history.commit();
        assert_eq!(book.settings.payment_kinds, before);
    }

    #[test]
    fn test_move_kind_same_position_is_noop() {
        let (mut book, mut history) = setup();
        move_kind(&mut book, &mut history, KindList::Payment, 2, 2);
        history.commit();
        assert!(!history.can_undo());
    }

    #[test]
    fn test_is_kind_in_use_respects_income_flag() {
        let (mut book, _history) = setup();
        book.pages.get_mut(&202405).unwrap().push(LedgerEntry {
            kind: "Food".to_string(),
            is_income: false,
            ..Default::default()
        });
        assert!(is_kind_in_use(&book, KindList::Payment, "Food"));
        // Same name on the income side is a different category.
        assert!(!is_kind_in_use(&book, KindList::Income, "Food"));
        assert!(!is_kind_in_use(&book, KindList::Payment, "Housing"));
    }

    // -- Cards --

    #[test]
    fn test_insert_delete_card_round_trip() {
        let (mut book, mut history) = setup();
        insert_card(
            &mut book,
            &mut history,
            0,
            CardEntry {
                name: "Main card".to_string(),
                closing: 27,
            },
        );
        history.commit();

        delete_card(&mut book, &mut history, 0);
        history.commit();
        assert!(book.settings.cards.is_empty());

        history.undo(&mut book);
        history.commit();
        assert_eq!(book.settings.cards[0].name, "Main card");
        assert_eq!(book.settings.cards[0].closing, 27);
    }

    #[test]
    fn test_change_card_partial_update_inverse() {
        let (mut book, mut history) = setup();
        insert_card(
            &mut book,
            &mut history,
            0,
            CardEntry {
                name: "Main card".to_string(),
                closing: 27,
            },
        );
        history.commit();

        // Only the closing day changes; the name is left alone.
        change_card(&mut book, &mut history, 0, None, Some(15));
        history.commit();
        assert_eq!(book.settings.cards[0].closing, 15);
        assert_eq!(book.settings.cards[0].name, "Main card");

        history.undo(&mut book);
        history.commit();
        assert_eq!(book.settings.cards[0].closing, 27);
    }

    #[test]
    fn test_is_card_in_use() {
        let (mut book, _history) = setup();
        book.pages.get_mut(&202405).unwrap().push(LedgerEntry {
            card: "Main card".to_string(),
            ..Default::default()
        });
        assert!(is_card_in_use(&book, "Main card"));
        assert!(!is_card_in_use(&book, "Other card"));
    }

    // -- Mixed data and settings edits share one history --

    #[test]
    fn test_settings_and_data_edits_interleave_in_history() {
        let (mut book, mut history) = setup();
        crate::editing::insert_row(&mut book, &mut history, 202405, 0, LedgerEntry::default());
        history.commit();
        insert_kind(
            &mut book,
            &mut history,
            KindList::Payment,
            0,
            "Medical".to_string(),
        );
        history.commit();
        assert_eq!(history.undo_depth(), 2);

        // LIFO: the settings edit undoes first, then the data edit.
        history.undo(&mut book);
        history.commit();
        assert_ne!(book.settings.payment_kinds[0], "Medical");
        assert_eq!(book.pages[&202405].len(), 1);

        history.undo(&mut book);
        history.commit();
        assert!(book.pages[&202405].is_empty());
    }
}
