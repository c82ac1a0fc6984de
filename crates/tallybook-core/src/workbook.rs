/// The workbook: monthly ledger pages plus the settings that describe
/// the categories and cards used by the entries.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entry::LedgerEntry;

/// A credit/debit card known to the workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardEntry {
    pub name: String,
    /// Day of month the card's statement closes (1..=31).
    pub closing: u32,
}

/// Category and card lists that ledger entries refer to by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub income_kinds: Vec<String>,
    pub payment_kinds: Vec<String>,
    pub cards: Vec<CardEntry>,
}

impl Settings {
    /// Settings for a brand-new workbook: a usable starter set of
    /// categories, no cards.
    pub fn starter() -> Self {
        Self {
            income_kinds: vec!["Salary".to_string(), "Other income".to_string()],
            payment_kinds: vec![
                "Food".to_string(),
                "Housing".to_string(),
                "Utilities".to_string(),
                "Transport".to_string(),
                "Leisure".to_string(),
                "Other".to_string(),
            ],
            cards: Vec::new(),
        }
    }
}

/// Income and expense sums for one month page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthTotals {
    pub income: i64,
    pub expense: i64,
}

impl MonthTotals {
    pub fn balance(&self) -> i64 {
        self.income - self.expense
    }
}

/// The whole document: pages keyed by year-month, oldest first, plus
/// settings. Mutated only through the editing and settings operations
/// so every change registers its inverse.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Workbook {
    pub pages: BTreeMap<u32, Vec<LedgerEntry>>,
    pub settings: Settings,
}

impl Workbook {
    /// A fresh workbook with starter settings and one empty page for
    /// the given month.
    pub fn starter(month: u32) -> Self {
        let mut pages = BTreeMap::new();
        pages.insert(month, Vec::new());
        Self {
            pages,
            settings: Settings::starter(),
        }
    }

    /// Earliest month that has a page.
    pub fn first_month(&self) -> Option<u32> {
        self.pages.keys().next().copied()
    }

    /// Latest month that has a page.
    pub fn last_month(&self) -> Option<u32> {
        self.pages.keys().next_back().copied()
    }

    /// Rows of one month page.
    pub fn page(&self, month: u32) -> Option<&[LedgerEntry]> {
        self.pages.get(&month).map(Vec::as_slice)
    }

    /// Total number of entries across all pages.
    pub fn entry_count(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    /// Sums the entries of one month page. Rows without an amount
    /// count as zero.
    pub fn month_totals(&self, month: u32) -> MonthTotals {
        let mut totals = MonthTotals::default();
        if let Some(rows) = self.pages.get(&month) {
            for row in rows {
                let amount = row.amount.unwrap_or(0);
                if row.is_income {
                    totals.income += amount;
                } else {
                    totals.expense += amount;
                }
            }
        }
        totals
    }
}
