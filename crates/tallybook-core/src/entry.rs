/// Core types for ledger rows and field edits.
use std::mem;

use serde::{Deserialize, Serialize};

/// One row of the ledger: a single income or payment record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerEntry {
    /// Day of month (1..=31). `None` while the row is being filled in.
    pub day: Option<u32>,
    /// Free-text description of the transaction.
    pub item: String,
    /// Category name; must come from the matching kinds list in settings.
    pub kind: String,
    /// Income row if true, payment row otherwise.
    pub is_income: bool,
    /// Amount in whole currency units. `None` while being filled in.
    pub amount: Option<i64>,
    /// Card name for card payments. Empty = cash.
    pub card: String,
}

/// A value destined for (or taken from) one field of a [`LedgerEntry`].
///
/// Carrying the field tag and value together lets a single edit
/// operation swap any field and hand back the previous value for the
/// inverse action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Day(Option<u32>),
    Item(String),
    Kind(String),
    IsIncome(bool),
    Amount(Option<i64>),
    Card(String),
}

impl LedgerEntry {
    /// Writes `value` into the matching field and returns the value it
    /// replaced, tagged with the same field.
    pub fn replace_field(&mut self, value: FieldValue) -> FieldValue {
        match value {
            FieldValue::Day(v) => FieldValue::Day(mem::replace(&mut self.day, v)),
            FieldValue::Item(v) => FieldValue::Item(mem::replace(&mut self.item, v)),
            FieldValue::Kind(v) => FieldValue::Kind(mem::replace(&mut self.kind, v)),
            FieldValue::IsIncome(v) => FieldValue::IsIncome(mem::replace(&mut self.is_income, v)),
            FieldValue::Amount(v) => FieldValue::Amount(mem::replace(&mut self.amount, v)),
            FieldValue::Card(v) => FieldValue::Card(mem::replace(&mut self.card, v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_field_returns_previous_value() {
        let mut entry = LedgerEntry {
            item: "bus fare".to_string(),
            ..Default::default()
        };
        let prev = entry.replace_field(FieldValue::Item("train fare".to_string()));
        assert_eq!(prev, FieldValue::Item("bus fare".to_string()));
        assert_eq!(entry.item, "train fare");
    }

    #[test]
    fn test_replace_field_round_trips() {
        let mut entry = LedgerEntry {
            amount: Some(1200),
            ..Default::default()
        };
        let prev = entry.replace_field(FieldValue::Amount(Some(1500)));
        let prev2 = entry.replace_field(prev);
        assert_eq!(entry.amount, Some(1200));
        assert_eq!(prev2, FieldValue::Amount(Some(1500)));
    }

    #[test]
    fn test_entry_serde_defaults_missing_fields() {
        // Simulates loading a workbook written by an older version.
        let json = r#"{"item": "coffee"}"#;
        let entry: LedgerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.item, "coffee");
        assert_eq!(entry.day, None);
        assert!(!entry.is_income);
        assert_eq!(entry.amount, None);
        assert!(entry.card.is_empty());
    }
}
