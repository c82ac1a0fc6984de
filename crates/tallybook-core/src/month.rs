//! Year-month arithmetic for ledger page keys.
//!
//! Pages are keyed by `year * 100 + month` (e.g. 202405 = May 2024),
//! which sorts chronologically as a plain integer.

use chrono::Datelike;

/// The month after `ym`, rolling December into January.
pub fn next_month(ym: u32) -> u32 {
    if ym % 100 == 12 {
        ym + 89
    } else {
        ym + 1
    }
}

/// The month before `ym`, rolling January into December.
pub fn prev_month(ym: u32) -> u32 {
    if ym % 100 == 1 {
        ym - 89
    } else {
        ym - 1
    }
}

/// Whether `ym` encodes a real year-month.
pub fn is_valid_month(ym: u32) -> bool {
    let m = ym % 100;
    (1..=12).contains(&m) && ym >= 100
}

/// Display label for a page key, e.g. `2024-05`.
pub fn month_label(ym: u32) -> String {
    format!("{}-{:02}", ym / 100, ym % 100)
}

/// Parses a `YYYY-MM` label back into a page key.
pub fn parse_month_label(label: &str) -> Option<u32> {
    let (year, month) = label.split_once('-')?;
    let year: u32 = year.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    let ym = year * 100 + month;
    is_valid_month(ym).then_some(ym)
}

/// The current month according to the local clock.
pub fn current_month() -> u32 {
    let now = chrono::Local::now();
    now.year() as u32 * 100 + now.month()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_month_within_year() {
        assert_eq!(next_month(202405), 202406);
    }

    #[test]
    fn test_next_month_rolls_over_december() {
        assert_eq!(next_month(202412), 202501);
    }

    #[test]
    fn test_prev_month_within_year() {
        assert_eq!(prev_month(202406), 202405);
    }

    #[test]
    fn test_prev_month_rolls_back_january() {
        assert_eq!(prev_month(202501), 202412);
    }

    #[test]
    fn test_is_valid_month() {
        assert!(is_valid_month(202401));
        assert!(is_valid_month(202412));
        assert!(!is_valid_month(202400));
        assert!(!is_valid_month(202413));
        assert!(!is_valid_month(12));
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(202405), "2024-05");
        assert_eq!(month_label(199912), "1999-12");
    }

    #[test]
    fn test_parse_month_label() {
        assert_eq!(parse_month_label("2024-05"), Some(202405));
        assert_eq!(parse_month_label("2024-13"), None);
        assert_eq!(parse_month_label("garbage"), None);
        assert_eq!(parse_month_label("2024"), None);
    }

    #[test]
    fn test_current_month_is_valid() {
        assert!(is_valid_month(current_month()));
    }
}
