//! Amount formatting and lenient input parsing.
//!
//! Display uses thousands separators; parsing accepts what people
//! actually type into an amount cell, including full-width digits and
//! separators left over from a formatted value.

/// Formats an amount with a comma every three digits, e.g. `-1,234,567`.
pub fn format_amount(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}")
}

/// Parses user input into an amount.
///
/// Strips thousands separators (ASCII and full-width), converts
/// full-width digits and minus signs to ASCII, then parses. Returns
/// `None` for blank input or anything that still isn't a number.
pub fn parse_amount(input: &str) -> Option<i64> {
    let normalized: String = input
        .trim()
        .chars()
        .filter_map(|c| match c {
            ',' | '，' | '、' => None,
            'ー' | '−' | '－' => Some('-'),
            '０'..='９' => char::from_u32(c as u32 - 0xFEE0),
            _ => Some(c),
        })
        .collect();
    if normalized.is_empty() {
        return None;
    }
    normalized.parse().ok()
}
