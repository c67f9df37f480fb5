//! Field normalization: coercing raw input into canonical wire values.
//!
//! Nothing here fails loudly. Malformed input degrades to a documented
//! default (0 for size, unset for date) and the degradation is emitted as a
//! `tracing` diagnostic, so a single bad field never makes a whole record
//! unreadable.

use jiff::civil::Date;
use jiff::fmt::strtime;
use tracing::warn;

/// The wire date pattern: `yyyy/mm/dd`.
pub const DATE_PATTERN: &str = "%Y/%m/%d";

/// Parses a room size. Unparsable input degrades to 0.
pub fn size(raw: &str) -> i32 {
    let raw = raw.trim();
    match raw.parse() {
        Ok(n) => n,
        Err(e) => {
            warn!(raw, error = %e, "size field is not an integer, defaulting to 0");
            0
        }
    }
}

/// Canonicalizes a smoking flag.
///
/// Total: every input maps to `'Y'`, `'N'`, or `' '` (unset). `'Y'`, `'N'`
/// and blank pass through, lowercase is uppercased, and `'1'` means smoking.
/// Everything else, including `'0'`, is non-smoking.
pub fn smoking(raw: char) -> char {
    match raw {
        ' ' | 'Y' | 'N' => raw,
        'y' | 'n' => raw.to_ascii_uppercase(),
        '1' => 'Y',
        _ => 'N',
    }
}

/// Parses a date with the given strftime-style pattern.
/// Unparsable input degrades to `None`.
pub fn date(raw: &str, pattern: &str) -> Option<Date> {
    let raw = raw.trim();
    match Date::strptime(pattern, raw) {
        Ok(d) => Some(d),
        Err(e) => {
            warn!(raw, pattern, error = %e, "date field could not be parsed, defaulting to unset");
            None
        }
    }
}

/// Formats a date with the given pattern.
///
/// An unset date formats to the empty string. An invalid pattern also
/// yields the empty string: where parsing was allowed to degrade,
/// formatting must not be the thing that errors.
pub fn format_date(date: Option<Date>, pattern: &str) -> String {
    let Some(date) = date else {
        return String::new();
    };
    match strtime::format(pattern, date) {
        Ok(formatted) => formatted,
        Err(e) => {
            warn!(pattern, error = %e, "invalid date pattern, formatting to empty");
            String::new()
        }
    }
}

/// Truncates a field value to its wire width.
///
/// An absent value renders as the empty string. No padding happens here;
/// fixed-width alignment belongs to the physical writer.
pub fn truncate(value: Option<&str>, width: usize) -> String {
    match value {
        Some(v) if v.chars().count() > width => v.chars().take(width).collect(),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}
