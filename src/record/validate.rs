//! Field validators for draw records.

use chrono::NaiveDate;

/// Format of the user-supplied draw date (`DD/MM/YYYY`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Number of digits in a period or result code.
pub const CODE_LEN: usize = 4;

/// Parses a draw date in strict `DD/MM/YYYY` form.
///
/// The input is trimmed first. Day and month must be two digits and the
/// year four digits; the date must exist on the calendar.
#[must_use]
pub fn parse_draw_date(input: &str) -> Option<NaiveDate> {
    let text = input.trim();
    let bytes = text.as_bytes();

    // chrono accepts single-digit days and months, so pin the shape first
    let shaped = bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !shaped {
        return None;
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// Returns `true` if the trimmed input is a valid draw date.
#[must_use]
pub fn is_valid_date(input: &str) -> bool {
    parse_draw_date(input).is_some()
}

/// Returns `true` if the trimmed input is exactly four ASCII digits.
///
/// Used for both the period and the result field. Leading zeros are fine.
#[must_use]
pub fn is_four_digit_code(input: &str) -> bool {
    let text = input.trim();
    text.len() == CODE_LEN && text.bytes().all(|b| b.is_ascii_digit())
}
