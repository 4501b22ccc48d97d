//! One-shot `DD/MM/YYYY, PPPP, RRRR` input.

use super::DraftRecord;
use crate::record::{is_four_digit_code, is_valid_date};

/// Why a three-part message was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectInputError {
    Date,
    Digits,
}

/// Classification of a free-text message with no active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectInput {
    /// Not three comma-separated parts; treated as unrelated chat.
    NotApplicable,
    /// Shaped like direct input but a field is malformed.
    FormatError(DirectInputError),
    /// All three fields are valid.
    Valid(DraftRecord),
}

/// Classifies a message as direct input.
#[must_use]
pub fn classify_direct_input(text: &str) -> DirectInput {
    let parts: Vec<&str> = text.trim().split(',').map(str::trim).collect();
    let [date, period, result] = parts.as_slice() else {
        return DirectInput::NotApplicable;
    };

    if !is_valid_date(date) {
        return DirectInput::FormatError(DirectInputError::Date);
    }
    if !(is_four_digit_code(period) && is_four_digit_code(result)) {
        return DirectInput::FormatError(DirectInputError::Digits);
    }

    DirectInput::Valid(DraftRecord {
        date: (*date).to_owned(),
        period: (*period).to_owned(),
        result: (*result).to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_direct_input() {
        assert_eq!(
            classify_direct_input("01/12/2025, 1111, 1234"),
            DirectInput::Valid(DraftRecord {
                date: "01/12/2025".to_owned(),
                period: "1111".to_owned(),
                result: "1234".to_owned(),
            })
        );
    }

    #[test]
    fn test_whitespace_tolerant() {
        assert!(matches!(
            classify_direct_input("  01/12/2025 ,1111 ,  0001  "),
            DirectInput::Valid(_)
        ));
    }

    #[test]
    fn test_not_three_parts_is_ignored() {
        assert_eq!(classify_direct_input("hello there"), DirectInput::NotApplicable);
        assert_eq!(classify_direct_input("a, b"), DirectInput::NotApplicable);
        assert_eq!(
            classify_direct_input("01/12/2025, 1111, 1234, 9999"),
            DirectInput::NotApplicable
        );
    }

    #[test]
    fn test_bad_date() {
        assert_eq!(
            classify_direct_input("31/02/2025, 1111, 1234"),
            DirectInput::FormatError(DirectInputError::Date)
        );
        assert_eq!(
            classify_direct_input("hi, there, friend"),
            DirectInput::FormatError(DirectInputError::Date)
        );
    }

    #[test]
    fn test_bad_digits() {
        assert_eq!(
            classify_direct_input("01/12/2025, 111, 1234"),
            DirectInput::FormatError(DirectInputError::Digits)
        );
        assert_eq!(
            classify_direct_input("01/12/2025, 1111, 12a4"),
            DirectInput::FormatError(DirectInputError::Digits)
        );
    }

    #[test]
    fn test_date_checked_before_digits() {
        assert_eq!(
            classify_direct_input("bad, bad, bad"),
            DirectInput::FormatError(DirectInputError::Date)
        );
    }
}
