//! Draw records and the rules for building them.
//!
//! A [`Record`] is only ever assembled from already-validated fields and
//! maps one-to-one onto a spreadsheet row.

mod validate;

use chrono::{Local, NaiveDateTime};

pub use validate::{CODE_LEN, DATE_FORMAT, is_four_digit_code, is_valid_date, parse_draw_date};

/// Format of the capture timestamp (`DD/MM/YYYY HH:MM:SS`).
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Header row of the records sheet.
pub const SHEET_HEADER: [&str; 5] = ["Timestamp", "Tanggal", "Periode", "Result", "User"];

/// A single persisted draw record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Capture time in [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
    /// Draw date in [`DATE_FORMAT`].
    pub date: String,
    /// Four-digit period code.
    pub period: String,
    /// Four-digit result code.
    pub result: String,
    /// Display identity of the submitter.
    pub submitter: String,
}

impl Record {
    /// Assembles a record stamped with the current local time.
    #[must_use]
    pub fn now(date: &str, period: &str, result: &str, submitter: String) -> Self {
        Self::at(Local::now().naive_local(), date, period, result, submitter)
    }

    /// Assembles a record stamped with the given time.
    #[must_use]
    pub fn at(
        captured: NaiveDateTime,
        date: &str,
        period: &str,
        result: &str,
        submitter: String,
    ) -> Self {
        Self {
            timestamp: captured.format(TIMESTAMP_FORMAT).to_string(),
            date: date.trim().to_owned(),
            period: period.trim().to_owned(),
            result: result.trim().to_owned(),
            submitter,
        }
    }

    /// Returns the record as a sheet row in header order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.date.clone(),
            self.period.clone(),
            self.result.clone(),
            self.submitter.clone(),
        ]
    }
}

/// A data row read back from the sheet, keyed by header column.
///
/// Missing cells read as empty strings; nothing is validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordRow {
    pub timestamp: String,
    pub date: String,
    pub period: String,
    pub result: String,
    pub user: String,
}

impl RecordRow {
    /// Builds a row from header names and cell values.
    #[must_use]
    pub fn from_cells(header: &[String], cells: &[String]) -> Self {
        let mut row = Self::default();
        for (i, name) in header.iter().enumerate() {
            let value = cells.get(i).cloned().unwrap_or_default();
            match name.trim() {
                "Timestamp" => row.timestamp = value,
                "Tanggal" => row.date = value,
                "Periode" => row.period = value,
                "Result" => row.result = value,
                "User" => row.user = value,
                _ => {}
            }
        }
        row
    }
}

/// The chat user behind a message, as far as records are concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: u64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
}

/// Resolves the name stored in the `User` column.
///
/// Prefers the handle; falls back to "first last", then to `user<id>` so
/// the result is never empty.
#[must_use]
pub fn resolve_display_identity(user: &UserIdentity) -> String {
    if let Some(handle) = user.username.as_deref().map(str::trim)
        && !handle.is_empty()
    {
        return handle.to_owned();
    }

    let full_name = format!(
        "{} {}",
        user.first_name,
        user.last_name.as_deref().unwrap_or_default()
    );
    let full_name = full_name.trim();
    if full_name.is_empty() {
        format!("user{}", user.id)
    } else {
        full_name.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn user(username: Option<&str>, first: &str, last: Option<&str>) -> UserIdentity {
        UserIdentity {
            id: 42,
            username: username.map(str::to_owned),
            first_name: first.to_owned(),
            last_name: last.map(str::to_owned),
        }
    }

    #[test]
    fn test_identity_prefers_handle() {
        assert_eq!(
            resolve_display_identity(&user(Some("budi"), "Budi", Some("Santoso"))),
            "budi"
        );
    }

    #[test]
    fn test_identity_falls_back_to_full_name() {
        assert_eq!(
            resolve_display_identity(&user(None, "Budi", Some("Santoso"))),
            "Budi Santoso"
        );
        assert_eq!(resolve_display_identity(&user(None, "Budi", None)), "Budi");
        assert_eq!(resolve_display_identity(&user(Some(""), "Budi", None)), "Budi");
    }

    #[test]
    fn test_identity_never_empty() {
        assert_eq!(resolve_display_identity(&user(None, "", None)), "user42");
        assert_eq!(resolve_display_identity(&user(Some("  "), " ", Some(""))), "user42");
    }

    #[test]
    fn test_record_row_order_matches_header() {
        let captured = NaiveDate::from_ymd_opt(2025, 12, 1)
            .unwrap()
            .and_hms_opt(8, 5, 9)
            .unwrap();
        let record = Record::at(captured, " 01/12/2025", "1111 ", "1234", "budi".to_owned());
        assert_eq!(
            record.to_row(),
            vec!["01/12/2025 08:05:09", "01/12/2025", "1111", "1234", "budi"]
        );
    }

    #[test]
    fn test_record_row_from_short_cells() {
        let header: Vec<String> = SHEET_HEADER.iter().map(|h| (*h).to_owned()).collect();
        let cells = vec!["01/12/2025 08:00:00".to_owned(), "01/12/2025".to_owned()];
        let row = RecordRow::from_cells(&header, &cells);
        assert_eq!(row.date, "01/12/2025");
        assert!(row.result.is_empty());
        assert!(row.user.is_empty());
    }
}
