//! Read-only statistics over stored draw records.
//!
//! Every command reloads the sheet, so results always reflect whatever
//! records exist at that moment.

mod predict;
mod report;
mod stats;

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::error;

use crate::commands::analysis as replies;
use crate::record::{DATE_FORMAT, RecordRow, TIMESTAMP_FORMAT};
use crate::sheets::{RecordSheet, read_records};

pub use predict::{CrossPattern, cross_pattern, date_digits, recommendations, weighted_sample};
pub use report::{ANALYSIS_WINDOW, PREDICTION_WINDOW, ReportError, analysis_report, prediction_report};
pub use stats::{DigitFrequency, cold_digits, hot_digits};

/// A stored record with parsed dates, as used by the statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub date: NaiveDate,
    pub captured: NaiveDateTime,
    pub result: String,
}

impl Draw {
    /// ASCII digits of the result.
    pub fn digits(&self) -> impl Iterator<Item = char> + '_ {
        self.result.chars().filter(char::is_ascii_digit)
    }
}

/// Parses rows into draws, newest draw date first.
///
/// Rows whose `Tanggal` or `Timestamp` does not parse are dropped. Rows
/// sharing a date keep their sheet order.
#[must_use]
pub fn load_draws(rows: &[RecordRow]) -> Vec<Draw> {
    let mut draws: Vec<Draw> = rows
        .iter()
        .filter_map(|row| {
            let date = NaiveDate::parse_from_str(row.date.trim(), DATE_FORMAT).ok()?;
            let captured =
                NaiveDateTime::parse_from_str(row.timestamp.trim(), TIMESTAMP_FORMAT).ok()?;
            Some(Draw {
                date,
                captured,
                result: row.result.trim().to_owned(),
            })
        })
        .collect();

    draws.sort_by(|a, b| b.date.cmp(&a.date));
    draws
}

/// Answers the analysis bot's data commands.
pub struct AnalysisEngine {
    sheet: Arc<dyn RecordSheet>,
}

impl AnalysisEngine {
    #[must_use]
    pub fn new(sheet: Arc<dyn RecordSheet>) -> Self {
        Self { sheet }
    }

    /// `/analisis` reply.
    pub async fn analyze(&self) -> String {
        let draws = match self.load().await {
            Ok(draws) => draws,
            Err(reply) => return reply,
        };

        match analysis_report(&draws) {
            Ok(text) => text,
            Err(ReportError::NoData) => replies::NO_DATA.to_owned(),
            Err(ReportError::NoDigits) => replies::NO_DIGITS_ANALYSIS.to_owned(),
        }
    }

    /// `/prediksi` reply.
    pub async fn predict(&self) -> String {
        let draws = match self.load().await {
            Ok(draws) => draws,
            Err(reply) => return reply,
        };

        let mut rng = StdRng::from_entropy();
        match prediction_report(&draws, &mut rng) {
            Ok(text) => text,
            Err(ReportError::NoData) => replies::NO_DATA.to_owned(),
            Err(ReportError::NoDigits) => replies::NO_DIGITS_PREDICTION.to_owned(),
        }
    }

    async fn load(&self) -> Result<Vec<Draw>, String> {
        match read_records(self.sheet.as_ref()).await {
            Ok(rows) => Ok(load_draws(&rows)),
            Err(e) => {
                error!("Error getting data from spreadsheet: {}", e);
                Err(replies::NO_DATA.to_owned())
            }
        }
    }
}

impl std::fmt::Debug for AnalysisEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisEngine").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sheets::{MemorySheet, header_row};

    /// Draws with the given results, newest first, one day apart.
    pub(crate) fn draws(results: &[&str]) -> Vec<Draw> {
        let newest = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let date = newest - chrono::Days::new(i as u64);
                Draw {
                    date,
                    captured: date.and_hms_opt(12, 0, 0).unwrap(),
                    result: (*result).to_owned(),
                }
            })
            .collect()
    }

    fn row(date: &str, timestamp: &str, result: &str) -> RecordRow {
        RecordRow {
            timestamp: timestamp.to_owned(),
            date: date.to_owned(),
            period: "1111".to_owned(),
            result: result.to_owned(),
            user: "budi".to_owned(),
        }
    }

    #[test]
    fn test_load_draws_sorts_newest_first() {
        let rows = vec![
            row("01/12/2025", "01/12/2025 10:00:00", "1111"),
            row("03/12/2025", "03/12/2025 10:00:00", "3333"),
            row("02/12/2025", "02/12/2025 10:00:00", "2222"),
        ];
        let results: Vec<String> = load_draws(&rows).into_iter().map(|d| d.result).collect();
        assert_eq!(results, vec!["3333", "2222", "1111"]);
    }

    #[test]
    fn test_load_draws_drops_unparseable_rows() {
        let rows = vec![
            row("01/12/2025", "01/12/2025 10:00:00", "1111"),
            row("not a date", "01/12/2025 10:00:00", "2222"),
            row("01/12/2025", "yesterday", "3333"),
        ];
        let draws = load_draws(&rows);
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].result, "1111");
    }

    #[test]
    fn test_load_draws_keeps_sheet_order_for_same_date() {
        let rows = vec![
            row("01/12/2025", "01/12/2025 10:00:00", "1111"),
            row("01/12/2025", "01/12/2025 11:00:00", "2222"),
        ];
        let results: Vec<String> = load_draws(&rows).into_iter().map(|d| d.result).collect();
        assert_eq!(results, vec!["1111", "2222"]);
    }

    #[tokio::test]
    async fn test_engine_empty_sheet() {
        let engine = AnalysisEngine::new(Arc::new(MemorySheet::with_rows(vec![header_row()])));
        assert_eq!(engine.analyze().await, replies::NO_DATA);
        assert_eq!(engine.predict().await, replies::NO_DATA);
    }

    #[tokio::test]
    async fn test_engine_unreachable_sheet() {
        let sheet = Arc::new(MemorySheet::new());
        sheet.set_failing(true);
        let engine = AnalysisEngine::new(sheet);
        assert_eq!(engine.analyze().await, replies::NO_DATA);
    }

    #[tokio::test]
    async fn test_engine_reports_over_sheet() {
        let sheet = MemorySheet::with_rows(vec![
            header_row(),
            vec![
                "01/12/2025 10:00:00".to_owned(),
                "01/12/2025".to_owned(),
                "1111".to_owned(),
                "1234".to_owned(),
                "budi".to_owned(),
            ],
        ]);
        let engine = AnalysisEngine::new(Arc::new(sheet));

        let analysis = engine.analyze().await;
        assert!(analysis.contains("01/12/2025"));
        let prediction = engine.predict().await;
        assert!(prediction.contains("Prediksi"));
    }
}
