//! Spreadsheet storage for draw records.
//!
//! The sheet is an append-only grid whose first row is a fixed header.
//! Bots only ever read every row or append one row; nothing is updated in
//! place.

mod auth;
mod google;
mod memory;
mod token_cache;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::record::{RecordRow, SHEET_HEADER};

pub use auth::{AuthError, ServiceAccountKey, SheetsAuth};
pub use google::GoogleSheet;
pub use memory::MemorySheet;
pub use token_cache::TokenCache;

/// Errors from the spreadsheet backend.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Spreadsheet backend unavailable: {0}")]
    Unavailable(String),
}

/// Row-level access to the records worksheet.
#[async_trait]
pub trait RecordSheet: Send + Sync {
    /// Returns the cells of the first row (empty if the sheet is empty).
    async fn header(&self) -> Result<Vec<String>, SheetError>;

    /// Returns every row, header included.
    async fn rows(&self) -> Result<Vec<Vec<String>>, SheetError>;

    /// Appends a single row after the last one.
    async fn append_row(&self, row: &[String]) -> Result<(), SheetError>;

    /// Removes every cell from the worksheet.
    async fn clear(&self) -> Result<(), SheetError>;
}

/// Makes sure the first row is exactly [`SHEET_HEADER`].
///
/// A missing or mismatched header clears the sheet and writes a fresh one.
/// If the header cannot be read at all, a header row is appended.
pub async fn ensure_header(sheet: &dyn RecordSheet) -> Result<(), SheetError> {
    let expected = header_row();

    match sheet.header().await {
        Ok(current) if current == expected => Ok(()),
        Ok(current) => {
            if current.is_empty() {
                info!("Sheet has no header, writing one");
            } else {
                warn!("Sheet header mismatch ({:?}), resetting sheet", current);
            }
            sheet.clear().await?;
            sheet.append_row(&expected).await
        }
        Err(e) => {
            warn!("Header check failed, creating new: {}", e);
            sheet.append_row(&expected).await
        }
    }
}

/// Reads every data row, using the first row as column keys.
pub async fn read_records(sheet: &dyn RecordSheet) -> Result<Vec<RecordRow>, SheetError> {
    let mut rows = sheet.rows().await?.into_iter();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    Ok(rows
        .filter(|cells| cells.iter().any(|c| !c.trim().is_empty()))
        .map(|cells| RecordRow::from_cells(&header, &cells))
        .collect())
}

/// Returns [`SHEET_HEADER`] as owned cells.
#[must_use]
pub fn header_row() -> Vec<String> {
    SHEET_HEADER.iter().map(|h| (*h).to_owned()).collect()
}
