//! In-process sheet used for tests and offline runs.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RecordSheet, SheetError};

/// A [`RecordSheet`] backed by a vector of rows.
#[derive(Debug, Default)]
pub struct MemorySheet {
    rows: RwLock<Vec<Vec<String>>>,
    failing: AtomicBool,
    append_calls: AtomicUsize,
}

impl MemorySheet {
    /// Creates an empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sheet pre-filled with rows.
    #[must_use]
    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: RwLock::new(rows),
            ..Self::default()
        }
    }

    /// Makes every subsequent operation fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of append attempts, failed ones included.
    pub fn append_calls(&self) -> usize {
        self.append_calls.load(Ordering::SeqCst)
    }

    /// Copy of every row, header included.
    pub async fn snapshot(&self) -> Vec<Vec<String>> {
        self.rows.read().await.clone()
    }

    fn check(&self) -> Result<(), SheetError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SheetError::Unavailable("memory sheet set to fail".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordSheet for MemorySheet {
    async fn header(&self) -> Result<Vec<String>, SheetError> {
        self.check()?;
        Ok(self.rows.read().await.first().cloned().unwrap_or_default())
    }

    async fn rows(&self) -> Result<Vec<Vec<String>>, SheetError> {
        self.check()?;
        Ok(self.snapshot().await)
    }

    async fn append_row(&self, row: &[String]) -> Result<(), SheetError> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.rows.write().await.push(row.to_vec());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SheetError> {
        self.check()?;
        self.rows.write().await.clear();
        Ok(())
    }
}
