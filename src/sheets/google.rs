//! Google Sheets v4 REST backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{RecordSheet, ServiceAccountKey, SheetError, SheetsAuth};
use crate::config::SheetsConfig;

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
struct AppendBody<'a> {
    values: [&'a [String]; 1],
}

/// A single worksheet accessed through the Sheets REST API.
pub struct GoogleSheet {
    http: Client,
    auth: SheetsAuth,
    spreadsheet_id: String,
    sheet_name: String,
}

impl GoogleSheet {
    /// Opens the worksheet described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials cannot be loaded or the first
    /// access token cannot be obtained.
    pub async fn open(config: &SheetsConfig) -> Result<Self, SheetError> {
        info!(
            "Opening spreadsheet {} (sheet: {})",
            config.spreadsheet_id, config.sheet_name
        );

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let key = ServiceAccountKey::load_from_file(&config.credentials_file)?;
        let auth = SheetsAuth::new(key, http.clone())?;

        // Bad credentials surface at startup
        auth.access_token().await?;

        Ok(Self {
            http,
            auth,
            spreadsheet_id: config.spreadsheet_id.clone(),
            sheet_name: config.sheet_name.clone(),
        })
    }

    /// A1 range covering the whole worksheet, or a part of it.
    fn range(&self, cells: Option<&str>) -> String {
        let sheet = self.sheet_name.replace('\'', "''");
        match cells {
            Some(cells) => format!("'{sheet}'!{cells}"),
            None => format!("'{sheet}'"),
        }
    }

    fn values_url(&self, range: &str, action: Option<&str>) -> Result<Url, SheetError> {
        let mut url = Url::parse(API_BASE)
            .map_err(|e| SheetError::Unavailable(format!("bad API base URL: {e}")))?;
        let last = match action {
            Some(action) => format!("{range}:{action}"),
            None => range.to_owned(),
        };
        url.path_segments_mut()
            .map_err(|()| SheetError::Unavailable("API base URL cannot be a base".to_owned()))?
            .push(&self.spreadsheet_id)
            .push("values")
            .push(&last);
        Ok(url)
    }

    /// Sends a request with a bearer token, retrying once on 401.
    async fn send(
        &self,
        build: impl Fn(&Client) -> RequestBuilder,
    ) -> Result<reqwest::Response, SheetError> {
        for attempt in 0..2 {
            let token = self.auth.access_token().await?;
            let response = build(&self.http).bearer_auth(token).send().await?;

            if response.status() == StatusCode::UNAUTHORIZED && attempt == 0 {
                warn!("Sheets API rejected access token, refreshing");
                self.auth.invalidate().await;
                continue;
            }

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(SheetError::Api {
                    status: status.as_u16(),
                    body,
                });
            }
            return Ok(response);
        }

        Err(SheetError::Unavailable("access token rejected twice".to_owned()))
    }

    async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetError> {
        let url = self.values_url(range, None)?;
        debug!("GET {}", url);

        let response = self.send(|http| http.get(url.clone())).await?;
        let body: ValueRange = response.json().await?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }
}

#[async_trait]
impl RecordSheet for GoogleSheet {
    async fn header(&self) -> Result<Vec<String>, SheetError> {
        let rows = self.get_values(&self.range(Some("1:1"))).await?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    async fn rows(&self) -> Result<Vec<Vec<String>>, SheetError> {
        self.get_values(&self.range(None)).await
    }

    async fn append_row(&self, row: &[String]) -> Result<(), SheetError> {
        let mut url = self.values_url(&self.range(Some("A1")), Some("append"))?;
        // RAW keeps codes such as "0001" as text instead of numbers
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");
        debug!("Appending row with {} cells", row.len());

        let body = AppendBody { values: [row] };
        self.send(|http| http.post(url.clone()).json(&body)).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SheetError> {
        let url = self.values_url(&self.range(None), Some("clear"))?;
        info!("Clearing sheet {}", self.sheet_name);

        self.send(|http| http.post(url.clone()).json(&serde_json::json!({})))
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for GoogleSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheet")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheet_name", &self.sheet_name)
            .finish_non_exhaustive()
    }
}

/// Formatted cell values are strings, but be lenient with other JSON types.
fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
