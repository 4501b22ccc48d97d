//! Application settings loaded from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Google Sheets connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Spreadsheet key (the long ID in the sheet URL).
    pub spreadsheet_id: String,

    /// Path to the service-account JSON credentials.
    pub credentials_file: PathBuf,

    /// Worksheet (tab) holding the records.
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
}

fn default_sheet_name() -> String {
    "Sheet1".to_owned()
}

impl SheetsConfig {
    /// Creates configuration from environment variables.
    ///
    /// Expects `GOOGLE_SPREADSHEET_ID` and `GOOGLE_CREDENTIALS_FILE` to be set;
    /// `SHEET_NAME` is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let spreadsheet_id = required_env("GOOGLE_SPREADSHEET_ID")?;
        let credentials_file = PathBuf::from(required_env("GOOGLE_CREDENTIALS_FILE")?);
        let sheet_name = std::env::var("SHEET_NAME")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(default_sheet_name);

        Ok(Self {
            spreadsheet_id,
            credentials_file,
            sheet_name,
        })
    }
}

/// Settings shared by both bots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    /// Telegram Bot API token from `@BotFather`.
    pub bot_token: String,

    /// Spreadsheet backing the bot.
    pub sheets: SheetsConfig,
}

impl BotSettings {
    /// Creates bot settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the token or any sheets variable is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bot_token: required_env("TELEGRAM_BOT_TOKEN")?,
            sheets: SheetsConfig::from_env()?,
        })
    }
}

fn required_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_owned()),
        Ok(_) => Err(ConfigError::EmptyEnvVar(name)),
        Err(_) => Err(ConfigError::MissingEnvVar(name)),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Environment variable {0} is set but empty")]
    EmptyEnvVar(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_name_default_on_deserialize() {
        let json = r#"{"spreadsheet_id":"id","credentials_file":"c.json"}"#;
        let config: SheetsConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.sheet_name, "Sheet1");
    }

    #[test]
    fn test_bot_settings_hold_token_and_sheet_only() {
        let json = r#"{"bot_token":"123:abc","sheets":{"spreadsheet_id":"id","credentials_file":"c.json"}}"#;
        let settings: BotSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.bot_token, "123:abc");
        assert_eq!(settings.sheets.credentials_file, PathBuf::from("c.json"));
        assert_eq!(settings.sheets.sheet_name, "Sheet1");
    }

    #[test]
    fn test_required_env_missing() {
        let err = required_env("TOGEL_BOTS_SURELY_UNSET_VARIABLE").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }
}
