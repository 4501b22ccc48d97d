//! Configuration module for the bots.
//!
//! Handles loading of the Telegram token and Google Sheets settings
//! from the environment.

mod settings;

pub use settings::{BotSettings, ConfigError, SheetsConfig};

/// Environment files the supervisor looks for before launching bots.
pub const ENV_FILE_CANDIDATES: [&str; 3] = [".env", "bot1/.env", "bot2/.env"];
