//! Data Input Bot - Entry Point
//!
//! Collects draw records from Telegram users and appends them to the sheet.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use teloxide::Bot;
use tracing::{debug, info};

use togel_bots::config::BotSettings;
use togel_bots::conversation::ConversationEngine;
use togel_bots::init_logging;
use togel_bots::sheets::{GoogleSheet, ensure_header};
use togel_bots::telegram::run_input_bot;

/// Telegram bot for recording draw results.
#[derive(Parser, Debug)]
#[command(name = "input_bot")]
#[command(about = "Collect draw records into Google Sheets")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    let settings =
        BotSettings::from_env().context("Failed to load configuration from environment")?;

    let sheet = GoogleSheet::open(&settings.sheets)
        .await
        .context("Failed to connect to Google Sheets")?;

    ensure_header(&sheet)
        .await
        .context("Failed to prepare sheet header")?;

    info!(
        "Connected to spreadsheet {} (worksheet: {})",
        settings.sheets.spreadsheet_id, settings.sheets.sheet_name
    );

    let engine = Arc::new(ConversationEngine::new(Arc::new(sheet)));

    info!("🤖 Bot Telegram Data Input sedang berjalan...");
    run_input_bot(Bot::new(settings.bot_token), engine).await;

    info!("Shutting down...");
    Ok(())
}
