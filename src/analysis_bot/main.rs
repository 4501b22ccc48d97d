//! Togel Analysis Bot - Entry Point
//!
//! Answers statistics and prediction commands over the stored draws.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use teloxide::Bot;
use tracing::{debug, info};

use togel_bots::analysis::AnalysisEngine;
use togel_bots::config::BotSettings;
use togel_bots::init_logging;
use togel_bots::sheets::GoogleSheet;
use togel_bots::telegram::run_analysis_bot;

/// Telegram bot for draw statistics.
#[derive(Parser, Debug)]
#[command(name = "analysis_bot")]
#[command(about = "Analyse draw records stored in Google Sheets")]
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

    let engine = Arc::new(AnalysisEngine::new(Arc::new(sheet)));

    info!("🤖 Bot Analisis Togel sedang berjalan...");
    run_analysis_bot(Bot::new(settings.bot_token), engine).await;

    info!("Shutting down...");
    Ok(())
}
