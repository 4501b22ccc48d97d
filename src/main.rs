//! Bot Manager - Main Entry Point
//!
//! Runs the data-input bot and the analysis bot as child processes,
//! forwards their output and stops both on Ctrl+C or SIGTERM.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info, warn};

use togel_bots::config::ENV_FILE_CANDIDATES;
use togel_bots::init_logging;
use togel_bots::supervisor::{BotManager, LAUNCH_TABLE, shutdown_signal};

/// Supervisor for the Telegram bots.
#[derive(Parser, Debug)]
#[command(name = "bot_manager")]
#[command(about = "Run the data-input and analysis bots together")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Directory holding the bot binaries. Defaults to this executable's directory.
    #[arg(long)]
    bin_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(&args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ Error fatal: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    if !ENV_FILE_CANDIDATES.iter().any(|p| Path::new(p).exists()) {
        warn!("⚠️ Peringatan: File .env tidak ditemukan");
        warn!("   Pastikan TELEGRAM_BOT_TOKEN dan GOOGLE_SPREADSHEET_ID sudah diatur");
    }

    let bin_dir = match args.bin_dir {
        Some(dir) => dir,
        None => default_bin_dir().context("Failed to locate the bot binaries")?,
    };

    let mut manager = BotManager::new(bin_dir);

    let missing = manager.missing_binaries();
    if !missing.is_empty() {
        println!("❌ Bot berikut tidak ditemukan:");
        for path in &missing {
            println!("   - {}", path.display());
        }
        print_expected_layout(manager.bin_dir());
        return Ok(());
    }

    info!("🤖 Bot Manager - Memulai semua bot...");

    let launched = manager.launch().await;
    if let Err(e) = launched {
        manager.stop_all().await;
        manager.join_forwarders().await;
        return Err(e).context("Failed to launch bots");
    }

    info!("✅ Semua bot telah dimulai!");
    info!("📝 Tekan Ctrl+C untuk menghentikan semua bot");

    manager.monitor(shutdown_signal()).await;

    manager.stop_all().await;
    manager.join_forwarders().await;

    info!("🏁 Semua bot telah dihentikan. Selamat tinggal!");
    Ok(())
}

/// Directory of the running executable.
fn default_bin_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to resolve current executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("Executable has no parent directory")
}

fn print_expected_layout(bin_dir: &Path) {
    println!("\n💡 Pastikan struktur folder seperti ini:");
    println!("   {}/", bin_dir.display());
    println!("   ├── bot_manager");
    let last = LAUNCH_TABLE.len() - 1;
    for (i, spec) in LAUNCH_TABLE.iter().enumerate() {
        let branch = if i == last { "└──" } else { "├──" };
        println!("   {} {}", branch, spec.binary);
    }
    println!("\n   Build all three with: cargo build --release");
}
