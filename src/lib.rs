//! Togel Bots Library
//!
//! Two Telegram bots sharing one Google Sheet of 4-digit draw records,
//! plus a supervisor that runs them side by side.
//!
//! This crate provides the core functionality for:
//! - Collecting records through a guided form or one-line direct input
//! - Storing and reading records in Google Sheets
//! - Frequency analysis and heuristic predictions over stored draws
//! - Launching, watching and stopping both bots as child processes

pub mod analysis;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod record;
pub mod sheets;
pub mod supervisor;
pub mod telegram;

use tracing_subscriber::EnvFilter;

/// Initializes the logging subsystem. `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
