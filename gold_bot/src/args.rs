//! Command-line arguments for the Telegram bot.
use std::path::PathBuf;

use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// JSON config file with `exchange_rate`, `base_price` and `volatility`.
    /// Falls back to `GOLD_BOT_CONFIG` when omitted.
    #[clap(long)]
    pub config: Option<PathBuf>,
}
