//! Command-line arguments for the console.
//!
//! Flags override the values loaded from the config file and environment.
use std::path::PathBuf;

use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// JSON config file. Falls back to `GOLD_BOT_CONFIG` when omitted.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Initial exchange rate in dinar per USD.
    #[clap(long)]
    pub rate: Option<f64>,

    /// Largest random move of the synthetic price, in USD.
    #[clap(long)]
    pub volatility: Option<f64>,

    /// Answer every price request with this ounce price instead of a random one.
    #[clap(long)]
    pub fixed_price: Option<f64>,

    /// User id the messages are sent as.
    #[clap(long, default_value_t = 1)]
    pub user_id: i64,

    /// First name used in the `/start` greeting.
    #[clap(long, default_value = "console")]
    pub name: String,
}
