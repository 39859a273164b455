//! Gold price Telegram bot.
//!
//! Answers `/price` and gold/price keywords with a synthetic gold quote
//! converted into per-meskal dinar prices for the 24k, 22k, 21k and 18k tiers.
//! It wires together:
//!
//! - `BotConfig` — initial exchange rate and synthetic source tunables, from
//!   defaults, an optional JSON file and the environment.
//! - `CommandRouter` — owns the exchange rate, the subscriber set and the
//!   quote source, and turns every message into a reply.
//! - `telegram` — long-polling transport built on `teloxide`.
//!
//! The `BOT_TOKEN` environment variable is required; without it the bot logs
//! an error and exits before polling starts.
#![warn(missing_docs)]
use std::sync::Arc;

use clap::Parser;
use gold_common::config::{self, BotConfig};
use gold_common::{AppState, BotError, CommandRouter, Result};
use log::{error, info};
use teloxide::Bot;

use crate::args::Args;

mod args;
mod telegram;

#[tokio::main]
async fn main() -> Result<(), BotError> {
    init_logger();
    config::load_dotenv();
    let args = Args::parse();

    let token = match config::bot_token() {
        Ok(token) => token,
        Err(e) => {
            error!("❌ Bot token not found: {}", e);
            return Err(e);
        }
    };

    let config = BotConfig::load(args.config.as_deref())?;
    info!(
        "🤖 Gold price bot starting (rate {}, base price {}, volatility {})",
        config.exchange_rate, config.base_price, config.volatility
    );

    let bot = Bot::new(token);
    let mut router = CommandRouter::new(
        AppState::new(config.exchange_rate),
        Box::new(config.quote_source()),
    );
    if let Some(username) = telegram::bot_username(&bot).await {
        info!("Answering commands addressed to @{}", username);
        router = router.with_bot_name(username);
    }

    telegram::run(bot, Arc::new(router)).await;
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
