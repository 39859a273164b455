//! Gold Console — talks to the gold price bot logic from a terminal.
//!
//! Every line typed on stdin is routed exactly like a chat message would be
//! (`/price`, `/setdollar 1480`, "gold price?" ...) and the reply is printed to
//! stdout. No credential or network access is needed.
//!
//! Usage example (CLI):
//! ```bash
//! gold_console --rate 1480 --name Aram
//! gold_console --fixed-price 1555.175 < messages.txt
//! ```
#![warn(missing_docs)]
mod args;

use std::io::{self, BufRead, Write};
use std::thread;

use clap::Parser;
use crossbeam_channel::{Receiver, bounded, select, unbounded};
use gold_common::config::{self, BotConfig};
use gold_common::source::{FixedQuoteSource, QuoteSource};
use gold_common::{AppState, BotError, Caller, CommandRouter, Result};
use log::{debug, error, info};

use crate::args::Args;

/// Reads stdin on a background thread and forwards each line.
///
/// The channel closes when stdin reaches end of file or fails.
fn spawn_stdin_reader() -> Receiver<String> {
    let (line_tx, line_rx) = unbounded::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        debug!("Stdin reader stopping...");
    });
    line_rx
}

/// Route lines from `lines` until they run out or `shutdown` fires,
/// writing every reply to `out`.
fn run_console<W: Write>(
    router: &CommandRouter,
    caller: &Caller,
    lines: Receiver<String>,
    shutdown: Receiver<()>,
    out: &mut W,
) -> Result<(), BotError> {
    loop {
        select! {
            recv(shutdown) -> _ => break,
            recv(lines) -> msg => match msg {
                Ok(line) => {
                    if let Some(reply) = router.handle(caller, &line) {
                        writeln!(out, "{}\n", reply.text.trim())?;
                        out.flush()?;
                    }
                }
                Err(_) => break,
            }
        }
    }
    info!("Console loop stopping...");
    Ok(())
}

fn main() -> Result<(), BotError> {
    init_logger();
    config::load_dotenv();
    let args = Args::parse();

    let mut config = BotConfig::load(args.config.as_deref())?;
    if let Some(rate) = args.rate {
        config.exchange_rate = rate;
    }
    if let Some(volatility) = args.volatility {
        config.volatility = volatility;
    }

    let source: Box<dyn QuoteSource> = match args.fixed_price {
        Some(price) => Box::new(FixedQuoteSource::new(price, 0.0)),
        None => Box::new(config.quote_source()),
    };
    let router = CommandRouter::new(AppState::new(config.exchange_rate), source);
    let caller = Caller::new(args.user_id, Some(args.name));

    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down console...");
        let _ = shutdown_tx.try_send(());
    })
    .map_err(|e| BotError::Transport(format!("Error setting Ctrl+C handler: {}", e)))?;

    info!("Console is running. Type /start for the command list, Ctrl+C to exit.");
    let lines = spawn_stdin_reader();
    run_console(&router, &caller, lines, shutdown_rx, &mut io::stdout().lock())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> CommandRouter {
        CommandRouter::new(
            AppState::new(1450.0),
            Box::new(FixedQuoteSource::new(1555.175, 0.0)),
        )
    }

    fn feed(lines: &[&str]) -> Receiver<String> {
        let (tx, rx) = unbounded();
        for line in lines {
            tx.send(line.to_string()).unwrap();
        }
        rx
    }

    #[test]
    fn replies_are_written_until_input_ends() {
        let router = router();
        let caller = Caller::new(1, Some("console".to_string()));
        let (_shutdown_tx, shutdown_rx) = bounded::<()>(1);
        let mut out = Vec::new();

        run_console(
            &router,
            &caller,
            feed(&["/setdollar 1500", "/price", "/nope", "hello"]),
            shutdown_rx,
            &mut out,
        )
        .unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("1,500 دینار"));
        assert!(output.contains("375,000 دینار"));
        assert!(output.contains(gold_common::report::HINT));
        assert_eq!(router.exchange_rate().unwrap(), 1500.0);
    }

    #[test]
    fn shutdown_stops_the_loop() {
        let router = router();
        let caller = Caller::new(1, None);
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
        shutdown_tx.send(()).unwrap();
        // lines stay open, so only the shutdown signal can end the loop
        let (_line_tx, lines) = unbounded::<String>();
        let mut out = Vec::new();

        run_console(&router, &caller, lines, shutdown_rx, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
