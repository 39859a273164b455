//!
//! Domain logic shared by the Telegram bot and the local console.
//!
//! This crate aggregates:
//! - `error` — unified error type `BotError` used across the workspace.
//! - `result` — handy `Result<T, BotError>` alias.
//! - `quote` — a single gold price observation.
//! - `source` — where quotes come from (`QuoteSource` and its implementations).
//! - `purity` — karat tiers and the mass constants used to price them.
//! - `calculator` — conversion of an ounce price into per-meskal tier prices.
//! - `report` — user-facing message templates.
//! - `subscription` — in-memory registry of subscribed users.
//! - `command` — parsing of inbound chat commands.
//! - `state` — mutable application state shared by all handlers.
//! - `router` — maps an inbound message to a reply.
//! - `config` — startup configuration and the bot credential.
#![warn(missing_docs)]
pub mod calculator;
pub mod command;
pub mod config;
pub mod error;
pub mod purity;
pub mod quote;
pub mod report;
pub mod result;
pub mod router;
pub mod source;
pub mod state;
pub mod subscription;

pub use error::BotError;
pub use result::Result;
pub use quote::Quote;
pub use router::{Caller, CommandRouter, Reply, ReplyFormat};
pub use state::AppState;
