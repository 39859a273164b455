//! Error types shared between the bot and the console.
//!
//! The `BotError` enum unifies the failure cases of quote fetching, argument
//! parsing, configuration loading and the transports, so every crate in the
//! workspace propagates a single error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the bot and the console.
#[derive(Error, Debug)]
pub enum BotError {
    /// The quote source could not produce a price.
    #[error("Quote fetch failed: {0}")]
    QuoteFetch(String),

    /// The `/setdollar` argument did not parse as a number.
    #[error("Invalid exchange rate: {0}")]
    InvalidExchangeRate(String),

    /// A command was sent without its required argument.
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// The bot credential is absent from the environment.
    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// Configuration value could not be used.
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error originating from the standard library (config file, stdin).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while decoding the JSON config file.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),

    /// The chat transport failed to start or to deliver.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl<T> From<PoisonError<T>> for BotError {
    fn from(err: PoisonError<T>) -> Self {
        BotError::MutexLock(err.to_string())
    }
}
