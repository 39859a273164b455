//! Startup configuration.
//!
//! Values are layered, later layers winning:
//! 1. built-in defaults;
//! 2. an optional JSON file (explicit path, else `GOLD_BOT_CONFIG`);
//! 3. environment overrides (`DOLLAR_TO_DINAR`, `GOLD_BASE_PRICE`,
//!    `GOLD_VOLATILITY`);
//! 4. command-line flags, applied by the binaries themselves.
//!
//! The bot credential is kept out of `BotConfig` and read with [`bot_token`].

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::BotError;
use crate::result::Result;
use crate::source::{DEFAULT_BASE_PRICE, DEFAULT_VOLATILITY, SyntheticQuoteSource};

/// Environment variable holding the bot credential.
pub const TOKEN_VAR: &str = "BOT_TOKEN";
/// Environment variable pointing at a JSON config file.
pub const CONFIG_PATH_VAR: &str = "GOLD_BOT_CONFIG";
/// Environment override for the initial exchange rate.
pub const EXCHANGE_RATE_VAR: &str = "DOLLAR_TO_DINAR";
/// Environment override for the synthetic reference price.
pub const BASE_PRICE_VAR: &str = "GOLD_BASE_PRICE";
/// Environment override for the synthetic price volatility.
pub const VOLATILITY_VAR: &str = "GOLD_VOLATILITY";

/// Initial exchange rate, dinar per USD.
pub const DEFAULT_EXCHANGE_RATE: f64 = 1450.0;

/// Tunables read at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Initial exchange rate (dinar per USD).
    pub exchange_rate: f64,
    /// Reference ounce price for the synthetic quote source.
    pub base_price: f64,
    /// Largest random move of the synthetic quote source.
    pub volatility: f64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            base_price: DEFAULT_BASE_PRICE,
            volatility: DEFAULT_VOLATILITY,
        }
    }
}

impl BotConfig {
    /// Build the configuration from the file and the process environment.
    ///
    /// `path` takes precedence over `GOLD_BOT_CONFIG`; without either the
    /// defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| BotError::Config(format!("cannot open {}: {}", path.display(), e)))?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        info!("Config file loaded: {}", path.display());
        Ok(config)
    }

    /// Apply overrides looked up by variable name.
    ///
    /// A present but unparsable value is an error rather than being skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (key, slot) in [
            (EXCHANGE_RATE_VAR, &mut self.exchange_rate),
            (BASE_PRICE_VAR, &mut self.base_price),
            (VOLATILITY_VAR, &mut self.volatility),
        ] {
            if let Some(raw) = lookup(key) {
                *slot = raw
                    .trim()
                    .parse()
                    .map_err(|_| BotError::Config(format!("{key}={raw} is not a number")))?;
            }
        }
        Ok(())
    }

    /// Quote source configured by `base_price` and `volatility`.
    pub fn quote_source(&self) -> SyntheticQuoteSource {
        SyntheticQuoteSource::new(self.base_price, self.volatility)
    }
}

/// Load a `.env` file from the working directory, if there is one.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring malformed .env file: {}", e),
    }
}

/// Read the bot credential from `BOT_TOKEN`.
pub fn bot_token() -> Result<String> {
    token_from(|key| std::env::var(key).ok())
}

fn token_from<F>(lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(TOKEN_VAR)
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(BotError::MissingCredential(TOKEN_VAR))
}
