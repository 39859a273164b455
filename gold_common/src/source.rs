//! Quote sources.
//!
//! `QuoteSource` is the capability the router asks for a fresh `Quote`. Two
//! implementations exist:
//!
//! - `SyntheticQuoteSource` — perturbs a reference price with a uniformly
//!   distributed random delta. Placeholder for a real market feed.
//! - `FixedQuoteSource` — always returns the same price; used where the
//!   output has to be reproducible.
//!
//! Sources never fail loudly: a failure is logged and reported as
//! `Quote::failed()`, which the report layer turns into a fixed message.

use log::error;
use rand::distr::{Distribution, Uniform};

use crate::error::BotError;
use crate::quote::{Quote, round2};
use crate::result::Result;

/// Reference ounce price the synthetic source moves around.
pub const DEFAULT_BASE_PRICE: f64 = 1950.75;
/// Largest absolute move of the synthetic source, in USD.
pub const DEFAULT_VOLATILITY: f64 = 20.0;

/// Something that can produce a gold price quote on demand.
pub trait QuoteSource: Send + Sync {
    /// Produce a quote. Failures are reported through `Quote::ok`.
    fn fetch_quote(&self) -> Quote;
}

/// Random quote around a fixed reference price.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticQuoteSource {
    base_price: f64,
    volatility: f64,
}

impl SyntheticQuoteSource {
    /// Create a source moving within `base_price ± volatility`.
    pub fn new(base_price: f64, volatility: f64) -> Self {
        Self {
            base_price,
            volatility,
        }
    }

    /// Draw a change from `[-volatility, +volatility]`.
    ///
    /// Fails when the range cannot form a distribution, e.g. a negative or
    /// non-finite volatility.
    fn sample_change(&self) -> Result<f64> {
        let range = Uniform::new_inclusive(-self.volatility, self.volatility)
            .map_err(|e| BotError::QuoteFetch(e.to_string()))?;
        Ok(range.sample(&mut rand::rng()))
    }
}

impl Default for SyntheticQuoteSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_PRICE, DEFAULT_VOLATILITY)
    }
}

impl QuoteSource for SyntheticQuoteSource {
    fn fetch_quote(&self) -> Quote {
        match self.sample_change() {
            Ok(change) => Quote::new(round2(self.base_price + change), round2(change)),
            Err(e) => {
                error!("Failed to fetch gold price: {}", e);
                Quote::failed()
            }
        }
    }
}

/// Source that always answers with the same price and change.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedQuoteSource {
    unit_price_usd: f64,
    change_usd: f64,
}

impl FixedQuoteSource {
    /// Create a source answering with `unit_price_usd` and `change_usd`.
    pub fn new(unit_price_usd: f64, change_usd: f64) -> Self {
        Self {
            unit_price_usd,
            change_usd,
        }
    }
}

impl QuoteSource for FixedQuoteSource {
    fn fetch_quote(&self) -> Quote {
        Quote::new(self.unit_price_usd, self.change_usd)
    }
}
