//! Gold price quote.
//!
//! A `Quote` is a single observation of the ounce price in USD together with
//! its change from the previous value. It is produced fresh for every request
//! and never stored.

use serde::{Deserialize, Serialize};

/// A single gold price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Price of one troy ounce in USD.
    pub unit_price_usd: f64,
    /// Change from the prior value in USD.
    pub change_usd: f64,
    /// `false` when the source failed; the numeric fields are then meaningless.
    pub ok: bool,
}

impl Quote {
    /// Successful quote.
    pub fn new(unit_price_usd: f64, change_usd: f64) -> Self {
        Quote {
            unit_price_usd,
            change_usd,
            ok: true,
        }
    }

    /// Quote returned when the source could not produce a price.
    pub fn failed() -> Self {
        Quote {
            unit_price_usd: 0.0,
            change_usd: 0.0,
            ok: false,
        }
    }
}

/// Round to two decimals. Negative zero is folded into `0.0`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_quote_is_not_ok() {
        let quote = Quote::failed();
        assert!(!quote.ok);
        assert_eq!(quote.unit_price_usd, 0.0);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(1950.756), 1950.76);
        assert_eq!(round2(-12.344), -12.34);
        assert_eq!(round2(3.0), 3.0);
    }

    #[test]
    fn round2_drops_negative_zero() {
        let rounded = round2(-0.001);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_positive());
    }
}
