//! Conversion of an ounce price into local per-meskal tier prices.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::purity::{GRAMS_PER_OUNCE, MESKAL_GRAMS, PurityTier};

/// Local currency price of one meskal for every purity tier, purest first.
pub type TierPrices = BTreeMap<PurityTier, f64>;

/// Price one meskal of every tier in local currency.
///
/// The ounce price is brought down to a gram, scaled by the tier's purity and
/// by the meskal mass, then converted with `exchange_rate`. No input is
/// rejected: a non-positive price gives non-positive tier prices.
pub fn compute_tier_prices(unit_price_usd: f64, exchange_rate: f64) -> TierPrices {
    let gram_price_usd = unit_price_usd / GRAMS_PER_OUNCE;
    PurityTier::iter()
        .map(|tier| {
            let price = gram_price_usd * tier.fraction() * MESKAL_GRAMS * exchange_rate;
            (tier, price)
        })
        .collect()
}
