//! Karat purity tiers and mass constants.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Grams in one troy ounce.
pub const GRAMS_PER_OUNCE: f64 = 31.1035;
/// Grams in one meskal, the unit local prices are quoted in.
pub const MESKAL_GRAMS: f64 = 5.0;

/// Supported purity tiers, ordered from purest to least pure.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
#[strum(ascii_case_insensitive)]
pub enum PurityTier {
    /// Pure gold.
    #[strum(serialize = "24k")]
    K24,
    /// 91.6% gold.
    #[strum(serialize = "22k")]
    K22,
    /// 87.5% gold.
    #[strum(serialize = "21k")]
    K21,
    /// 75% gold.
    #[strum(serialize = "18k")]
    K18,
}

impl PurityTier {
    /// Fraction of pure gold by mass.
    pub fn fraction(self) -> f64 {
        match self {
            PurityTier::K24 => 1.0,
            PurityTier::K22 => 0.916,
            PurityTier::K21 => 0.875,
            PurityTier::K18 => 0.750,
        }
    }

    /// Colored marker shown in front of the tier in the price report.
    pub fn marker(self) -> &'static str {
        match self {
            PurityTier::K24 => "🟡",
            PurityTier::K22 => "🟠",
            PurityTier::K21 => "🔴",
            PurityTier::K18 => "🔵",
        }
    }

    /// Localized tier name used in the price report.
    pub fn local_name(self) -> &'static str {
        match self {
            PurityTier::K24 => "عەیاری ٢٤",
            PurityTier::K22 => "عەیاری ٢٢",
            PurityTier::K21 => "عەیاری ٢١",
            PurityTier::K18 => "عەیاری ١٨",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn tiers_iterate_from_purest() {
        let tiers: Vec<PurityTier> = PurityTier::iter().collect();
        assert_eq!(
            tiers,
            vec![PurityTier::K24, PurityTier::K22, PurityTier::K21, PurityTier::K18]
        );
        assert!(tiers.windows(2).all(|w| w[0].fraction() > w[1].fraction()));
    }

    #[test]
    fn tier_labels_round_trip() {
        assert_eq!(PurityTier::K22.to_string(), "22k");
        assert_eq!("18K".parse::<PurityTier>().unwrap(), PurityTier::K18);
        assert!("14k".parse::<PurityTier>().is_err());
    }
}
