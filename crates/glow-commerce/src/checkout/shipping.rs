//! Flat shipping rates per province.

use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rate charged when the province is unknown.
pub const DEFAULT_SHIPPING_RATE: Money = Money { amount_cents: 100_00 };

/// South African provinces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Province {
    Gauteng,
    WesternCape,
    KwazuluNatal,
    EasternCape,
    FreeState,
    Limpopo,
    Mpumalanga,
    NorthWest,
    NorthernCape,
}

impl Province {
    pub const ALL: [Province; 9] = [
        Province::Gauteng,
        Province::WesternCape,
        Province::KwazuluNatal,
        Province::EasternCape,
        Province::FreeState,
        Province::Limpopo,
        Province::Mpumalanga,
        Province::NorthWest,
        Province::NorthernCape,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Province::Gauteng => "gauteng",
            Province::WesternCape => "western-cape",
            Province::KwazuluNatal => "kwazulu-natal",
            Province::EasternCape => "eastern-cape",
            Province::FreeState => "free-state",
            Province::Limpopo => "limpopo",
            Province::Mpumalanga => "mpumalanga",
            Province::NorthWest => "north-west",
            Province::NorthernCape => "northern-cape",
        }
    }

    /// Flat shipping rate to this province.
    pub fn shipping_rate(&self) -> Money {
        let rand = match self {
            Province::Gauteng => 50,
            Province::WesternCape => 80,
            Province::KwazuluNatal => 90,
            Province::EasternCape => 95,
            Province::FreeState => 85,
            Province::Limpopo => 100,
            Province::Mpumalanga => 95,
            Province::NorthWest => 90,
            Province::NorthernCape => 110,
        };
        Money::new(rand * 100)
    }
}

impl FromStr for Province {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Province::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// Shipping cost for a province name; unknown names cost the default rate.
pub fn calculate_shipping(province: &str) -> Money {
    province
        .parse::<Province>()
        .map(|p| p.shipping_rate())
        .unwrap_or(DEFAULT_SHIPPING_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_provinces() {
        assert_eq!(calculate_shipping("gauteng").display(), "R50.00");
        assert_eq!(calculate_shipping("Western-Cape").display(), "R80.00");
        assert_eq!(calculate_shipping("northern-cape").display(), "R110.00");
    }

    #[test]
    fn test_unknown_province_uses_default() {
        assert_eq!(calculate_shipping("atlantis"), DEFAULT_SHIPPING_RATE);
        assert_eq!(calculate_shipping(""), DEFAULT_SHIPPING_RATE);
    }

    #[test]
    fn test_every_province_round_trips() {
        for province in Province::ALL {
            assert_eq!(province.as_str().parse::<Province>(), Ok(province));
        }
    }
}
