use fitclass_domain::config::CityTierConfig;
use fxhash::FxHashMap;
use serde::Serialize;
use std::fmt;

const RISK_TIER_1: &[&str] =
    &["New York", "Los Angeles", "Chicago", "Houston", "Miami", "San Francisco", "Dallas"];

const RISK_TIER_2: &[&str] = &[
    "Seattle", "Boston", "Denver", "Atlanta", "San Diego", "Phoenix", "Austin", "Portland",
    "Tampa", "Minneapolis", "Detroit", "Charlotte", "Las Vegas", "Philadelphia", "Nashville",
    "Kansas City", "Indianapolis", "Cleveland", "Baltimore", "Orlando",
];

const INCOME_TIER_1: &[&str] = &[
    "New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "San Antonio", "San Diego",
    "Dallas", "San Francisco", "Seattle", "Boston", "Miami",
];

const INCOME_TIER_2: &[&str] = &[
    "Denver", "Atlanta", "Portland", "Austin", "Tampa", "Minneapolis", "Detroit", "Charlotte",
    "Las Vegas", "Philadelphia", "Nashville", "Kansas City", "Indianapolis", "Cleveland",
    "Baltimore", "Orlando",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum CityTier {
    One = 1,
    Two = 2,
    Three = 3,
}

impl CityTier {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<CityTier> for u8 {
    fn from(tier: CityTier) -> Self {
        tier.as_u8()
    }
}

impl fmt::Display for CityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Tier lookup over two city lists. Matching is exact and case-sensitive; a city on both
/// lists is tier 1; anything unlisted is tier 3.
#[derive(Debug, Clone)]
pub struct CityTiers {
    tier_1: Vec<String>,
    tier_2: Vec<String>,
    index: FxHashMap<String, CityTier>,
}

impl CityTiers {
    pub fn new<I, J, S>(tier_1: I, tier_2: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tier_1: Vec<String> = tier_1.into_iter().map(Into::into).collect();
        let tier_2: Vec<String> = tier_2.into_iter().map(Into::into).collect();

        let mut index = FxHashMap::default();
        for city in &tier_2 {
            index.insert(city.clone(), CityTier::Two);
        }
        for city in &tier_1 {
            index.insert(city.clone(), CityTier::One);
        }

        Self { tier_1, tier_2, index }
    }

    #[must_use]
    pub fn risk_defaults() -> Self {
        Self::new(RISK_TIER_1.iter().copied(), RISK_TIER_2.iter().copied())
    }

    #[must_use]
    pub fn income_defaults() -> Self {
        Self::new(INCOME_TIER_1.iter().copied(), INCOME_TIER_2.iter().copied())
    }

    #[must_use]
    pub fn tier(&self, city: &str) -> CityTier {
        self.index.get(city).copied().unwrap_or(CityTier::Three)
    }

    #[must_use]
    pub fn tier_1(&self) -> &[String] {
        &self.tier_1
    }

    #[must_use]
    pub fn tier_2(&self) -> &[String] {
        &self.tier_2
    }
}

impl From<&CityTierConfig> for CityTiers {
    fn from(config: &CityTierConfig) -> Self {
        Self::new(config.tier_1.iter().cloned(), config.tier_2.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let tiers = CityTiers::risk_defaults();
        assert_eq!(tiers.tier("Houston"), CityTier::One);
        assert_eq!(tiers.tier("Seattle"), CityTier::Two);
        assert_eq!(tiers.tier("houston"), CityTier::Three);
        assert_eq!(tiers.tier(" Houston"), CityTier::Three);
        assert_eq!(tiers.tier("Springfield"), CityTier::Three);
    }

    #[test]
    fn default_lists_differ_per_scheme() {
        assert_eq!(CityTiers::risk_defaults().tier("Seattle"), CityTier::Two);
        assert_eq!(CityTiers::income_defaults().tier("Seattle"), CityTier::One);
        assert_eq!(CityTiers::income_defaults().tier("San Antonio"), CityTier::One);
        assert_eq!(CityTiers::risk_defaults().tier("San Antonio"), CityTier::Three);
    }

    #[test]
    fn tier_one_wins_over_tier_two() {
        let tiers = CityTiers::new(["Austin"], ["Austin", "Tampa"]);
        assert_eq!(tiers.tier("Austin"), CityTier::One);
        assert_eq!(tiers.tier("Tampa"), CityTier::Two);
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_string(&CityTier::Two).ok().as_deref(), Some("2"));
    }
}
