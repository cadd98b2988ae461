//! Income scheme: age bands and an income bracket; lifestyle is not an input.

use crate::bmi::bmi;
use crate::city::{CityTier, CityTiers};
use crate::record::FeatureRecord;
use crate::scheme::FeatureScheme;
use crate::validate::ValidInput;
use fitclass_domain::constants::{AGE_GROUP, BMI, CITY_TIER, INCOME_CATEGORY, OCCUPATION};
use fitclass_domain::frame::FeatureRow;
use fitclass_domain::scheme::SchemeKind;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, IntoStaticStr};

pub const OCCUPATIONS: &[&str] = &[
    "student",
    "software_engineer",
    "teacher",
    "freelancer",
    "business_owner",
    "entrepreneur",
    "private_job",
    "government_job",
    "manager",
    "unemployed",
    "retired",
];

pub const COLUMNS: &[&str] = &[BMI, AGE_GROUP, INCOME_CATEGORY, CITY_TIER, OCCUPATION];

const MEDIUM_INCOME: f64 = 10.0;
const HIGH_INCOME: f64 = 30.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IncomeAgeGroup {
    /// Under 18
    Teen,
    /// 18 to 29
    YoungAdult,
    /// 30 to 49
    Adult,
    /// 50 and over
    Senior,
}

impl IncomeAgeGroup {
    #[must_use]
    pub const fn from_age(age: i64) -> Self {
        match age {
            ..18 => Self::Teen,
            18..30 => Self::YoungAdult,
            30..50 => Self::Adult,
            _ => Self::Senior,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IncomeCategory {
    /// Below 10 LPA
    Low,
    /// 10 up to 30 LPA
    Medium,
    /// 30 LPA and above
    High,
}

impl IncomeCategory {
    #[must_use]
    pub fn from_income(income_lpa: f64) -> Self {
        if income_lpa < MEDIUM_INCOME {
            Self::Low
        } else if income_lpa < HIGH_INCOME {
            Self::Medium
        } else {
            Self::High
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeFeatures {
    pub bmi: f64,
    pub age_group: IncomeAgeGroup,
    pub income_category: IncomeCategory,
    pub city_tier: CityTier,
    pub occupation: String,
}

impl IncomeFeatures {
    #[must_use]
    pub fn to_row(&self) -> FeatureRow {
        FeatureRow::new()
            .with(BMI, self.bmi)
            .with(AGE_GROUP, self.age_group.as_ref())
            .with(INCOME_CATEGORY, self.income_category.as_ref())
            .with(CITY_TIER, self.city_tier.as_u8())
            .with(OCCUPATION, self.occupation.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct IncomeScheme {
    tiers: CityTiers,
}

impl IncomeScheme {
    #[must_use]
    pub const fn new(tiers: CityTiers) -> Self {
        Self { tiers }
    }
}

impl Default for IncomeScheme {
    fn default() -> Self {
        Self::new(CityTiers::income_defaults())
    }
}

impl FeatureScheme for IncomeScheme {
    fn kind(&self) -> SchemeKind {
        SchemeKind::Income
    }

    fn occupations(&self) -> &'static [&'static str] {
        OCCUPATIONS
    }

    fn columns(&self) -> &'static [&'static str] {
        COLUMNS
    }

    fn requires_lifestyle(&self) -> bool {
        false
    }

    fn city_tiers(&self) -> &CityTiers {
        &self.tiers
    }

    fn derive(&self, input: &ValidInput<'_>) -> FeatureRecord {
        FeatureRecord::Income(IncomeFeatures {
            bmi: bmi(input.weight(), input.height()),
            age_group: IncomeAgeGroup::from_age(input.age()),
            income_category: IncomeCategory::from_income(input.income_lpa()),
            city_tier: self.tiers.tier(input.city()),
            occupation: input.occupation().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn age_bands_are_lower_closed() {
        assert_eq!(IncomeAgeGroup::from_age(17), IncomeAgeGroup::Teen);
        assert_eq!(IncomeAgeGroup::from_age(18), IncomeAgeGroup::YoungAdult);
        assert_eq!(IncomeAgeGroup::from_age(29), IncomeAgeGroup::YoungAdult);
        assert_eq!(IncomeAgeGroup::from_age(30), IncomeAgeGroup::Adult);
        assert_eq!(IncomeAgeGroup::from_age(49), IncomeAgeGroup::Adult);
        assert_eq!(IncomeAgeGroup::from_age(50), IncomeAgeGroup::Senior);
    }

    #[test]
    fn income_brackets() {
        assert_eq!(IncomeCategory::from_income(9.99), IncomeCategory::Low);
        assert_eq!(IncomeCategory::from_income(10.0), IncomeCategory::Medium);
        assert_eq!(IncomeCategory::from_income(29.99), IncomeCategory::Medium);
        assert_eq!(IncomeCategory::from_income(30.0), IncomeCategory::High);
    }

    #[test]
    fn labels_are_snake_case() {
        assert_eq!(IncomeAgeGroup::YoungAdult.as_ref(), "young_adult");
        assert_eq!(IncomeCategory::Medium.to_string(), "medium");
    }

    #[test]
    fn every_age_band_is_reachable() {
        let reached: Vec<_> = (1..100).map(IncomeAgeGroup::from_age).collect();
        for group in IncomeAgeGroup::iter() {
            assert!(reached.contains(&group), "{group} is unreachable");
        }
    }
}
