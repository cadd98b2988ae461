//! Risk scheme: age bands, a fitness-risk label from BMI and lifestyle, and raw income.

use crate::bmi::bmi;
use crate::city::{CityTier, CityTiers};
use crate::record::FeatureRecord;
use crate::scheme::FeatureScheme;
use crate::validate::ValidInput;
use fitclass_domain::constants::{AGE_GROUP, BMI, CITY_TIER, FITNESS_RISK, INCOME_LPA, OCCUPATION};
use fitclass_domain::frame::FeatureRow;
use fitclass_domain::scheme::SchemeKind;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, IntoStaticStr};

pub const OCCUPATIONS: &[&str] =
    &["student", "office_worker", "self_employed", "retired", "athlete", "unemployed"];

pub const COLUMNS: &[&str] = &[BMI, AGE_GROUP, FITNESS_RISK, CITY_TIER, INCOME_LPA, OCCUPATION];

const OBESE_BMI: f64 = 30.0;
const OVERWEIGHT_BMI: f64 = 27.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskAgeGroup {
    /// Under 25
    Young,
    /// 25 to 39
    Adult,
    /// 40 to 59
    MiddleAged,
    /// 60 and over
    Senior,
}

impl RiskAgeGroup {
    #[must_use]
    pub const fn from_age(age: i64) -> Self {
        match age {
            ..25 => Self::Young,
            25..40 => Self::Adult,
            40..60 => Self::MiddleAged,
            _ => Self::Senior,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FitnessRisk {
    HighRisk,
    MediumRisk,
    LowRisk,
}

impl FitnessRisk {
    /// High when inactive with BMI over 30; medium when BMI is over 27 or inactive;
    /// low otherwise.
    #[must_use]
    pub fn assess(bmi: f64, active_lifestyle: bool) -> Self {
        if !active_lifestyle && bmi > OBESE_BMI {
            Self::HighRisk
        } else if bmi > OVERWEIGHT_BMI || !active_lifestyle {
            Self::MediumRisk
        } else {
            Self::LowRisk
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFeatures {
    pub bmi: f64,
    pub age_group: RiskAgeGroup,
    pub fitness_risk: FitnessRisk,
    pub city_tier: CityTier,
    pub income_lpa: f64,
    pub occupation: String,
}

impl RiskFeatures {
    #[must_use]
    pub fn to_row(&self) -> FeatureRow {
        FeatureRow::new()
            .with(BMI, self.bmi)
            .with(AGE_GROUP, self.age_group.as_ref())
            .with(FITNESS_RISK, self.fitness_risk.as_ref())
            .with(CITY_TIER, self.city_tier.as_u8())
            .with(INCOME_LPA, self.income_lpa)
            .with(OCCUPATION, self.occupation.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RiskScheme {
    tiers: CityTiers,
}

impl RiskScheme {
    #[must_use]
    pub const fn new(tiers: CityTiers) -> Self {
        Self { tiers }
    }
}

impl Default for RiskScheme {
    fn default() -> Self {
        Self::new(CityTiers::risk_defaults())
    }
}

impl FeatureScheme for RiskScheme {
    fn kind(&self) -> SchemeKind {
        SchemeKind::Risk
    }

    fn occupations(&self) -> &'static [&'static str] {
        OCCUPATIONS
    }

    fn columns(&self) -> &'static [&'static str] {
        COLUMNS
    }

    fn requires_lifestyle(&self) -> bool {
        true
    }

    fn city_tiers(&self) -> &CityTiers {
        &self.tiers
    }

    fn derive(&self, input: &ValidInput<'_>) -> FeatureRecord {
        let bmi = bmi(input.weight(), input.height());
        FeatureRecord::Risk(RiskFeatures {
            bmi,
            age_group: RiskAgeGroup::from_age(input.age()),
            fitness_risk: FitnessRisk::assess(bmi, input.active_lifestyle()),
            city_tier: self.tiers.tier(input.city()),
            income_lpa: input.income_lpa(),
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
        assert_eq!(RiskAgeGroup::from_age(1), RiskAgeGroup::Young);
        assert_eq!(RiskAgeGroup::from_age(24), RiskAgeGroup::Young);
        assert_eq!(RiskAgeGroup::from_age(25), RiskAgeGroup::Adult);
        assert_eq!(RiskAgeGroup::from_age(39), RiskAgeGroup::Adult);
        assert_eq!(RiskAgeGroup::from_age(40), RiskAgeGroup::MiddleAged);
        assert_eq!(RiskAgeGroup::from_age(59), RiskAgeGroup::MiddleAged);
        assert_eq!(RiskAgeGroup::from_age(60), RiskAgeGroup::Senior);
        assert_eq!(RiskAgeGroup::from_age(99), RiskAgeGroup::Senior);
    }

    #[test]
    fn risk_levels() {
        assert_eq!(FitnessRisk::assess(32.65, false), FitnessRisk::HighRisk);
        assert_eq!(FitnessRisk::assess(30.0, false), FitnessRisk::MediumRisk);
        assert_eq!(FitnessRisk::assess(32.65, true), FitnessRisk::MediumRisk);
        assert_eq!(FitnessRisk::assess(27.0, true), FitnessRisk::LowRisk);
        assert_eq!(FitnessRisk::assess(27.01, true), FitnessRisk::MediumRisk);
        assert_eq!(FitnessRisk::assess(18.0, false), FitnessRisk::MediumRisk);
    }

    #[test]
    fn labels_are_snake_case() {
        assert_eq!(RiskAgeGroup::MiddleAged.as_ref(), "middle_aged");
        assert_eq!(FitnessRisk::HighRisk.to_string(), "high_risk");
    }

    #[test]
    fn every_age_band_is_reachable() {
        let reached: Vec<_> = (1..100).map(RiskAgeGroup::from_age).collect();
        for group in RiskAgeGroup::iter() {
            assert!(reached.contains(&group), "{group} is unreachable");
        }
    }
}
