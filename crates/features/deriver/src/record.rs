use crate::city::CityTier;
use crate::income::IncomeFeatures;
use crate::risk::RiskFeatures;
use fitclass_domain::constants::{FITNESS_RISK, INCOME_CATEGORY};
use fitclass_domain::frame::FeatureRow;
use fitclass_domain::scheme::SchemeKind;
use serde::Serialize;

/// Derived features for one request, shaped by the scheme that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureRecord {
    Risk(RiskFeatures),
    Income(IncomeFeatures),
}

impl FeatureRecord {
    #[must_use]
    pub const fn kind(&self) -> SchemeKind {
        match self {
            Self::Risk(_) => SchemeKind::Risk,
            Self::Income(_) => SchemeKind::Income,
        }
    }

    /// The row handed to a classifier, columns in scheme order.
    #[must_use]
    pub fn to_row(&self) -> FeatureRow {
        match self {
            Self::Risk(features) => features.to_row(),
            Self::Income(features) => features.to_row(),
        }
    }

    #[must_use]
    pub const fn bmi(&self) -> f64 {
        match self {
            Self::Risk(features) => features.bmi,
            Self::Income(features) => features.bmi,
        }
    }

    #[must_use]
    pub fn age_group(&self) -> &'static str {
        match self {
            Self::Risk(features) => features.age_group.into(),
            Self::Income(features) => features.age_group.into(),
        }
    }

    #[must_use]
    pub const fn city_tier(&self) -> CityTier {
        match self {
            Self::Risk(features) => features.city_tier,
            Self::Income(features) => features.city_tier,
        }
    }

    /// The scheme-specific category column: `(name, value)`.
    #[must_use]
    pub fn category(&self) -> (&'static str, &'static str) {
        match self {
            Self::Risk(features) => (FITNESS_RISK, features.fitness_risk.into()),
            Self::Income(features) => (INCOME_CATEGORY, features.income_category.into()),
        }
    }
}
