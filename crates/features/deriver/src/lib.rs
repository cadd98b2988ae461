//! # Feature Deriver
//!
//! Deterministic transformation from a caller's raw attributes to the exact feature row a
//! membership classifier consumes.
//!
//! Two schemes implement [`FeatureScheme`]; a deployment runs exactly one of them:
//!
//! * [`RiskScheme`]: `bmi, age_group, fitness_risk, city_tier, income_lpa, occupation`
//! * [`IncomeScheme`]: `bmi, age_group, income_category, city_tier, occupation`
//!
//! Validation and derivation are split so that derivation cannot fail: [`FeatureScheme::derive`]
//! only accepts a [`ValidInput`], and only [`FeatureScheme::validate`] produces one.
//!
//! ```rust
//! use fitclass_deriver::{FeatureScheme, IncomeScheme};
//! use fitclass_domain::input::RawInput;
//!
//! let raw = RawInput {
//!     age: 30,
//!     weight: 70.0,
//!     height: 1.75,
//!     income_lpa: 15.0,
//!     active_lifestyle: None,
//!     city: "Houston".to_owned(),
//!     occupation: "software_engineer".to_owned(),
//! };
//!
//! let scheme = IncomeScheme::default();
//! let record = scheme.derive(&scheme.validate(&raw)?);
//! assert_eq!(record.age_group(), "adult");
//! assert_eq!(record.city_tier().as_u8(), 1);
//! # Ok::<(), fitclass_deriver::ValidationError>(())
//! ```

mod bmi;
mod city;
pub mod income;
mod record;
pub mod risk;
mod scheme;
mod validate;

pub use crate::bmi::bmi;
pub use crate::city::{CityTier, CityTiers};
pub use crate::income::{IncomeAgeGroup, IncomeCategory, IncomeFeatures, IncomeScheme};
pub use crate::record::FeatureRecord;
pub use crate::risk::{FitnessRisk, RiskAgeGroup, RiskFeatures, RiskScheme};
pub use crate::scheme::{FeatureScheme, build_scheme};
pub use crate::validate::{FieldViolation, ValidInput, ValidationError};
