use crate::city::CityTiers;
use crate::income::IncomeScheme;
use crate::record::FeatureRecord;
use crate::risk::RiskScheme;
use crate::validate::{ValidInput, ValidationError, validate};
use fitclass_domain::config::SchemeConfig;
use fitclass_domain::input::RawInput;
use fitclass_domain::scheme::SchemeKind;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::debug;

/// A fixed rule set turning raw attributes into the classifier's feature row.
///
/// Implementations are stateless apart from their city lists and are shared read-only
/// across requests.
pub trait FeatureScheme: Debug + Send + Sync {
    fn kind(&self) -> SchemeKind;

    /// The closed set of accepted occupations.
    fn occupations(&self) -> &'static [&'static str];

    /// Feature column names in the order the classifier expects them.
    fn columns(&self) -> &'static [&'static str];

    /// Whether `active_lifestyle` must be present on the input.
    fn requires_lifestyle(&self) -> bool;

    fn city_tiers(&self) -> &CityTiers;

    /// Checks every input bound, reporting all violations at once.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] when any field is out of range or unrecognized.
    fn validate<'a>(&self, raw: &'a RawInput) -> Result<ValidInput<'a>, ValidationError> {
        validate(self, raw)
    }

    /// Derives the feature record. Total over validated input.
    fn derive(&self, input: &ValidInput<'_>) -> FeatureRecord;
}

/// Builds the configured scheme, using the config's city lists when present.
#[must_use]
pub fn build_scheme(config: &SchemeConfig) -> Arc<dyn FeatureScheme> {
    let tiers = config.cities.as_ref().map(CityTiers::from);
    debug!(
        scheme = %config.kind,
        custom_cities = tiers.is_some(),
        "Building feature scheme"
    );

    match config.kind {
        SchemeKind::Risk => Arc::new(tiers.map_or_else(RiskScheme::default, RiskScheme::new)),
        SchemeKind::Income => Arc::new(tiers.map_or_else(IncomeScheme::default, IncomeScheme::new)),
    }
}
