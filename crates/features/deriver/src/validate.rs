use crate::bmi::bmi;
use crate::scheme::FeatureScheme;
use fitclass_domain::frame::FeatureValue;
use fitclass_domain::input::RawInput;
use fitclass_domain::scheme::SchemeKind;
use serde::Serialize;
use std::fmt;

const MAX_AGE: i64 = 100;
const MAX_HEIGHT: f64 = 2.5;

/// One failed constraint on one input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub constraint: String,
    /// Offending value; `None` when the field was missing.
    pub input: Option<FeatureValue>,
}

impl FieldViolation {
    fn new(field: &'static str, constraint: impl Into<String>, input: Option<FeatureValue>) -> Self {
        Self { field, constraint: constraint.into(), input }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.constraint)
    }
}

/// Every constraint a raw input failed, in field order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Input that passed a scheme's validation. Only [`FeatureScheme::validate`] creates one,
/// which is what makes feature derivation infallible.
#[derive(Debug, Clone, Copy)]
pub struct ValidInput<'a> {
    raw: &'a RawInput,
    scheme: SchemeKind,
    active_lifestyle: bool,
}

impl<'a> ValidInput<'a> {
    #[must_use]
    pub const fn raw(&self) -> &'a RawInput {
        self.raw
    }

    /// Scheme whose rules accepted this input.
    #[must_use]
    pub const fn scheme(&self) -> SchemeKind {
        self.scheme
    }

    #[must_use]
    pub const fn age(&self) -> i64 {
        self.raw.age
    }

    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.raw.weight
    }

    #[must_use]
    pub const fn height(&self) -> f64 {
        self.raw.height
    }

    #[must_use]
    pub const fn income_lpa(&self) -> f64 {
        self.raw.income_lpa
    }

    /// Always `false` under schemes that ignore lifestyle.
    #[must_use]
    pub const fn active_lifestyle(&self) -> bool {
        self.active_lifestyle
    }

    #[must_use]
    pub fn city(&self) -> &'a str {
        &self.raw.city
    }

    #[must_use]
    pub fn occupation(&self) -> &'a str {
        &self.raw.occupation
    }
}

/// Checks every bound of `raw` against `scheme` and collects all violations.
///
/// # Errors
/// Returns a [`ValidationError`] listing each failed field.
pub(crate) fn validate<'a, S>(scheme: &S, raw: &'a RawInput) -> Result<ValidInput<'a>, ValidationError>
where
    S: FeatureScheme + ?Sized,
{
    let mut violations = Vec::new();

    if raw.age <= 0 {
        violations.push(FieldViolation::new("age", "must be greater than 0", Some(raw.age.into())));
    } else if raw.age >= MAX_AGE {
        violations.push(FieldViolation::new(
            "age",
            format!("must be less than {MAX_AGE}"),
            Some(raw.age.into()),
        ));
    }

    let weight_ok = check_positive(&mut violations, "weight", raw.weight);
    let mut height_ok = check_positive(&mut violations, "height", raw.height);
    if height_ok && raw.height >= MAX_HEIGHT {
        violations.push(FieldViolation::new(
            "height",
            format!("must be less than {MAX_HEIGHT}"),
            Some(raw.height.into()),
        ));
        height_ok = false;
    }
    if weight_ok && height_ok && !bmi(raw.weight, raw.height).is_finite() {
        violations.push(FieldViolation::new(
            "weight",
            format!("is too large for a height of {}", raw.height),
            Some(raw.weight.into()),
        ));
    }
    check_positive(&mut violations, "income_lpa", raw.income_lpa);

    let lifestyle = match raw.active_lifestyle {
        Some(active) => active,
        None if scheme.requires_lifestyle() => {
            violations.push(FieldViolation::new(
                "active_lifestyle",
                format!("is required by the {} scheme", scheme.kind()),
                None,
            ));
            false
        },
        None => false,
    };

    let occupations = scheme.occupations();
    if !occupations.contains(&raw.occupation.as_str()) {
        violations.push(FieldViolation::new(
            "occupation",
            format!("must be one of: {}", occupations.join(", ")),
            Some(raw.occupation.as_str().into()),
        ));
    }

    if violations.is_empty() {
        Ok(ValidInput { raw, scheme: scheme.kind(), active_lifestyle: lifestyle })
    } else {
        Err(ValidationError { violations })
    }
}

/// Returns `true` when `value` is finite and strictly positive.
fn check_positive(violations: &mut Vec<FieldViolation>, field: &'static str, value: f64) -> bool {
    if !value.is_finite() {
        violations.push(FieldViolation::new(field, "must be a finite number", None));
        false
    } else if value <= 0.0 {
        violations.push(FieldViolation::new(field, "must be greater than 0", Some(value.into())));
        false
    } else {
        true
    }
}
