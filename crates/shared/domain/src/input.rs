use fitclass_derive::api_model;

/// Raw attributes submitted by a caller, before validation.
///
/// Bounds are enforced by the active feature scheme, never by deserialization, so that
/// every violation can be reported at once. Unknown fields are ignored.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq)]
pub struct RawInput {
    /// Age in years, 1 to 99
    pub age: i64,
    /// Weight in kilograms
    pub weight: f64,
    /// Height in meters, below 2.5
    pub height: f64,
    /// Annual income in lakh per annum
    #[serde(alias = "income")]
    pub income_lpa: f64,
    /// Required by the risk scheme, ignored by the income scheme
    #[serde(default)]
    pub active_lifestyle: Option<bool>,
    /// City of residence, matched case-sensitively
    pub city: String,
    /// Occupation from the active scheme's list
    pub occupation: String,
}
