use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two feature schemes a deployment can run. They are never mixed in one process.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SchemeKind {
    /// Age group, fitness risk from BMI and lifestyle, raw income.
    #[default]
    Risk,
    /// Age group and income bracket; no lifestyle input.
    Income,
}

impl SchemeKind {
    pub const ALL: [Self; 2] = [Self::Risk, Self::Income];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Risk => "risk",
            Self::Income => "income",
        }
    }

    /// Whether prediction responses carry derived features and probabilities unless
    /// configured otherwise.
    #[must_use]
    pub const fn detailed_by_default(self) -> bool {
        matches!(self, Self::Income)
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown scheme '{s}', expected one of: risk, income"))
    }
}
