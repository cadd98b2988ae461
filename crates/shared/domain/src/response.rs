use crate::frame::FeatureRow;
use crate::scheme::SchemeKind;
use fitclass_derive::api_model;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Result of one prediction request.
#[api_model]
#[derive(Clone, PartialEq)]
pub struct PredictionResponse {
    /// Predicted membership tier
    pub predicted_membership_category: String,
    /// Features the classifier received, in column order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<Object>))]
    pub input_features: Option<FeatureRow>,
    /// Class probabilities keyed by label, in the classifier's class order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<Object>))]
    pub probabilities: Option<ClassProbabilities>,
}

impl PredictionResponse {
    #[must_use]
    pub fn label(label: impl Into<String>) -> Self {
        Self { predicted_membership_category: label.into(), input_features: None, probabilities: None }
    }
}

/// Per-class probabilities, kept in the classifier's class order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassProbabilities {
    entries: Vec<(String, f64)>,
}

impl ClassProbabilities {
    /// Pairs class labels with probabilities; extra entries on either side are dropped.
    pub fn new<I, S>(classes: I, values: impl IntoIterator<Item = f64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { entries: classes.into_iter().map(Into::into).zip(values).collect() }
    }

    #[must_use]
    pub fn get(&self, class: &str) -> Option<f64> {
        self.entries.iter().find(|(name, _)| name == class).map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, p)| (name.as_str(), *p))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ClassProbabilities {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, p) in &self.entries {
            map.serialize_entry(name, p)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ClassProbabilities {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ProbabilitiesVisitor;

        impl<'de> Visitor<'de> for ProbabilitiesVisitor {
            type Value = ClassProbabilities;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of class labels to probabilities")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or_default());
                while let Some(entry) = access.next_entry::<String, f64>()? {
                    entries.push(entry);
                }
                Ok(ClassProbabilities { entries })
            }
        }

        deserializer.deserialize_map(ProbabilitiesVisitor)
    }
}

/// Liveness report.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct HealthReport {
    /// Always `ok` while the process serves requests
    pub status: String,
    /// Human-readable summary
    pub message: String,
    /// Whether a classifier is available for predictions
    pub model_loaded: bool,
}

/// Static description served at `/`.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    /// Service name
    pub name: String,
    /// Crate version
    pub version: String,
    /// Active feature scheme
    pub scheme: SchemeKind,
    /// Welcome message
    pub message: String,
    /// Routes this service answers
    pub endpoints: Vec<EndpointInfo>,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct EndpointInfo {
    /// HTTP method
    pub method: String,
    /// Route path
    pub path: String,
    /// What the route does
    pub description: String,
}

impl EndpointInfo {
    #[must_use]
    pub fn new(method: &str, path: &str, description: &str) -> Self {
        Self { method: method.to_owned(), path: path.to_owned(), description: description.to_owned() }
    }
}
