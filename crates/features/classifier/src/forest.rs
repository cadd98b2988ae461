//! Tree-ensemble model loaded from a JSON artifact.
//!
//! ```json
//! {
//!   "classes": ["Low", "Medium", "High"],
//!   "features": [
//!     { "name": "bmi", "kind": "numeric" },
//!     { "name": "age_group", "kind": "categorical", "categories": ["young", "adult"] }
//!   ],
//!   "handle_unknown": "ignore",
//!   "trees": [
//!     { "nodes": [
//!       { "type": "split", "feature": 0, "threshold": 25.0, "left": 1, "right": 2 },
//!       { "type": "leaf", "value": [0.0, 1.0, 3.0] },
//!       { "type": "leaf", "value": [2.0, 1.0, 0.0] }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Categorical columns are one-hot expanded in declaration order, so split `feature`
//! indices address the encoded vector. A split sends `x <= threshold` left.

use crate::classifier::Classifier;
use crate::error::{ClassifierError, ClassifierErrorExt};
use fitclass_domain::frame::{FeatureFrame, FeatureValue};
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const fn default_true() -> bool {
    true
}

/// How an unseen category is encoded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategory {
    /// All-zero one-hot block.
    #[default]
    Ignore,
    /// Reject the row.
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum FeatureSpec {
    Numeric { name: String },
    Categorical { name: String, categories: Vec<String> },
}

impl FeatureSpec {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Numeric { name } | Self::Categorical { name, .. } => name,
        }
    }

    /// Slots this column occupies in the encoded vector.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Self::Numeric { .. } => 1,
            Self::Categorical { categories, .. } => categories.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum Node {
    Split { feature: usize, threshold: f64, left: usize, right: usize },
    Leaf { value: Vec<f64> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

/// On-disk representation, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForestArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub classes: Vec<String>,
    pub features: Vec<FeatureSpec>,
    #[serde(default)]
    pub handle_unknown: UnknownCategory,
    #[serde(default = "default_true")]
    pub probabilities: bool,
    pub trees: Vec<Tree>,
}

/// A validated tree ensemble ready for inference.
#[derive(Debug, Clone)]
pub struct ForestModel {
    artifact: ForestArtifact,
    /// Normalized class distribution per leaf, indexed `[tree][node]`.
    leaves: Vec<Vec<Option<Vec<f64>>>>,
    width: usize,
}

impl ForestModel {
    /// Validates an artifact and precomputes normalized leaf distributions.
    ///
    /// # Errors
    /// Returns [`ClassifierError::Malformed`] when the artifact cannot describe a usable
    /// model (no classes or trees, duplicate names, cyclic or out-of-range node references,
    /// leaf widths that differ from the class count, non-positive leaf weights).
    pub fn new(artifact: ForestArtifact) -> Result<Self, ClassifierError> {
        if artifact.classes.is_empty() {
            return Err(malformed("no classes declared"));
        }
        if artifact.features.is_empty() {
            return Err(malformed("no input features declared"));
        }
        if artifact.trees.is_empty() {
            return Err(malformed("no trees declared"));
        }
        ensure_unique(artifact.classes.iter().map(String::as_str), "class")?;
        ensure_unique(artifact.features.iter().map(FeatureSpec::name), "feature")?;
        for spec in &artifact.features {
            if let FeatureSpec::Categorical { name, categories } = spec {
                if categories.is_empty() {
                    return Err(malformed(format!("categorical feature '{name}' has no categories")));
                }
                ensure_unique(categories.iter().map(String::as_str), "category")
                    .context(format!("feature '{name}'"))?;
            }
        }

        let width = artifact.features.iter().map(FeatureSpec::width).sum();
        let classes = artifact.classes.len();
        let leaves = artifact
            .trees
            .iter()
            .enumerate()
            .map(|(index, tree)| {
                validate_tree(tree, width, classes).context(format!("tree {index}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { artifact, leaves, width })
    }

    /// Parses and validates a JSON artifact.
    ///
    /// # Errors
    /// Returns [`ClassifierError::Artifact`] for invalid JSON and
    /// [`ClassifierError::Malformed`] for an unusable model.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ClassifierError> {
        let artifact: ForestArtifact =
            serde_json::from_slice(bytes).context("Failed to parse model artifact")?;
        Self::new(artifact)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.artifact.name.as_deref()
    }

    /// Input column names in the order frames must present them.
    pub fn input_columns(&self) -> impl Iterator<Item = &str> {
        self.artifact.features.iter().map(FeatureSpec::name)
    }

    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.artifact.trees.len()
    }

    #[must_use]
    pub const fn artifact(&self) -> &ForestArtifact {
        &self.artifact
    }

    fn check_columns(&self, frame: &FeatureFrame) -> Result<(), ClassifierError> {
        let expected: Vec<&str> = self.input_columns().collect();
        let matches = frame.columns().len() == expected.len()
            && frame.columns().iter().zip(&expected).all(|(got, want)| got == want);
        if matches {
            Ok(())
        } else {
            Err(ClassifierError::Schema {
                message: format!(
                    "expected columns [{}], got [{}]",
                    expected.join(", "),
                    frame.columns().join(", ")
                )
                .into(),
                context: None,
            })
        }
    }

    fn encode(&self, row: &[FeatureValue]) -> Result<Vec<f64>, ClassifierError> {
        let mut encoded = Vec::with_capacity(self.width);
        for (spec, value) in self.artifact.features.iter().zip(row) {
            match spec {
                FeatureSpec::Numeric { name } => {
                    let number = value.as_f64().ok_or_else(|| ClassifierError::Value {
                        message: format!("'{name}' expects a number, got {} '{value}'", value.kind())
                            .into(),
                        context: None,
                    })?;
                    encoded.push(number);
                },
                FeatureSpec::Categorical { name, categories } => {
                    let label = match value {
                        FeatureValue::Category(label) => label.clone(),
                        FeatureValue::Integer(number) => number.to_string(),
                        FeatureValue::Number(_) => {
                            return Err(ClassifierError::Value {
                                message: format!("'{name}' expects a category, got number '{value}'")
                                    .into(),
                                context: None,
                            });
                        },
                    };
                    let hit = categories.iter().position(|category| *category == label);
                    if hit.is_none() && self.artifact.handle_unknown == UnknownCategory::Error {
                        return Err(ClassifierError::Value {
                            message: format!("unknown category '{label}' for '{name}'").into(),
                            context: None,
                        });
                    }
                    encoded.extend((0..categories.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
                },
            }
        }
        Ok(encoded)
    }

    fn row_distribution(&self, encoded: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        let mut totals = vec![0.0; self.artifact.classes.len()];
        for (tree, leaves) in self.artifact.trees.iter().zip(&self.leaves) {
            let leaf = traverse(tree, leaves, encoded)?;
            for (total, p) in totals.iter_mut().zip(leaf) {
                *total += p;
            }
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.leaves.len() as f64;
        Ok(totals.into_iter().map(|total| total / count).collect())
    }

    fn distributions(&self, frame: &FeatureFrame) -> Result<Vec<Vec<f64>>, ClassifierError> {
        self.check_columns(frame)?;
        frame
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| {
                self.encode(row)
                    .and_then(|encoded| self.row_distribution(&encoded))
                    .context(format!("row {index}"))
            })
            .collect()
    }
}

impl Classifier for ForestModel {
    fn classes(&self) -> &[String] {
        &self.artifact.classes
    }

    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<String>, ClassifierError> {
        Ok(self
            .distributions(frame)?
            .iter()
            .map(|distribution| self.artifact.classes[argmax(distribution)].clone())
            .collect())
    }

    fn supports_probabilities(&self) -> bool {
        self.artifact.probabilities
    }

    fn predict_proba(&self, frame: &FeatureFrame) -> Result<Vec<Vec<f64>>, ClassifierError> {
        if !self.artifact.probabilities {
            return Err(ClassifierError::Unsupported {
                message: "model artifact disables class probabilities".into(),
                context: None,
            });
        }
        self.distributions(frame)
    }
}

/// Loads and validates a forest artifact from disk.
///
/// # Errors
/// Returns [`ClassifierError::Io`] when the file cannot be read, or the parse and
/// validation errors of [`ForestModel::from_slice`].
pub fn load_model(path: impl AsRef<Path>) -> Result<ForestModel, ClassifierError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).context(format!("Reading {}", path.display()))?;
    let model = ForestModel::from_slice(&bytes).context(format!("Loading {}", path.display()))?;

    info!(
        path = %path.display(),
        name = model.name().unwrap_or("unnamed"),
        classes = ?model.classes(),
        trees = model.tree_count(),
        "Model loaded"
    );
    Ok(model)
}

/// Index of the first maximum.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (index, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = index;
        }
    }
    best
}

fn traverse<'a>(
    tree: &Tree,
    leaves: &'a [Option<Vec<f64>>],
    encoded: &[f64],
) -> Result<&'a [f64], ClassifierError> {
    let mut index = 0;
    loop {
        match (&tree.nodes[index], &leaves[index]) {
            (_, Some(leaf)) => return Ok(leaf),
            (Node::Split { feature, threshold, left, right }, None) => {
                index = if encoded[*feature] <= *threshold { *left } else { *right };
            },
            (Node::Leaf { .. }, None) => {
                return Err(ClassifierError::Internal {
                    message: format!("leaf {index} has no normalized distribution").into(),
                    context: None,
                });
            },
        }
    }
}

/// Checks node references and returns normalized leaf distributions.
fn validate_tree(
    tree: &Tree,
    width: usize,
    classes: usize,
) -> Result<Vec<Option<Vec<f64>>>, ClassifierError> {
    if tree.nodes.is_empty() {
        return Err(malformed("tree has no nodes"));
    }

    let count = tree.nodes.len();
    tree.nodes
        .iter()
        .enumerate()
        .map(|(index, node)| match node {
            Node::Split { feature, threshold, left, right } => {
                if *feature >= width {
                    return Err(malformed(format!(
                        "node {index} splits on feature {feature}, encoded width is {width}"
                    )));
                }
                if !threshold.is_finite() {
                    return Err(malformed(format!("node {index} has a non-finite threshold")));
                }
                for child in [left, right] {
                    if *child <= index || *child >= count {
                        return Err(malformed(format!(
                            "node {index} references child {child}; children must follow their parent"
                        )));
                    }
                }
                Ok(None)
            },
            Node::Leaf { value } => {
                if value.len() != classes {
                    return Err(malformed(format!(
                        "leaf {index} has {} weights for {classes} classes",
                        value.len()
                    )));
                }
                if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(malformed(format!("leaf {index} has a negative or non-finite weight")));
                }
                let sum: f64 = value.iter().sum();
                if sum <= 0.0 {
                    return Err(malformed(format!("leaf {index} weights sum to zero")));
                }
                Ok(Some(value.iter().map(|w| w / sum).collect()))
            },
        })
        .collect()
}

fn ensure_unique<'a>(
    names: impl Iterator<Item = &'a str>,
    what: &'static str,
) -> Result<(), ClassifierError> {
    let mut seen = FxHashSet::default();
    for name in names {
        if !seen.insert(name) {
            return Err(malformed(format!("duplicate {what} '{name}'")));
        }
    }
    Ok(())
}

fn malformed(message: impl Into<std::borrow::Cow<'static, str>>) -> ClassifierError {
    ClassifierError::Malformed { message: message.into(), context: None }
}
