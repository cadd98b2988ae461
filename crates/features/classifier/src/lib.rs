//! # Classifier
//!
//! The capability the prediction service depends on ([`Classifier`]) and one concrete,
//! file-loadable implementation: a tree ensemble stored as JSON ([`ForestModel`]).
//!
//! ```rust
//! use fitclass_classifier::{Classifier, ForestModel};
//! use fitclass_domain::frame::{FeatureFrame, FeatureRow};
//!
//! let model = ForestModel::from_slice(br#"{
//!     "classes": ["Basic", "Premium"],
//!     "features": [{ "name": "bmi", "kind": "numeric" }],
//!     "trees": [{ "nodes": [
//!         { "type": "split", "feature": 0, "threshold": 25.0, "left": 1, "right": 2 },
//!         { "type": "leaf", "value": [0.0, 1.0] },
//!         { "type": "leaf", "value": [1.0, 0.0] }
//!     ] }]
//! }"#)?;
//!
//! let frame = FeatureFrame::single(FeatureRow::new().with("bmi", 22.86));
//! assert_eq!(model.predict(&frame)?, ["Premium"]);
//! # Ok::<(), fitclass_classifier::ClassifierError>(())
//! ```

mod classifier;
mod error;
mod forest;

pub use crate::classifier::Classifier;
pub use crate::error::{ClassifierError, ClassifierErrorExt};
pub use crate::forest::{
    FeatureSpec, ForestArtifact, ForestModel, Node, Tree, UnknownCategory, load_model,
};
