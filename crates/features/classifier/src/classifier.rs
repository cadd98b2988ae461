use crate::error::ClassifierError;
use fitclass_domain::frame::FeatureFrame;
use std::fmt::Debug;

/// An opaque, pre-trained model mapping feature rows to class labels.
///
/// Loaded once and shared read-only across requests.
pub trait Classifier: Debug + Send + Sync {
    /// Class labels in the model's order; probability vectors follow this order.
    fn classes(&self) -> &[String];

    /// Predicts one label per frame row.
    ///
    /// # Errors
    /// Returns a [`ClassifierError`] when the frame does not fit the model.
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<String>, ClassifierError>;

    fn supports_probabilities(&self) -> bool {
        false
    }

    /// Class probabilities per frame row, in [`Classifier::classes`] order.
    ///
    /// # Errors
    /// Returns [`ClassifierError::Unsupported`] unless the model exposes probabilities.
    fn predict_proba(&self, frame: &FeatureFrame) -> Result<Vec<Vec<f64>>, ClassifierError> {
        let _ = frame;
        Err(ClassifierError::Unsupported {
            message: "this classifier does not expose class probabilities".into(),
            context: None,
        })
    }
}
