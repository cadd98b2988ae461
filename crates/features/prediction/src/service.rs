use crate::error::ServiceError;
use fitclass_classifier::{Classifier, ClassifierError};
use fitclass_deriver::{FeatureRecord, FeatureScheme, build_scheme};
use fitclass_domain::config::SchemeConfig;
use fitclass_domain::constants::SERVICE_NAME;
use fitclass_domain::frame::FeatureFrame;
use fitclass_domain::input::RawInput;
use fitclass_domain::response::{
    ClassProbabilities, EndpointInfo, HealthReport, PredictionResponse, ServiceInfo,
};
use fitclass_domain::scheme::SchemeKind;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Debug)]
struct PredictionServiceInner {
    scheme: Arc<dyn FeatureScheme>,
    classifier: Option<Arc<dyn Classifier>>,
    detailed: bool,
}

/// Validates raw input, derives features and asks the classifier for a label.
///
/// Cheap to clone; every clone shares the same scheme and classifier.
#[derive(Debug, Clone)]
pub struct PredictionService {
    inner: Arc<PredictionServiceInner>,
}

/// What one classifier call produced for a single row.
struct Classification {
    label: String,
    probabilities: Option<Vec<f64>>,
}

impl PredictionService {
    #[must_use]
    pub fn builder() -> PredictionServiceBuilder {
        PredictionServiceBuilder::default()
    }

    #[must_use]
    pub fn scheme(&self) -> &dyn FeatureScheme {
        self.inner.scheme.as_ref()
    }

    #[must_use]
    pub fn kind(&self) -> SchemeKind {
        self.inner.scheme.kind()
    }

    #[must_use]
    pub fn model_loaded(&self) -> bool {
        self.inner.classifier.is_some()
    }

    /// Whether responses carry derived features and probabilities.
    #[must_use]
    pub fn detailed(&self) -> bool {
        self.inner.detailed
    }

    /// Validates `raw` and derives its features without classifying.
    ///
    /// # Errors
    /// Returns [`ServiceError::Validation`] listing every violated constraint.
    pub fn derive_features(&self, raw: &RawInput) -> Result<FeatureRecord, ServiceError> {
        let valid = self.inner.scheme.validate(raw).map_err(|source| {
            debug!(scheme = %self.kind(), error = %source, "Rejected prediction input");
            ServiceError::Validation { source, context: None }
        })?;
        Ok(self.inner.scheme.derive(&valid))
    }

    /// Runs validate, derive and classify for one input.
    ///
    /// Classifier errors and panics are both reported as [`ServiceError::Prediction`];
    /// the service stays usable afterwards.
    ///
    /// # Errors
    /// * [`ServiceError::Validation`] when the input breaks a constraint.
    /// * [`ServiceError::Prediction`] when no model is loaded or the model fails.
    pub fn predict(&self, raw: &RawInput) -> Result<PredictionResponse, ServiceError> {
        let record = self.derive_features(raw)?;
        self.predict_record(&record)
    }

    /// Classifies an already derived record.
    ///
    /// # Errors
    /// Returns [`ServiceError::Prediction`] when no model is loaded or the model fails.
    pub fn predict_record(&self, record: &FeatureRecord) -> Result<PredictionResponse, ServiceError> {
        let row = record.to_row();
        let frame = FeatureFrame::single(row.clone());

        let classification = self.classify(&frame).map_err(|source| {
            error!(scheme = %self.kind(), error = %source, "Prediction failed");
            ServiceError::Prediction { source, context: None }
        })?;

        info!(
            scheme = %self.kind(),
            label = %classification.label,
            age_group = record.age_group(),
            city_tier = record.city_tier().as_u8(),
            "Prediction served"
        );

        let classes = self.inner.classifier.as_ref().map(|c| c.classes().to_vec());
        let probabilities = classification
            .probabilities
            .zip(classes)
            .map(|(values, classes)| ClassProbabilities::new(classes, values));

        Ok(PredictionResponse {
            predicted_membership_category: classification.label,
            input_features: self.inner.detailed.then_some(row),
            probabilities,
        })
    }

    fn classify(&self, frame: &FeatureFrame) -> Result<Classification, ClassifierError> {
        let classifier = self.inner.classifier.as_deref().ok_or_else(|| {
            ClassifierError::NotLoaded {
                message: "no classifier artifact was loaded at startup".into(),
                context: None,
            }
        })?;
        let want_probabilities = self.inner.detailed && classifier.supports_probabilities();

        catch_unwind(AssertUnwindSafe(|| run_classifier(classifier, frame, want_probabilities)))
            .unwrap_or_else(|payload| {
                Err(ClassifierError::Internal {
                    message: format!("classifier panicked: {}", panic_message(payload.as_ref()))
                        .into(),
                    context: None,
                })
            })
    }

    /// Liveness report; always `ok` while the process runs.
    #[must_use]
    pub fn health(&self) -> HealthReport {
        let message = if self.model_loaded() {
            "Fitness membership classifier is ready"
        } else {
            "Service is running but no model is loaded; predictions are unavailable"
        };
        HealthReport { status: "ok".to_owned(), message: message.to_owned(), model_loaded: self.model_loaded() }
    }

    #[must_use]
    pub fn describe(&self) -> ServiceInfo {
        ServiceInfo {
            name: SERVICE_NAME.to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            scheme: self.kind(),
            message: format!("Welcome to the {SERVICE_NAME} API"),
            endpoints: vec![
                EndpointInfo::new("GET", "/", "Service description"),
                EndpointInfo::new("GET", "/health", "Liveness and model status"),
                EndpointInfo::new("POST", "/predict", "Predict a membership category"),
                EndpointInfo::new("GET", "/docs", "Interactive API documentation"),
            ],
        }
    }
}

fn run_classifier(
    classifier: &dyn Classifier,
    frame: &FeatureFrame,
    want_probabilities: bool,
) -> Result<Classification, ClassifierError> {
    let label = classifier.predict(frame)?.into_iter().next().ok_or_else(|| {
        ClassifierError::Internal { message: "classifier returned no label".into(), context: None }
    })?;

    let probabilities = if want_probabilities {
        let row = classifier.predict_proba(frame)?.into_iter().next().ok_or_else(|| {
            ClassifierError::Internal {
                message: "classifier returned no probabilities".into(),
                context: None,
            }
        })?;
        if row.len() != classifier.classes().len() {
            return Err(ClassifierError::Internal {
                message: format!(
                    "classifier returned {} probabilities for {} classes",
                    row.len(),
                    classifier.classes().len()
                )
                .into(),
                context: None,
            });
        }
        Some(row)
    } else {
        None
    };

    Ok(Classification { label, probabilities })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic payload")
}

#[derive(Debug, Default)]
pub struct PredictionServiceBuilder {
    scheme: Option<Arc<dyn FeatureScheme>>,
    classifier: Option<Arc<dyn Classifier>>,
    detailed: Option<bool>,
}

impl PredictionServiceBuilder {
    #[must_use]
    pub fn scheme(mut self, scheme: Arc<dyn FeatureScheme>) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Builds the scheme from config and takes its detailed-response setting.
    #[must_use]
    pub fn scheme_config(mut self, config: &SchemeConfig) -> Self {
        self.scheme = Some(build_scheme(config));
        self.detailed = Some(config.detailed());
        self
    }

    #[must_use]
    pub fn classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    #[must_use]
    pub fn maybe_classifier(mut self, classifier: Option<Arc<dyn Classifier>>) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub const fn detailed(mut self, detailed: bool) -> Self {
        self.detailed = Some(detailed);
        self
    }

    /// # Errors
    /// Returns [`ServiceError::Internal`] when no scheme was provided.
    pub fn build(self) -> Result<PredictionService, ServiceError> {
        let scheme = self.scheme.ok_or("Feature scheme not provided")?;
        let detailed = self.detailed.unwrap_or_else(|| scheme.kind().detailed_by_default());

        info!(
            scheme = %scheme.kind(),
            model_loaded = self.classifier.is_some(),
            detailed,
            "Prediction service initialized"
        );

        Ok(PredictionService {
            inner: Arc::new(PredictionServiceInner { scheme, classifier: self.classifier, detailed }),
        })
    }
}
