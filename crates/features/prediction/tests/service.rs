use fitclass_classifier::{Classifier, ClassifierError};
use fitclass_deriver::{IncomeScheme, RiskScheme};
use fitclass_domain::config::SchemeConfig;
use fitclass_domain::frame::FeatureFrame;
use fitclass_domain::input::RawInput;
use fitclass_domain::scheme::SchemeKind;
use fitclass_prediction::{PredictionService, ServiceError};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Echoes the age group back as the label so tests can see what the model received.
#[derive(Debug)]
struct EchoClassifier {
    classes: Vec<String>,
    probabilities: bool,
}

impl EchoClassifier {
    fn new(probabilities: bool) -> Arc<Self> {
        Arc::new(Self { classes: vec!["Low".into(), "Medium".into(), "High".into()], probabilities })
    }
}

impl Classifier for EchoClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<String>, ClassifierError> {
        let index = frame.column_index("age_group").ok_or("missing age_group")?;
        Ok(frame.rows().iter().map(|row| row[index].to_string()).collect())
    }

    fn supports_probabilities(&self) -> bool {
        self.probabilities
    }

    fn predict_proba(&self, frame: &FeatureFrame) -> Result<Vec<Vec<f64>>, ClassifierError> {
        Ok(frame.rows().iter().map(|_| vec![0.2, 0.5, 0.3]).collect())
    }
}

/// Fails every other call, panicking on the odd ones.
#[derive(Debug, Default)]
struct FlakyClassifier {
    calls: AtomicUsize,
    classes: Vec<String>,
}

impl Classifier for FlakyClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, _frame: &FeatureFrame) -> Result<Vec<String>, ClassifierError> {
        match self.calls.fetch_add(1, Ordering::SeqCst) % 3 {
            0 => Err(ClassifierError::Schema { message: "column mismatch".into(), context: None }),
            1 => panic!("model state corrupted"),
            _ => Ok(vec!["Gold".to_owned()]),
        }
    }
}

fn income_input() -> RawInput {
    RawInput {
        age: 30,
        weight: 70.0,
        height: 1.75,
        income_lpa: 15.0,
        active_lifestyle: None,
        city: "Houston".to_owned(),
        occupation: "software_engineer".to_owned(),
    }
}

fn risk_input() -> RawInput {
    RawInput {
        active_lifestyle: Some(false),
        weight: 100.0,
        occupation: "office_worker".to_owned(),
        ..income_input()
    }
}

#[test]
fn income_scheme_returns_features_and_probabilities() {
    let service = PredictionService::builder()
        .scheme(Arc::new(IncomeScheme::default()))
        .classifier(EchoClassifier::new(true))
        .build()
        .expect("service");

    let response = service.predict(&income_input()).expect("prediction");
    assert_eq!(
        serde_json::to_value(&response).expect("json"),
        json!({
            "predicted_membership_category": "adult",
            "input_features": {
                "bmi": 22.86,
                "age_group": "adult",
                "income_category": "medium",
                "city_tier": 1,
                "occupation": "software_engineer"
            },
            "probabilities": { "Low": 0.2, "Medium": 0.5, "High": 0.3 }
        })
    );
}

#[test]
fn risk_scheme_returns_only_the_label() {
    let service = PredictionService::builder()
        .scheme(Arc::new(RiskScheme::default()))
        .classifier(EchoClassifier::new(true))
        .build()
        .expect("service");

    let response = service.predict(&risk_input()).expect("prediction");
    assert_eq!(
        serde_json::to_value(&response).expect("json"),
        json!({ "predicted_membership_category": "adult" })
    );
}

#[test]
fn detailed_setting_overrides_scheme_default() {
    let config =
        SchemeConfig { kind: SchemeKind::Risk, detailed_response: Some(true), cities: None };
    let service = PredictionService::builder()
        .scheme_config(&config)
        .classifier(EchoClassifier::new(false))
        .build()
        .expect("service");

    let response = service.predict(&risk_input()).expect("prediction");
    let features = response.input_features.expect("features included");
    assert_eq!(features.get("fitness_risk").map(ToString::to_string).as_deref(), Some("high_risk"));
    assert!(response.probabilities.is_none(), "classifier has no probabilities");
}

#[test]
fn validation_errors_skip_the_classifier() {
    let flaky = Arc::new(FlakyClassifier::default());
    let service = PredictionService::builder()
        .scheme(Arc::new(IncomeScheme::default()))
        .classifier(flaky.clone())
        .build()
        .expect("service");

    let mut input = income_input();
    input.height = 3.0;
    input.occupation = "wizard".to_owned();

    let err = service.predict(&input).expect_err("invalid");
    let ServiceError::Validation { source, .. } = err else { panic!("expected validation error") };
    assert_eq!(source.fields(), ["height", "occupation"]);
    assert_eq!(flaky.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn derived_record_classifies_like_raw_input() {
    let service = PredictionService::builder()
        .scheme(Arc::new(IncomeScheme::default()))
        .classifier(EchoClassifier::new(true))
        .build()
        .expect("service");

    let record = service.derive_features(&income_input()).expect("features");
    let from_record = service.predict_record(&record).expect("prediction");
    assert_eq!(from_record, service.predict(&income_input()).expect("prediction"));
    assert_eq!(from_record.input_features, Some(record.to_row()));
}

#[test]
fn overflowing_bmi_never_reaches_the_classifier() {
    let flaky = Arc::new(FlakyClassifier::default());
    let service = PredictionService::builder()
        .scheme(Arc::new(IncomeScheme::default()))
        .classifier(flaky.clone())
        .detailed(true)
        .build()
        .expect("service");

    let input = RawInput { weight: 1e300, height: 1e-5, ..income_input() };

    let err = service.predict(&input).expect_err("bmi overflows");
    let ServiceError::Validation { source, .. } = err else { panic!("expected validation error") };
    assert_eq!(source.fields(), ["weight"]);
    assert_eq!(flaky.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn classifier_errors_and_panics_do_not_stop_the_service() {
    let service = PredictionService::builder()
        .scheme(Arc::new(IncomeScheme::default()))
        .classifier(Arc::new(FlakyClassifier::default()))
        .build()
        .expect("service");

    let err = service.predict(&income_input()).expect_err("schema failure");
    assert!(matches!(err, ServiceError::Prediction { source: ClassifierError::Schema { .. }, .. }));
    assert!(err.to_string().contains("column mismatch"));

    let err = service.predict(&income_input()).expect_err("panic");
    assert!(matches!(err, ServiceError::Prediction { source: ClassifierError::Internal { .. }, .. }));
    assert!(err.to_string().contains("model state corrupted"));

    let response = service.predict(&income_input()).expect("recovered");
    assert_eq!(response.predicted_membership_category, "Gold");
}

#[test]
fn missing_model_is_a_prediction_error() {
    let service =
        PredictionService::builder().scheme(Arc::new(RiskScheme::default())).build().expect("service");

    assert!(!service.model_loaded());
    let err = service.predict(&risk_input()).expect_err("no model");
    assert!(matches!(err, ServiceError::Prediction { source: ClassifierError::NotLoaded { .. }, .. }));

    // Derivation still works without a model.
    let record = service.derive_features(&risk_input()).expect("features");
    assert_eq!(record.category(), ("fitness_risk", "high_risk"));
}

#[test]
fn health_and_description() {
    let service = PredictionService::builder()
        .scheme(Arc::new(IncomeScheme::default()))
        .classifier(EchoClassifier::new(true))
        .build()
        .expect("service");

    let health = service.health();
    assert_eq!(health.status, "ok");
    assert!(health.model_loaded);

    let info = service.describe();
    assert_eq!(info.scheme, SchemeKind::Income);
    assert!(info.endpoints.iter().any(|e| e.method == "POST" && e.path == "/predict"));
}

#[test]
fn builder_requires_a_scheme() {
    let err = PredictionService::builder().build().expect_err("no scheme");
    assert!(matches!(err, ServiceError::Internal { .. }));
}
