use fitclass::domain::config::ApiConfig;
use fitclass::domain::input::RawInput;
use fitclass::domain::scheme::SchemeKind;
use fitclass::{PlatformError, init};
use serde_json::json;
use std::io::Write;
use std::path::Path;

/// A single stump on BMI over the income scheme's columns.
fn income_model() -> serde_json::Value {
    json!({
        "classes": ["Basic", "Standard", "Premium"],
        "features": [
            { "name": "bmi", "kind": "numeric" },
            { "name": "age_group", "kind": "categorical",
              "categories": ["teen", "young_adult", "adult", "senior"] },
            { "name": "income_category", "kind": "categorical",
              "categories": ["low", "medium", "high"] },
            { "name": "city_tier", "kind": "categorical", "categories": ["1", "2", "3"] },
            { "name": "occupation", "kind": "categorical",
              "categories": ["software_engineer", "student"] }
        ],
        "trees": [{ "nodes": [
            { "type": "split", "feature": 0, "threshold": 25.0, "left": 1, "right": 2 },
            { "type": "leaf", "value": [1.0, 3.0, 0.0] },
            { "type": "leaf", "value": [3.0, 1.0, 0.0] }
        ] }]
    })
}

fn write_model(dir: &Path, model: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.join("model.json");
    let mut file = std::fs::File::create(&path).expect("create model");
    file.write_all(&serde_json::to_vec(model).expect("json")).expect("write model");
    path
}

fn config(model_path: &Path, required: bool, kind: SchemeKind) -> ApiConfig {
    let mut config = ApiConfig::default();
    config.model.path = model_path.to_path_buf();
    config.model.required = required;
    config.scheme.kind = kind;
    config
}

fn houston_engineer() -> RawInput {
    serde_json::from_value(json!({
        "age": 30, "weight": 70.0, "height": 1.75, "income_lpa": 15.0,
        "city": "Houston", "occupation": "software_engineer"
    }))
    .expect("raw input")
}

#[test]
fn loads_model_and_serves_predictions() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_model(dir.path(), &income_model());

    let service = init(&config(&path, true, SchemeKind::Income)).expect("init");
    assert!(service.model_loaded());
    assert!(service.detailed());

    let response = service.predict(&houston_engineer()).expect("prediction");
    assert_eq!(response.predicted_membership_category, "Standard");
    let probabilities = response.probabilities.expect("income responses carry probabilities");
    assert_eq!(probabilities.get("Standard"), Some(0.75));
}

#[test]
fn optional_model_may_be_missing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let service = init(&config(&dir.path().join("absent.json"), false, SchemeKind::Risk))
        .expect("missing optional model is tolerated");

    assert!(!service.model_loaded());
    assert!(!service.health().model_loaded);
}

#[test]
fn required_model_must_load() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = init(&config(&dir.path().join("absent.json"), true, SchemeKind::Risk))
        .expect_err("required model is missing");

    assert!(matches!(err, PlatformError::Model { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn broken_required_model_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_model(dir.path(), &json!({ "classes": [], "features": [], "trees": [] }));

    let err = init(&config(&path, true, SchemeKind::Income)).expect_err("malformed model");
    assert!(matches!(err, PlatformError::Model { .. }));
}
