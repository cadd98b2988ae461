use fitclass_domain::frame::{FeatureFrame, FeatureRow, FeatureValue};
use fitclass_domain::input::RawInput;
use fitclass_domain::response::{ClassProbabilities, PredictionResponse};
use serde_json::json;

fn sample_row() -> FeatureRow {
    FeatureRow::new()
        .with("bmi", 22.86)
        .with("age_group", "adult")
        .with("income_category", "medium")
        .with("city_tier", 1_i64)
        .with("occupation", "software_engineer")
}

#[test]
fn feature_row_serializes_in_column_order() {
    let text = serde_json::to_string(&sample_row()).expect("serialize");
    assert_eq!(
        text,
        r#"{"bmi":22.86,"age_group":"adult","income_category":"medium","city_tier":1,"occupation":"software_engineer"}"#
    );
}

#[test]
fn feature_row_deserializes_typed_values() {
    let row: FeatureRow =
        serde_json::from_value(json!({"city_tier": 2, "bmi": 31.5, "occupation": "retired"}))
            .expect("deserialize");

    assert_eq!(row.columns().collect::<Vec<_>>(), ["city_tier", "bmi", "occupation"]);
    assert_eq!(row.get("city_tier"), Some(&FeatureValue::Integer(2)));
    assert_eq!(row.get("bmi"), Some(&FeatureValue::Number(31.5)));
    assert_eq!(row.get("occupation").and_then(FeatureValue::as_category), Some("retired"));
}

#[test]
fn pushing_an_existing_column_replaces_in_place() {
    let mut row = sample_row();
    row.push("bmi", 30.0);
    assert_eq!(row.len(), 5);
    assert_eq!(row.columns().next(), Some("bmi"));
    assert_eq!(row.get("bmi").and_then(FeatureValue::as_f64), Some(30.0));
}

#[test]
fn frame_requires_matching_columns() {
    let frame = FeatureFrame::from_rows([sample_row(), sample_row()]).expect("same columns");
    assert_eq!(frame.len(), 2);
    assert_eq!(frame.column_index("city_tier"), Some(3));

    let other = FeatureRow::new().with("bmi", 20.0);
    assert!(FeatureFrame::from_rows([sample_row(), other]).is_none());
    assert!(FeatureFrame::from_rows(Vec::<FeatureRow>::new()).is_none());
}

#[test]
fn raw_input_accepts_income_alias_and_ignores_unknown_fields() {
    let input: RawInput = serde_json::from_value(json!({
        "age": 30,
        "weight": 70.0,
        "height": 1.75,
        "income": 15.0,
        "city": "Houston",
        "occupation": "software_engineer",
        "favourite_colour": "green"
    }))
    .expect("deserialize");

    assert!((input.income_lpa - 15.0).abs() < f64::EPSILON);
    assert_eq!(input.active_lifestyle, None);
}

#[test]
fn raw_input_rejects_fractional_age() {
    let result = serde_json::from_value::<RawInput>(json!({
        "age": 30.5, "weight": 70.0, "height": 1.75, "income_lpa": 15.0,
        "city": "Houston", "occupation": "student"
    }));
    assert!(result.is_err());
}

#[test]
fn minimal_response_has_only_the_label() {
    let body = serde_json::to_value(PredictionResponse::label("Gold")).expect("serialize");
    assert_eq!(body, json!({"predicted_membership_category": "Gold"}));
}

#[test]
fn detailed_response_keeps_class_order() {
    let response = PredictionResponse {
        predicted_membership_category: "Medium".to_owned(),
        input_features: Some(sample_row()),
        probabilities: Some(ClassProbabilities::new(["Low", "Medium", "High"], [0.25, 0.5, 0.25])),
    };

    let text = serde_json::to_string(&response).expect("serialize");
    assert!(text.contains(r#""probabilities":{"Low":0.25,"Medium":0.5,"High":0.25}"#));

    let back: PredictionResponse = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, response);
}
