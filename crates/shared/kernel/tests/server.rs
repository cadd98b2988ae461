use axum::body::to_bytes;
use axum::response::IntoResponse;
use fitclass_kernel::domain::config::ApiConfig;
use fitclass_kernel::server::{ApiError, ApiState, ApiStateError, ViolationDetail, not_found};
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug)]
struct Counter(u32);

async fn body_json(err: ApiError) -> (u16, Value) {
    let response = err.into_response();
    let status = response.status().as_u16();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

#[test]
fn state_requires_config() {
    let err = ApiState::builder().build().expect_err("config is required");
    assert!(matches!(err, ApiStateError::Validation { .. }));
}

#[test]
fn slices_are_looked_up_by_type() {
    let state = ApiState::builder()
        .config(ApiConfig::default())
        .register_slice(Arc::new(Counter(7)))
        .build()
        .expect("state");

    assert_eq!(state.try_get_slice::<Counter>().expect("registered").0, 7);
    assert!(state.get_slice::<String>().is_none());
    assert!(matches!(state.try_get_slice::<String>(), Err(ApiStateError::MissingSlice { .. })));
    assert!(state.slice_names().any(|name| name.ends_with("Counter")));
    assert_eq!(state.config.server.port, 8000);
}

#[tokio::test]
async fn validation_errors_are_422_with_detail() {
    let err = ApiError::Validation {
        message: "age: must be less than 100".into(),
        detail: vec![ViolationDetail::new("age", "must be less than 100").with_input(json!(120))],
        context: None,
    };

    let (status, body) = body_json(err).await;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["detail"][0]["field"], "age");
    assert_eq!(body["detail"][0]["input"], 120);
}

#[tokio::test]
async fn prediction_errors_are_500_without_detail() {
    let err = ApiError::Prediction { message: "model exploded".into(), context: None };

    let (status, body) = body_json(err).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Prediction failed", "message": "model exploded" }));
}

#[tokio::test]
async fn unknown_routes_are_404() {
    let (status, body) = body_json(not_found().await).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Not found");
}
