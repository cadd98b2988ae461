//! HTTP handlers for the prediction slice.

use crate::error::ServiceError;
use crate::service::PredictionService;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use fitclass_derive::api_handler;
use fitclass_domain::constants::{PREDICTION_TAG, SYSTEM_TAG};
use fitclass_domain::input::RawInput;
use fitclass_domain::response::{HealthReport, PredictionResponse, ServiceInfo};
use fitclass_kernel::server::{ApiError, ApiState, ErrorBody, NO_CACHE, ViolationDetail};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes served by this slice; the service must be registered on [`ApiState`].
pub fn prediction_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(describe_handler))
        .routes(routes!(health_handler))
        .routes(routes!(predict_handler))
}

fn service(state: &ApiState) -> Result<Arc<PredictionService>, ApiError> {
    Ok(state.try_get_slice::<PredictionService>()?)
}

#[api_handler(
    get,
    path = "/",
    responses((status = OK, description = "Service description", body = ServiceInfo)),
    tag = SYSTEM_TAG,
)]
pub(crate) async fn describe_handler(
    State(state): State<ApiState>,
) -> Result<Json<ServiceInfo>, ApiError> {
    Ok(Json(service(&state)?.describe()))
}

#[api_handler(
    get,
    path = "/health",
    responses((status = OK, description = "Liveness and model status", body = HealthReport)),
    tag = SYSTEM_TAG,
)]
pub(crate) async fn health_handler(
    State(state): State<ApiState>,
) -> Result<impl IntoResponse, ApiError> {
    Ok((NO_CACHE, Json(service(&state)?.health())))
}

#[api_handler(
    post,
    path = "/predict",
    request_body = RawInput,
    responses(
        (status = OK, description = "Predicted membership category", body = PredictionResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Input failed validation", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Classifier failure", body = ErrorBody),
    ),
    tag = PREDICTION_TAG,
)]
pub(crate) async fn predict_handler(
    State(state): State<ApiState>,
    payload: Result<Json<RawInput>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(raw) = payload?;
    Ok(Json(service(&state)?.predict(&raw)?))
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation { source, .. } => {
                let detail = source
                    .violations
                    .iter()
                    .map(|v| ViolationDetail {
                        field: v.field.to_owned(),
                        constraint: v.constraint.clone(),
                        input: v.input.as_ref().and_then(|value| serde_json::to_value(value).ok()),
                    })
                    .collect();
                Self::Validation { message: source.to_string().into(), detail, context: None }
            },
            ServiceError::Prediction { source, .. } => {
                Self::Prediction { message: source.to_string().into(), context: None }
            },
            ServiceError::Internal { message, context } => Self::Internal { message, context },
        }
    }
}
