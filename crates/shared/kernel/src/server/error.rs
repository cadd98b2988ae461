use super::state::ApiStateError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fitclass_derive::api_model;
use std::borrow::Cow;
use tracing::error;

/// One violated input constraint, as reported to clients.
#[api_model]
#[derive(Clone, PartialEq)]
pub struct ViolationDetail {
    /// Offending field, or `body` when the payload itself could not be read
    pub field: String,
    /// Human-readable constraint
    pub constraint: String,
    /// The rejected value, when there was one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub input: Option<serde_json::Value>,
}

impl ViolationDetail {
    pub fn new(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self { field: field.into(), constraint: constraint.into(), input: None }
    }

    #[must_use]
    pub fn with_input(mut self, input: serde_json::Value) -> Self {
        self.input = Some(input);
        self
    }
}

/// JSON body of every error response.
#[api_model]
pub struct ErrorBody {
    /// Error kind, e.g. `Validation failed`
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<ViolationDetail>>,
}

#[fitclass_derive::fitclass_error]
pub enum ApiError {
    #[error("Validation failed{}: {message}", format_context(.context))]
    Validation {
        message: Cow<'static, str>,
        detail: Vec<ViolationDetail>,
        context: Option<Cow<'static, str>>,
    },
    #[error("Prediction failed{}: {message}", format_context(.context))]
    Prediction { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("State error{}: {source}", format_context(.context))]
    State { source: ApiStateError, context: Option<Cow<'static, str>> },
    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Prediction { .. } | Self::State { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "Validation failed",
            Self::Prediction { .. } => "Prediction failed",
            Self::NotFound { .. } => "Not found",
            Self::State { .. } | Self::Internal { .. } => "Internal server error",
        }
    }

    /// Client-facing message; context stays in the logs.
    fn message(&self) -> String {
        match self {
            Self::Validation { message, .. }
            | Self::Prediction { message, .. }
            | Self::NotFound { message, .. }
            | Self::Internal { message, .. } => message.to_string(),
            Self::State { source, .. } => source.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        Self::Validation {
            detail: vec![ViolationDetail::new("body", message.clone())],
            message: message.into(),
            context: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.kind().to_owned(),
            message: self.message(),
            detail: match self {
                Self::Validation { detail, .. } => Some(detail),
                _ => None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound { message: "No route matches the request".into(), context: None }
}
