//! # Prediction Service
//!
//! Orchestrates one request: validate the raw input against the active feature scheme,
//! derive the feature row, hand a one-row frame to the injected classifier and shape the
//! response. Validation problems surface as [`ServiceError::Validation`]; anything the
//! classifier does wrong, panics included, surfaces as [`ServiceError::Prediction`].

mod error;
#[cfg(feature = "server")]
mod routes;
mod service;

pub use crate::error::{ServiceError, ServiceErrorExt};
pub use crate::service::{PredictionService, PredictionServiceBuilder};
#[cfg(feature = "server")]
pub use crate::routes::prediction_router;
