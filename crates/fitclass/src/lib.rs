//! Facade crate for the fitness membership classifier.
//! Re-exports domain/kernel primitives and the feature crates, and assembles the
//! [`PredictionService`] a deployment runs with.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `fitclass` with the `server` feature for the HTTP surface.
//! - Call [`init`] once at startup and share the returned service.

mod error;

pub use crate::error::{PlatformError, PlatformErrorExt};
pub use fitclass_classifier as classifier;
pub use fitclass_deriver as deriver;
pub use fitclass_domain as domain;
pub use fitclass_kernel as kernel;
pub use fitclass_prediction as prediction;
pub use fitclass_prediction::PredictionService;

use fitclass_classifier::{Classifier, ForestModel, load_model};
use fitclass_deriver::{FeatureScheme, build_scheme};
use fitclass_domain::config::{ApiConfig, ModelConfig};
use std::sync::Arc;
use tracing::{info, warn};

#[cfg(feature = "server")]
pub mod server {
    pub use fitclass_kernel::server::{ApiError, ApiState, NO_CACHE, not_found};
    pub use fitclass_prediction::prediction_router;
}

/// Builds the prediction service for `config`.
///
/// The model is loaded once here. When it cannot be loaded and `model.required` is off,
/// the service still starts and reports `model_loaded: false`.
///
/// # Errors
/// Returns an error if a required model cannot be loaded or the service cannot be built.
pub fn init(config: &ApiConfig) -> Result<PredictionService, PlatformError> {
    let scheme = build_scheme(&config.scheme);
    let classifier = load_classifier(&config.model, scheme.as_ref())?;

    let service = PredictionService::builder()
        .scheme(scheme)
        .detailed(config.scheme.detailed())
        .maybe_classifier(classifier)
        .build()
        .context("Failed to build prediction service")?;

    info!(scheme = %service.kind(), model_loaded = service.model_loaded(), "Platform initialized");
    Ok(service)
}

fn load_classifier(
    config: &ModelConfig,
    scheme: &dyn FeatureScheme,
) -> Result<Option<Arc<dyn Classifier>>, PlatformError> {
    match load_model(&config.path) {
        Ok(model) => {
            check_columns(&model, scheme);
            Ok(Some(Arc::new(model)))
        },
        Err(err) if config.required => {
            Err(err).context(format!("Required model {}", config.path.display()))
        },
        Err(err) => {
            warn!(
                path = %config.path.display(),
                error = %err,
                "Model not loaded; predictions are disabled"
            );
            Ok(None)
        },
    }
}

/// A model trained on another scheme fails every request with a schema error.
fn check_columns(model: &ForestModel, scheme: &dyn FeatureScheme) {
    if !model.input_columns().eq(scheme.columns().iter().copied()) {
        warn!(
            scheme = %scheme.kind(),
            model_columns = ?model.input_columns().collect::<Vec<_>>(),
            scheme_columns = ?scheme.columns(),
            "Model input columns do not match the feature scheme"
        );
    }
}
