use crate::args::FormArgs;
use crate::render;
use anyhow::{Context, Result};
use fitclass::domain::config::ApiConfig;
use std::path::PathBuf;
use tracing::debug;

/// Runs one prediction in-process. The model is mandatory here: without it there is
/// nothing to show.
pub(crate) fn run(mut cfg: ApiConfig, form: &FormArgs, model: Option<PathBuf>, json: bool) -> Result<()> {
    if let Some(kind) = form.scheme {
        cfg.scheme.kind = kind;
    }
    if let Some(path) = model {
        cfg.model.path = path;
    }
    cfg.model.required = true;

    let service = fitclass::init(&cfg).context("Failed to initialize the classifier")?;
    let raw = form.to_raw();
    debug!(scheme = %service.kind(), ?raw, "Submitting form");

    let record = service.derive_features(&raw)?;
    let response = service.predict_record(&record)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render::prediction(&record, &response));
    }
    Ok(())
}
