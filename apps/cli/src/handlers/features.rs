use crate::args::FormArgs;
use crate::render;
use anyhow::Result;
use fitclass::PredictionService;
use fitclass::domain::config::ApiConfig;

pub(crate) fn run(mut cfg: ApiConfig, form: &FormArgs, json: bool) -> Result<()> {
    if let Some(kind) = form.scheme {
        cfg.scheme.kind = kind;
    }

    let service = PredictionService::builder().scheme_config(&cfg.scheme).build()?;
    let row = service.derive_features(&form.to_raw())?.to_row();

    if json {
        println!("{}", serde_json::to_string_pretty(&row)?);
    } else {
        print!("{}", render::features(&row));
    }
    Ok(())
}
