use crate::render;
use fitclass::deriver::build_scheme;
use fitclass::domain::config::{ApiConfig, SchemeConfig};
use fitclass::domain::scheme::SchemeKind;

/// Prints every scheme; the configured one uses the configured city lists.
pub(crate) fn run(cfg: &ApiConfig) {
    for kind in SchemeKind::ALL {
        let active = kind == cfg.scheme.kind;
        let config = SchemeConfig {
            kind,
            cities: if active { cfg.scheme.cities.clone() } else { None },
            ..SchemeConfig::default()
        };
        print!("{}", render::scheme(build_scheme(&config).as_ref(), active));
    }
}
