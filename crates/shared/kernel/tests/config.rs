use fitclass_kernel::config::{ConfigError, ConfigLoader, load_config};
use fitclass_kernel::domain::config::ApiConfig;
use fitclass_kernel::domain::scheme::SchemeKind;
use std::io::Write;
use std::path::PathBuf;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

#[test]
fn defaults_without_file_or_env() {
    let cfg: ApiConfig = ConfigLoader::new()
        .path(None::<&str>)
        .env_source(env(&[]))
        .load()
        .expect("defaults load");

    assert_eq!(cfg.server.port, 8000);
    assert_eq!(cfg.model.path, PathBuf::from("model.json"));
    assert_eq!(cfg.scheme.kind, SchemeKind::Risk);
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn file_values_are_loaded() {
    let file = write_config(
        r#"
[server]
port = 9100

[model]
path = "assets/models/income_forest.json"
required = true

[scheme]
kind = "income"
detailed_response = false

[scheme.cities]
tier_1 = ["Houston"]
tier_2 = ["Austin", "Denver"]
"#,
    );

    let cfg: ApiConfig =
        ConfigLoader::new().path(Some(file.path())).env_source(env(&[])).load().expect("load");

    assert_eq!(cfg.server.port, 9100);
    assert!(cfg.model.required);
    assert_eq!(cfg.scheme.kind, SchemeKind::Income);
    assert!(!cfg.scheme.detailed());
    let cities = cfg.scheme.cities.as_ref().expect("cities");
    assert_eq!(cities.tier_1, vec!["Houston".to_owned()]);
    assert_eq!(cities.tier_2.len(), 2);
}

#[test]
fn environment_overrides_file() {
    let file = write_config("[server]\nport = 9100\n\n[scheme]\nkind = \"risk\"\n");

    let cfg: ApiConfig = ConfigLoader::new()
        .path(Some(file.path()))
        .env_source(env(&[
            ("FITCLASS__SERVER__PORT", "9200"),
            ("FITCLASS__SCHEME__KIND", "income"),
            ("FITCLASS__MODEL__REQUIRED", "true"),
            ("UNRELATED__SERVER__PORT", "1"),
        ]))
        .load()
        .expect("load");

    assert_eq!(cfg.server.port, 9200);
    assert_eq!(cfg.scheme.kind, SchemeKind::Income);
    assert!(cfg.model.required);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.toml");

    let err = load_config::<ApiConfig>(Some(&missing)).expect_err("missing file must fail");
    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().contains("Failed to build config"));
}

#[test]
fn malformed_values_fail_to_deserialize() {
    let file = write_config("[server]\nport = \"not a port\"\n");

    let err = ConfigLoader::new()
        .path(Some(file.path()))
        .env_source(env(&[]))
        .load::<ApiConfig>()
        .expect_err("bad port must fail");
    assert!(err.to_string().contains("Failed to deserialize config"));
}
