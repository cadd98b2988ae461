use config::{Config, Environment, File, Map};
use fitclass_domain::constants::{DEFAULT_CONFIG_NAME, ENV_PREFIX};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

const ENV_SEPARATOR: &str = "__";

/// Custom error type for config loading.
#[fitclass_derive::fitclass_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration: an optional file overlaid with `FITCLASS__*` environment values.
///
/// * **File**: an explicit path must exist. Without one, `fitclass.{toml,json,yaml}` in the
///   working directory is used when present.
/// * **Environment**: `FITCLASS__SECTION__KEY` maps to `section.key`
///   (e.g. `FITCLASS__SERVER__PORT=9000`, `FITCLASS__SCHEME__KIND=income`).
#[must_use = "loaders do nothing until .load() is called"]
#[derive(Debug, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    env: Option<Map<String, String>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: Option<impl AsRef<Path>>) -> Self {
        self.path = path.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Reads environment overrides from `vars` instead of the process environment.
    pub fn env_source(mut self, vars: Map<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// # Errors
    /// Returns an error if an explicit file is missing or unreadable, or if the merged
    /// values do not deserialize into `T`.
    pub fn load<T>(self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let file = match &self.path {
            Some(path) => {
                info!("Loading config from {}", path.display());
                File::from(path.as_path()).required(true)
            },
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .convert_case(config::Case::Snake)
            .try_parsing(true)
            .source(self.env);

        let config = Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()
            .context("Failed to build config")?
            .try_deserialize::<T>()
            .context("Failed to deserialize config")?;

        Ok(config)
    }
}

/// Loads `T` from an optional file plus environment overrides.
///
/// # Errors
/// See [`ConfigLoader::load`].
///
/// # Example
/// ```rust
/// use fitclass_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    ConfigLoader::new().path(path).load()
}
