use crate::scheme::SchemeKind;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the server and the CLI.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub scheme: SchemeConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Classifier artifact location.
///
/// With `required = false` a missing or broken artifact only disables predictions; the
/// process still starts and `/health` reports `model_loaded: false`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: PathBuf,
    pub required: bool,
}

/// Feature scheme selected for this deployment.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchemeConfig {
    pub kind: SchemeKind,
    /// Include derived features and probabilities in prediction responses.
    /// Falls back to [`SchemeKind::detailed_by_default`].
    pub detailed_response: Option<bool>,
    /// Replaces the scheme's built-in city tier lists.
    pub cities: Option<CityTierConfig>,
}

impl SchemeConfig {
    #[must_use]
    pub fn detailed(&self) -> bool {
        self.detailed_response.unwrap_or_else(|| self.kind.detailed_by_default())
    }
}

/// City lists for tiers 1 and 2; every other city is tier 3.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CityTierConfig {
    pub tier_1: Vec<String>,
    pub tier_2: Vec<String>,
}

/// Log output settings consumed by the binaries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `RUST_LOG`-style directives; overrides `level` when set.
    pub filter: Option<String>,
    /// Directory for rolling log files; console only when unset.
    pub path: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 8000, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("model.json"), required: false }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, path: None, json: false }
    }
}
