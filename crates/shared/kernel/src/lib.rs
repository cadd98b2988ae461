//! Kernel utilities shared across slices.
//! Keep this crate lightweight: config loading, the shared API state registry and the
//! mapping from service failures to HTTP responses.
//!
//! ## Config loading
//! ```rust,no_run
//! use fitclass_kernel::config::load_config;
//! use fitclass_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("config/local.toml"))?;
//! # Ok::<(), fitclass_kernel::config::ConfigError>(())
//! ```
pub mod config;
#[cfg(feature = "server")]
pub mod server;

pub use fitclass_domain as domain;
