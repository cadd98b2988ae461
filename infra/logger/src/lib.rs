//! # Logger
//!
//! Configures the global `tracing` subscriber for the workspace binaries: console output,
//! optional rolling file output through a non-blocking writer, plain or JSON formatting,
//! and `RUST_LOG`-compatible filtering.
//!
//! ## Example
//!
//! ```rust
//! # use fitclass_logger::{LevelFilter, Logger};
//! let _logger = Logger::builder()
//!     .name("fitclass-server")
//!     .level(LevelFilter::DEBUG)
//!     .env_filter("fitclass=debug,tower_http=info")
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::{fs, io};
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::format::{DefaultFields, Format, Full};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;
type FullLayer<S, T, W> = fmt::Layer<S, DefaultFields, Format<Full, T>, W>;

#[derive(Debug)]
struct Settings {
    console: bool,
    stderr: bool,
    json: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    env_filter: Option<String>,
    rotation: Rotation,
    max_files: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            console: true,
            stderr: false,
            json: false,
            path: None,
            level: LevelFilter::INFO,
            env_filter: None,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

/// Type-state marker: no logger name set yet.
#[derive(Debug)]
pub struct Unnamed;

/// Type-state marker: the logger has a name and can be initialized.
#[derive(Debug)]
pub struct Named(String);

/// Builder for the global subscriber. A name is required before [`LoggerBuilder::init`]
/// becomes available.
#[must_use = "The builder does nothing until .init() is called"]
#[derive(Debug)]
pub struct LoggerBuilder<N = Unnamed> {
    settings: Settings,
    name: N,
}

impl LoggerBuilder<Unnamed> {
    /// Names the logger; also used as the log file prefix (`<name>.<date>.log`).
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named> {
        LoggerBuilder { settings: self.settings, name: Named(name.into()) }
    }
}

impl LoggerBuilder<Named> {
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Programmatic filter directives (e.g. `fitclass=debug,hyper=warn`).
    ///
    /// Takes precedence over `RUST_LOG`. Invalid directives fail [`LoggerBuilder::init`].
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.settings.env_filter = Some(filter.into());
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Sends console output to stderr instead of stdout.
    pub const fn stderr(mut self, enabled: bool) -> Self {
        self.settings.stderr = enabled;
        self
    }

    /// Emits JSON records on every enabled output.
    pub const fn json(mut self, enabled: bool) -> Self {
        self.settings.json = enabled;
        self
    }

    /// Writes logs into rolling files under `path`.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings.path = Some(path.into());
        self
    }

    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.rotation = rotation;
        self
    }

    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }

    /// Installs the global subscriber.
    ///
    /// The returned [`Logger`] owns the file writer's worker guard; keep it alive for the
    /// lifetime of the process so buffered records are flushed.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, an
    ///   invalid filter or no enabled output.
    /// * [`LoggerError::Appender`] / [`LoggerError::Internal`] when the log directory or file
    ///   cannot be created.
    /// * [`LoggerError::Subscriber`] when a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { settings, name: Named(name) } = self;
        validate(&settings, &name)?;

        let filter = build_filter(&settings)?;
        let mut layers: Vec<BoxedLayer<_>> = Vec::new();

        if settings.console {
            let console = fmt::layer().with_ansi(!settings.json);
            layers.push(if settings.stderr {
                format_layer(console.with_writer(io::stderr), settings.json)
            } else {
                format_layer(console, settings.json)
            });
        }

        let guard = match &settings.path {
            Some(path) => {
                fs::create_dir_all(path).map_err(|e| LoggerError::Internal {
                    message: e.to_string().into(),
                    context: Some(format!("Failed to create {}", path.display()).into()),
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(settings.rotation.clone())
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(settings.max_files)
                    .build(path)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);

                layers.push(format_layer(
                    fmt::layer().with_writer(writer).with_ansi(false),
                    settings.json,
                ));
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No output enabled; enable the console or set a log path".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        tracing::debug!(logger = %name, json = settings.json, "Logging initialized");

        Ok(Logger { name, guard })
    }
}

fn format_layer<S, T, W>(layer: FullLayer<S, T, W>, json: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    T: FormatTime + Send + Sync + 'static,
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    if json { layer.json().boxed() } else { layer.compact().boxed() }
}

fn validate(settings: &Settings, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }
    if settings.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }
    Ok(())
}

fn build_filter(settings: &Settings) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());
    match &settings.env_filter {
        Some(directives) => {
            builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid filter '{directives}': {e}").into(),
                context: None,
            })
        },
        None => Ok(builder.from_env_lossy()),
    }
}

/// Handle to the installed subscriber. Dropping it flushes and stops the file writer.
#[must_use = "Dropping this handle stops background file logging"]
#[derive(Debug)]
pub struct Logger {
    name: String,
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a new [`LoggerBuilder`].
    ///
    /// ```rust
    /// use fitclass_logger::{LevelFilter, Logger};
    ///
    /// let builder = Logger::builder().name("fitclass").level(LevelFilter::WARN);
    /// # drop(builder);
    /// ```
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { settings: Settings::default(), name: Unnamed }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether records are also written to files.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!(logger = %self.name, "Logging shutting down, flushing file output");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = Logger::builder().name("fitclass-test");
        assert!(builder.settings.console);
        assert!(!builder.settings.json);
        assert!(!builder.settings.stderr);
        assert_eq!(builder.settings.level, LevelFilter::INFO);
        assert_eq!(builder.settings.max_files, DEFAULT_MAX_FILES);
        assert!(builder.settings.path.is_none());
    }

    #[test]
    fn builder_collects_settings() {
        let builder = Logger::builder()
            .name("fitclass-test")
            .level(LevelFilter::DEBUG)
            .env_filter("fitclass=trace")
            .json(true)
            .stderr(true)
            .path("/tmp/fitclass-logs")
            .max_files(3);

        assert_eq!(builder.settings.level, LevelFilter::DEBUG);
        assert_eq!(builder.settings.env_filter.as_deref(), Some("fitclass=trace"));
        assert!(builder.settings.json);
        assert!(builder.settings.stderr);
        assert_eq!(builder.settings.max_files, 3);
        assert_eq!(builder.settings.path, Some(PathBuf::from("/tmp/fitclass-logs")));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Logger::builder().name("  ").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn zero_max_files_is_rejected() {
        let err = Logger::builder().name("fitclass-test").max_files(0).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn invalid_filter_is_rejected() {
        let settings = Settings { env_filter: Some("fitclass=[".to_owned()), ..Settings::default() };
        assert!(build_filter(&settings).is_err());
    }

    #[test]
    fn no_outputs_is_rejected() {
        let err = Logger::builder().name("fitclass-test").console(false).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
